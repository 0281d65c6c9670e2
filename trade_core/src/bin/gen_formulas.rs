//! Generate FORMULAS.md from the formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas [output-path]
//! ```
//!
//! Writes to `trade_core/FORMULAS.md` (relative to the workspace root)
//! unless a path is given.

use std::fs;
use std::path::PathBuf;

use trade_core::formulas::generate_formulas_markdown;

const DEFAULT_OUTPUT: &str = "trade_core/FORMULAS.md";

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("Generating {}...", output_path.display());
    let markdown = generate_formulas_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
