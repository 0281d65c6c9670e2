//! # tradecalc
//!
//! Command-line front end for `trade_core`. Each calculator is a subcommand;
//! form fields are flags, checked as numbers before anything is calculated.
//!
//! ```text
//! tradecalc voltage-drop --current 20 --length 10 --cable 2.5
//! tradecalc cis --labour 1000 --materials 200 --rate 20 --save jobs.tcj
//! tradecalc formulas voltage-drop
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod args;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trade_core::file_io::{
    load_job_book, load_job_book_with_lock_check, load_or_create_job_book, save_job_book, FileLock,
};
use trade_core::formulas::{formulas_for, generate_formulas_markdown};
use trade_core::{CalcError, CalcResult, CalculationItem, CalculatorKind, PriceList, SaveJobRequest, SavedJob};

use args::{Cli, Commands, GlobalOpts, JobsArgs};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            if let Some(hint) = retry_hint(&e) {
                eprintln!("{}", hint);
            }
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Advice for errors that go away on their own.
fn retry_hint(e: &CalcError) -> Option<&'static str> {
    e.is_recoverable()
        .then_some("The job book is open elsewhere. Try again once it is released.")
}

fn lock_owner(opts: &GlobalOpts) -> String {
    opts.user.clone().unwrap_or_else(whoami::username)
}

fn run(cli: Cli) -> CalcResult<()> {
    let prices = PriceList::load_or_default(cli.global.prices.as_deref())?;
    debug!(version = %prices.version, "price list ready");

    match &cli.command {
        Commands::Prices => {
            print!("{}", prices.to_toml_string()?);
            return Ok(());
        }
        Commands::Formulas(a) => {
            match &a.calculator {
                None => print!("{}", generate_formulas_markdown()),
                Some(name) => {
                    let kind = CalculatorKind::from_name(name)?;
                    println!("{}:", kind.display_name());
                    for formula in formulas_for(kind) {
                        let meta = formula.metadata();
                        println!("  {:<32} {}", meta.name, meta.formula_plain);
                        println!("  {:<32} {}", "", meta.reference.citation());
                    }
                }
            }
            return Ok(());
        }
        Commands::Jobs(a) => return run_jobs(a, &cli.global),
        _ => {}
    }

    let Some(item) = cli.command.to_item(&cli.global.label)? else {
        return Ok(());
    };
    calculate_and_report(item, &prices, &cli.global)
}

fn calculate_and_report(item: CalculationItem, prices: &PriceList, opts: &GlobalOpts) -> CalcResult<()> {
    let kind = item.kind();
    let outcome = item.calculate(prices)?;
    info!(calculator = kind.as_str(), "calculation complete");

    let json = serde_json::to_string_pretty(&outcome)
        .map_err(|e| CalcError::SerializationError { reason: e.to_string() })?;

    if opts.json {
        println!("{}", json);
    } else {
        let title = if item.label().is_empty() {
            kind.display_name().to_string()
        } else {
            format!("{} - {}", kind.display_name(), item.label())
        };
        print!("{}", output::render(&title, &outcome));
        println!();
        println!("JSON:");
        println!("{}", json);
    }

    if let Some(path) = &opts.save {
        let request = SaveJobRequest {
            calculator_type: kind,
            inputs: item,
            results: outcome,
        };
        let job = SavedJob::from_request(request, prices.version.clone())?;

        let user = lock_owner(opts);
        let lock = FileLock::acquire(path, user.clone())?;
        let mut book = load_or_create_job_book(lock.book_path(), &user)?;
        let id = book.add_job(job);
        save_job_book(&book, lock.book_path())?;
        eprintln!("Saved job {} to {}", id, lock.book_path().display());
    }

    Ok(())
}

fn run_jobs(args: &JobsArgs, opts: &GlobalOpts) -> CalcResult<()> {
    if let Some(id) = args.remove {
        let lock = FileLock::acquire(&args.book, lock_owner(opts))?;
        let mut book = load_job_book(lock.book_path())?;
        let removed = book
            .remove_job(&id)
            .ok_or_else(|| CalcError::unknown_entry("job", id.to_string()))?;
        save_job_book(&book, lock.book_path())?;
        eprintln!("Removed job {} ({})", removed.id, removed.label);
        return Ok(());
    }

    let (book, lock) = load_job_book_with_lock_check(&args.book)?;
    if let Some(info) = &lock {
        eprintln!("{}", output::render_lock(info));
    }

    if let Some(id) = args.show {
        let job = book
            .get_job(&id)
            .ok_or_else(|| CalcError::unknown_entry("job", id.to_string()))?;
        let json =
            serde_json::to_string_pretty(job).map_err(|e| CalcError::SerializationError { reason: e.to_string() })?;
        println!("{}", json);
        return Ok(());
    }

    let jobs = match &args.kind {
        Some(name) => book.jobs_of_kind(CalculatorKind::from_name(name)?),
        None => book.jobs.values().collect(),
    };
    print!("{}", output::render_jobs(&book.meta.owner, jobs));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_hint_only_for_locks() {
        let locked = CalcError::file_locked("jobs.tcj", "dave", "2026-01-05T09:00:00Z");
        assert!(retry_hint(&locked).is_some());
        assert!(retry_hint(&CalcError::missing_field("current_a")).is_none());
    }
}
