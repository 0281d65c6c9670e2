//! Plain-text summaries of calculation outcomes

use trade_core::calculations::bsp_thread::{BspLookupResult, ThreadMatch};
use trade_core::calculations::CalculationOutcome;
use trade_core::file_io::LockInfo;
use trade_core::job::SavedJob;
use trade_core::quote::{LineCategory, Quote};

const RULE: &str = "═══════════════════════════════════════";

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn thread_line(t: &ThreadMatch) -> String {
    format!(
        "{:<7} OD {:.3} mm, {} TPI, pitch {:.3} mm, root {:.3} mm, depth {:.3} mm",
        t.nominal_size, t.outer_diameter_mm, t.threads_per_inch, t.pitch_mm, t.inner_diameter_mm, t.thread_depth_mm
    )
}

fn quote_lines(quote: &Quote, out: &mut Vec<String>) {
    out.push(format!("Quote: {}", quote.title));
    for (heading, category) in [("Materials", LineCategory::Materials), ("Labour", LineCategory::Labour)] {
        let mut lines = quote.lines_in(category).peekable();
        if lines.peek().is_none() {
            continue;
        }
        out.push(format!("  {}:", heading));
        for line in lines {
            out.push(format!(
                "    {:<28} {:>8.2} {:<6} @ {:>9} = {:>10}",
                line.description, line.quantity, line.unit, line.unit_price, line.total
            ));
        }
    }
    let s = &quote.summary;
    out.push(format!("  Materials:   {:>10}", s.materials));
    out.push(format!("  Labour:      {:>10}", s.labour));
    out.push(format!("  Contingency: {:>10}", s.contingency));
    out.push(format!("  Net:         {:>10}", s.net));
    out.push(format!("  VAT:         {:>10}", s.vat));
    out.push(format!("  TOTAL:       {:>10}", s.total));
}

/// Human-readable lines for one outcome.
pub fn summary_lines(outcome: &CalculationOutcome) -> Vec<String> {
    let mut out = Vec::new();
    match outcome {
        CalculationOutcome::BspLookup(BspLookupResult::Diameter {
            thread,
            measured_mm,
            tolerance_mm,
        }) => {
            out.push(format!("Measured:  {:.2} mm", measured_mm));
            out.push(format!("Nearest:   {}", thread_line(thread)));
            out.push(format!("Tolerance: {:.2} mm", tolerance_mm));
        }
        CalculationOutcome::BspLookup(BspLookupResult::Tpi { tpi, matches }) => {
            if matches.is_empty() {
                out.push(format!("No BSP sizes with {} TPI", tpi));
            } else {
                out.push(format!("{} BSP sizes with {} TPI:", matches.len(), tpi));
                for t in matches {
                    out.push(format!("  {}", thread_line(t)));
                }
            }
        }
        CalculationOutcome::VoltageDrop(r) => {
            let defaulted = if r.cable_defaulted { " (size not tabulated, assumed)" } else { "" };
            out.push(format!("Cable:       {}{}", r.cable, defaulted));
            out.push(format!("Resistance:  {:.2} mΩ/m", r.resistance_mohm_per_m));
            out.push(format!("Drop:        {:.3} V on {:.0} V", r.voltage_drop_v, r.supply_v));
            out.push(format!(
                "Percent:     {:.2}% (limit {:.0}%) {}",
                r.voltage_drop_percent,
                r.limit_percent,
                status_icon(r.compliant)
            ));
            out.push(format!("Margin:      {:.2}%", r.margin_percent()));
            out.push(format!("Max run:     {:.1} m", r.max_run_length_m));
        }
        CalculationOutcome::CableSizing(r) => {
            out.push(format!("By current:  {}", r.by_current.describe()));
            if let Some(vd) = &r.by_voltage_drop {
                out.push(format!(
                    "By volt drop: {} ({:.2}% of {:.0} V) {}",
                    vd.size,
                    vd.check.voltage_drop_percent,
                    vd.check.supply_v,
                    status_icon(!vd.no_compliant_size)
                ));
                if vd.no_compliant_size {
                    out.push("  No tabulated size keeps the drop within the limit".to_string());
                }
            }
            out.push(format!("Recommended: {}", r.recommended()));
        }
        CalculationOutcome::Quantity(r) => {
            out.push(format!("Units: {} {} ({:.2} before rounding)", r.units, r.unit_name, r.raw_units));
        }
        CalculationOutcome::Concrete(r) => {
            let (c, s, b) = r.mix_ratio;
            out.push(format!("Volume:      {:.3} m³ ({:.3} m³ with waste)", r.volume.0, r.volume_with_waste.0));
            out.push(format!("Mix:         {}:{}:{}", c, s, b));
            out.push(format!("Cement:      {:.0} kg = {} bags", r.cement.0, r.cement_bags));
            out.push(format!("Sand:        {:.0} kg = {} bulk bags", r.sand.0, r.sand_bulk_bags));
            out.push(format!("Ballast:     {:.0} kg = {} bulk bags", r.ballast.0, r.ballast_bulk_bags));
            out.push(format!("Premixed:    {} bags", r.premixed_bags));
            out.push(format!("Ready-mix:   {:.2} m³", r.ready_mix_order.0));
            out.push(format!(
                "Cost:        site mix {}, premixed {}, ready-mix {} (prices {})",
                r.site_mix_cost, r.premixed_cost, r.ready_mix_cost, r.price_list_version
            ));
            out.push(format!("Cheapest:    {}", r.cheapest_cost()));
        }
        CalculationOutcome::Plaster(r) => {
            out.push(format!("Plaster:  {}", r.plaster_type.display_name()));
            out.push(format!("Coverage: {:.2} m²", r.coverage_needed_m2));
            out.push(format!("Bags:     {} ({:.2} before rounding)", r.bags, r.raw_bags));
            out.push(format!("Cost:     {} (prices {})", r.cost, r.price_list_version));
        }
        CalculationOutcome::Tile(r) => {
            out.push(format!("Tiles:    {}", r.tiles));
            out.push(format!(
                "Adhesive: {:.1} kg at {:.1} kg/m² = {} bags",
                r.adhesive.0, r.adhesive_rate_kg_per_m2, r.adhesive_bags
            ));
            out.push(format!("Grout:    {:.1} kg = {} bags", r.grout.0, r.grout_bags));
            out.push(format!("Cost:     {} (prices {})", r.cost, r.price_list_version));
        }
        CalculationOutcome::Drainage(r) => {
            out.push(format!("Excavation: {:.3} m³", r.excavation.0));
            out.push(format!(
                "Spoil:      {:.3} m³ bulked ({:.2} yd³) = {} skips",
                r.bulked_spoil.0, r.bulked_spoil_yards.0, r.skips
            ));
            out.push(format!("Pipe:       {} lengths", r.pipe_lengths));
            out.push(format!(
                "Bedding:    {:.3} m³ = {:.2} t = {} bulk bags",
                r.bedding.0, r.gravel.0, r.gravel_bulk_bags
            ));
            out.push(format!("Cost:       {} (prices {})", r.cost, r.price_list_version));
        }
        CalculationOutcome::Roofing(r) => roofing_lines(r, &mut out),
        CalculationOutcome::RoofRepairQuote(r) => {
            roofing_lines(&r.materials, &mut out);
            out.push(String::new());
            quote_lines(&r.quote, &mut out);
        }
        CalculationOutcome::StudWall(r) => {
            out.push(format!("Studs:        {} at {:.2} m", r.studs, r.stud_length.0));
            out.push(format!("Plates:       {:.2} m", r.plate_run.0));
            out.push(format!("Noggins:      {:.2} m", r.noggin_run.0));
            out.push(format!("Timber:       {:.2} m = {} lengths", r.total_timber.0, r.timber_lengths));
            out.push(format!("Plasterboard: {:.2} m² = {} sheets", r.board_area.0, r.plasterboard_sheets));
            out.push(format!(
                "Cost:         timber {}, board {}, total {} (prices {})",
                r.timber_cost, r.board_cost, r.total_cost, r.price_list_version
            ));
        }
        CalculationOutcome::Skirting(r) => {
            out.push(format!("Run:     {:.2} m", r.net_run.0));
            out.push(format!("Lengths: {}", r.lengths));
            out.push(format!("Cost:    {} (prices {})", r.cost, r.price_list_version));
        }
        CalculationOutcome::CisGrossToNet(r) => {
            out.push(format!("CIS rate:      {}", r.rate.display_name()));
            out.push(format!("Labour:        {:>10}", r.labour));
            out.push(format!("Materials:     {:>10}", r.materials));
            out.push(format!("CIS deduction: {:>10}", r.cis_deduction));
            out.push(format!("Net labour:    {:>10}", r.net_labour));
            out.push(format!("Subtotal:      {:>10}", r.subtotal));
            out.push(format!("VAT:           {:>10}", r.vat));
            out.push(format!("Grand total:   {:>10}", r.grand_total));
            out.push(format!("Payable now:   {:>10}", r.hmrc_payment));
        }
        CalculationOutcome::CisNetToGross(r) => {
            out.push(format!("CIS rate:       {}", r.rate.display_name()));
            out.push(format!("Net wanted:     {:>10}", r.net_labour));
            out.push(format!("Invoice labour: {:>10}", r.required_gross));
            out.push(format!("CIS deduction:  {:>10}", r.cis_deduction));
        }
    }
    out
}

fn roofing_lines(r: &trade_core::calculations::RoofingResult, out: &mut Vec<String>) {
    out.push(format!("Covering:  {}", r.tile.display_name()));
    out.push(format!("Slope:     {:.2} m²", r.slope_area.0));
    out.push(format!("Tiles:     {}", r.tiles));
    out.push(format!("Battens:   {:.1} m = {} lengths", r.batten_run.0, r.batten_lengths));
    out.push(format!("Underlay:  {} rolls", r.underlay_rolls));
    if r.below_minimum_pitch {
        out.push(format!(
            "WARNING:   pitch is below the {:.0}° minimum for this covering",
            r.tile.min_pitch_deg()
        ));
    }
    out.push(format!(
        "Cost:      tiles {}, battens {}, underlay {}, total {} (prices {})",
        r.tiles_cost, r.battens_cost, r.underlay_cost, r.materials_cost, r.price_list_version
    ));
}

/// Framed summary block.
pub fn render(title: &str, outcome: &CalculationOutcome) -> String {
    let mut text = String::new();
    text.push_str(RULE);
    text.push('\n');
    text.push_str(&format!("  {}\n", title));
    text.push_str(RULE);
    text.push('\n');
    for line in summary_lines(outcome) {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// One line per job, oldest first.
pub fn render_jobs(owner: &str, mut jobs: Vec<&SavedJob>) -> String {
    jobs.sort_by_key(|j| j.created);

    let mut text = format!("{} ({} jobs)\n", owner, jobs.len());
    for job in jobs {
        text.push_str(&format!(
            "{}  {:<18} {:<24} {}\n",
            job.created.format("%Y-%m-%d %H:%M"),
            job.calculator_type.as_str(),
            job.label,
            job.id
        ));
    }
    text
}

/// Who holds a job book open.
pub fn render_lock(info: &LockInfo) -> String {
    format!(
        "In use by {} on {} since {}",
        info.user_id,
        info.machine,
        info.locked_at.format("%Y-%m-%d %H:%M")
    )
}
