//! Plain-text rendering for the command line

use std::fmt::Write;

use crate::dice::{HistogramBar, RollResult, RollSummary};

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 40;

/// Averages and miss chance, one per line
pub fn render_summary(summary: &RollSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.notation);
    let _ = writeln!(out, "  average on hit: {:.2}", summary.average_on_hit);
    let _ = writeln!(out, "  total average:  {:.2}", summary.total_average);
    let _ = writeln!(out, "  chance to miss: {:.1}%", 100.0 * summary.miss_chance);
    out
}

/// Horizontal bar chart, tallest bar scaled to full width
pub fn render_histogram(bars: &[HistogramBar]) -> String {
    let tallest = bars.iter().map(|b| b.probability).fold(0.0, f64::max);
    let mut out = String::new();

    for bar in bars {
        let label = if bar.is_miss() {
            "miss".to_string()
        } else {
            bar.outcome.to_string()
        };
        let width = if tallest > 0.0 {
            (bar.probability / tallest * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>6} | {:<pad$} {}",
            label,
            "#".repeat(width),
            bar.percent(),
            pad = BAR_WIDTH
        );
    }
    out
}

/// Dice in reveal order, then the modifier and total
pub fn render_roll(result: &RollResult) -> String {
    let mut out = String::new();

    for die in result.display_order() {
        let mut marker = "";
        if die.is_crit {
            marker = " (crit)";
        } else if die.is_miss {
            marker = " (miss)";
        }
        let kind = die.kind.to_string();
        let _ = writeln!(
            out,
            "  {:<9} d{:<3} {:>3}{}",
            kind, die.die_size, die.value, marker
        );
    }

    if result.modifier != 0 {
        let _ = writeln!(out, "  modifier  {:+}", result.modifier);
    }
    let _ = writeln!(out, "  total     {}", result.total);
    out
}
