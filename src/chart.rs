//! Ranked horizontal bar chart of the best-selling SKUs, rendered as text.

use std::fmt::Write as _;

use log::warn;

use crate::{
    aggregate::{Summary, SummaryRow},
    table::clean_cell,
};

pub const MAX_TOP: usize = 200;
pub const DEFAULT_TOP: usize = 15;
const BAR_WIDTH: usize = 50;
const BAR_GLYPH: char = '#';

/// Chart size for a summary of `len` rows: the request clamped to
/// `[1, min(200, len)]`, or 15 (or the bound, when smaller) by default.
/// An empty summary always charts zero rows.
pub fn clamp_top(requested: Option<usize>, len: usize) -> usize {
    let upper = len.min(MAX_TOP);
    if upper == 0 {
        return 0;
    }
    match requested {
        None => DEFAULT_TOP.min(upper),
        Some(n) => {
            let clamped = n.clamp(1, upper);
            if clamped != n {
                warn!("Requested top {n} is outside 1..={upper}; charting {clamped}");
            }
            clamped
        }
    }
}

pub fn render_chart(summary: &Summary, requested: Option<usize>) -> String {
    let top = clamp_top(requested, summary.len());
    render_bars(summary.top(top))
}

fn render_bars(rows: &[SummaryRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Top {} Best-Selling Items", rows.len());
    if rows.is_empty() {
        let _ = writeln!(output, "(no items)");
        return output;
    }

    let labels = rows.iter().map(|row| clean_cell(&row.sku)).collect::<Vec<_>>();
    let label_width = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Item (Seller SKU)".len());
    let peak = rows
        .iter()
        .map(|row| row.total_sold_count)
        .max()
        .unwrap_or(1)
        .max(1);

    let _ = writeln!(output, "{:<label_width$}  Units Sold", "Item (Seller SKU)");
    for (row, label) in rows.iter().zip(&labels) {
        // Every listed SKU sold at least once, so it always gets a visible bar.
        let length = (row.total_sold_count * BAR_WIDTH).div_ceil(peak).max(1);
        let bar = BAR_GLYPH.to_string().repeat(length);
        let padding = label_width.saturating_sub(label.chars().count());
        let _ = writeln!(
            output,
            "{}{}  {bar} {}",
            label,
            " ".repeat(padding),
            row.total_sold_count
        );
    }
    output
}
