use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::source::Cell;

pub const SKU_HEADER: &str = "sellerSku";
pub const COUNT_HEADER: &str = "total_sold_count";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "sellerSku")]
    pub sku: String,
    pub total_sold_count: usize,
}

impl SummaryRow {
    pub fn new(sku: impl Into<String>, total_sold_count: usize) -> Self {
        Self {
            sku: sku.into(),
            total_sold_count,
        }
    }
}

/// Units sold per distinct SKU, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that contributed to the summary.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.total_sold_count).sum()
    }

    /// Leading `n` rows (or all of them when fewer exist).
    pub fn top(&self, n: usize) -> &[SummaryRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn as_pairs(&self) -> Vec<(&str, usize)> {
        self.rows
            .iter()
            .map(|row| (row.sku.as_str(), row.total_sold_count))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Summary {
    type Item = &'a SummaryRow;
    type IntoIter = std::slice::Iter<'a, SummaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Default)]
struct SkuCounter {
    total: usize,
    counts: HashMap<String, usize>,
}

impl SkuCounter {
    fn ingest(&mut self, value: &Cell) {
        self.total += 1;
        *self.counts.entry(value.to_text()).or_insert(0) += 1;
    }

    /// Count descending, then identifier ascending, so the result does not
    /// depend on row order.
    fn into_summary(self) -> Summary {
        let mut rows = self
            .counts
            .into_iter()
            .map(|(sku, count)| SummaryRow::new(sku, count))
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| {
            b.total_sold_count
                .cmp(&a.total_sold_count)
                .then_with(|| a.sku.cmp(&b.sku))
        });
        debug!(
            "Aggregated {} row(s) into {} distinct SKU(s)",
            self.total,
            rows.len()
        );
        Summary { rows }
    }
}

/// Counts occurrences of each distinct SKU after coercing every cell to text.
/// Empty cells count under the empty-string identifier.
pub fn aggregate<'a, I>(values: I) -> Summary
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut counter = SkuCounter::default();
    for value in values {
        counter.ingest(value);
    }
    counter.into_summary()
}

/// Convenience for callers that already hold text.
pub fn aggregate_text<I, S>(values: I) -> Summary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells = values
        .into_iter()
        .map(|value| Cell::from(value.as_ref()))
        .collect::<Vec<_>>();
    aggregate(&cells)
}
