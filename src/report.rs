//! One upload, start to finish: resolve the SKU column, then aggregate it.

use log::info;

use crate::{
    aggregate::{Summary, aggregate},
    error::ReportError,
    resolver::{self, ResolvedColumn},
    source::Table,
};

#[derive(Debug, Clone)]
pub struct Report {
    pub column: ResolvedColumn,
    pub summary: Summary,
}

/// Builds the units-sold summary for `table`. `sku_column` replaces automatic
/// detection when set.
pub fn build(table: &Table, sku_column: Option<&str>) -> Result<Report, ReportError> {
    let column = match sku_column {
        Some(requested) => resolver::resolve_named(table.headers(), requested)?,
        None => resolver::require(table.headers())?,
    };
    info!(
        "Using column '{}' (position {}) as the SKU column",
        column.name.trim(),
        column.index + 1
    );
    let summary = aggregate(table.column(column.index));
    Ok(Report { column, summary })
}
