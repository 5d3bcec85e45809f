//! Failure taxonomy for a single report run.
//!
//! Every variant is terminal for the file being processed. An empty table is
//! not an error and never surfaces here.

use std::error::Error as StdError;

use thiserror::Error;

/// Maximum number of header names echoed back in a column-not-found message.
pub const MAX_LISTED_COLUMNS: usize = 50;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read the uploaded file '{file}'")]
    Decode {
        file: String,
        #[source]
        source: BoxError,
    },
    #[error(
        "Could not find an SKU column. Looked for column names like 'sellerSku', 'SKU', 'seller_sku'. Columns found: {}",
        list_columns(.columns)
    )]
    ColumnNotFound { columns: Vec<String> },
    #[error("Column '{requested}' does not exist. Columns found: {}", list_columns(.columns))]
    UnknownColumn {
        requested: String,
        columns: Vec<String>,
    },
    #[error("Failed to write {format} export to '{target}'")]
    Export {
        format: &'static str,
        target: String,
        #[source]
        source: BoxError,
    },
}

impl ReportError {
    pub fn decode(file: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ReportError::Decode {
            file: file.into(),
            source: source.into(),
        }
    }

    pub fn export(
        format: &'static str,
        target: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ReportError::Export {
            format,
            target: target.into(),
            source: source.into(),
        }
    }
}

fn list_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        return "(none)".to_string();
    }
    let mut listed = columns
        .iter()
        .take(MAX_LISTED_COLUMNS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if columns.len() > MAX_LISTED_COLUMNS {
        listed.push_str(", ...");
    }
    listed
}
