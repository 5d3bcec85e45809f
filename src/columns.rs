//! Header listing with the detected SKU column marked.
//!
//! Useful when detection fails or picks an unexpected column: the listing
//! shows every header exactly as the decoder saw it.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::ColumnsArgs,
    load_input,
    resolver::{self, Detection},
    table,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let source = load_input(&args.source)?;
    let headers = source.headers();
    let resolved = match args.sku_column.as_deref() {
        Some(name) => Some(
            resolver::resolve_named(headers, name)
                .with_context(|| format!("Selecting SKU column in {:?}", args.source.input))?,
        ),
        None => resolver::resolve(headers),
    };

    let rows = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let marker = match &resolved {
                Some(column) if column.index == idx => match column.method {
                    Detection::Alias => "sku (alias)",
                    Detection::Fragment => "sku (contains 'sku')",
                    Detection::Explicit => "sku",
                },
                _ => "",
            };
            vec![(idx + 1).to_string(), name.clone(), marker.to_string()]
        })
        .collect::<Vec<_>>();
    let table_headers = vec!["#".to_string(), "name".to_string(), "role".to_string()];
    print!(
        "{}",
        table::render_table(&table_headers, &rows, &[table::Align::Right])
    );

    let column = match resolved {
        Some(column) => column,
        None => resolver::require(headers)
            .with_context(|| format!("Detecting SKU column in {:?}", args.source.input))?,
    };
    info!(
        "Listed {} column(s); SKU column is '{}'",
        headers.len(),
        column.name.trim()
    );
    Ok(())
}
