use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use crate::{
    chart,
    cli::{OutputFormat, SummarizeArgs},
    export, io_utils, load_input, report, table,
};

pub fn execute(args: &SummarizeArgs) -> Result<()> {
    let input = &args.source.input;
    let source = load_input(&args.source)?;
    info!(
        "Read {} data row(s) across {} column(s) from {:?}",
        source.row_count(),
        source.headers().len(),
        input
    );

    let report = report::build(&source, args.sku_column.as_deref())
        .with_context(|| format!("Summarizing {input:?}"))?;
    let summary = &report.summary;
    info!(
        "Counted {} unit(s) across {} distinct SKU(s)",
        summary.total(),
        summary.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(rows) = args.preview {
        writeln!(out, "Raw Data Preview")?;
        write!(out, "{}", table::preview_table(&source, rows))?;
        writeln!(out)?;
    }
    match args.format {
        OutputFormat::Table => {
            writeln!(out, "Sales Summary (SKU column: {})", report.column.name.trim())?;
            write!(out, "{}", table::summary_table(summary))?;
        }
        OutputFormat::Csv => {
            export::write_csv(summary, &mut out, io_utils::DEFAULT_CSV_DELIMITER)
                .context("Writing CSV summary to stdout")?;
        }
        OutputFormat::Json => {
            export::write_json(summary, &mut out).context("Writing JSON summary to stdout")?;
            writeln!(out)?;
        }
        OutputFormat::None => {}
    }
    if args.chart {
        if args.format != OutputFormat::None {
            writeln!(out)?;
        }
        write!(out, "{}", chart::render_chart(summary, args.top))?;
    }
    out.flush()?;

    if let Some(path) = &args.csv_out {
        let delimiter = io_utils::resolve_output_delimiter(Some(path), args.output_delimiter);
        export::save_csv(summary, path, delimiter)?;
        info!(
            "Summary written to {:?} with delimiter '{}'",
            path,
            io_utils::printable_delimiter(delimiter)
        );
    }
    if let Some(path) = &args.xlsx_out {
        export::save_xlsx(summary, path)?;
        info!("Summary written to {path:?} (sheet '{}')", export::SHEET_NAME);
    }
    if let Some(path) = &args.json_out {
        export::save_json(summary, path)?;
        info!("Summary written to {path:?}");
    }
    Ok(())
}
