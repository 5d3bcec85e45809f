use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Count units sold per seller SKU in a sales export",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the SKU column and report units sold per SKU
    Summarize(SummarizeArgs),
    /// List the header row and show which column is used as the SKU
    Columns(ColumnsArgs),
    /// Preview the first few rows of a sales export
    Preview(PreviewArgs),
}

/// Options shared by every command that reads a sales export.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Sales export to read (.csv, .tsv, .xlsx, .xls, .xlsm, .xlsb, .ods, or - for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Worksheet to read, by name or 0-based index (spreadsheets only)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Delimiter for text input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Use this column as the SKU instead of detecting it
    #[arg(long = "sku-column")]
    pub sku_column: Option<String>,
    /// How to print the summary on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Print a ranked bar chart of the best-selling SKUs
    #[arg(long)]
    pub chart: bool,
    /// Number of SKUs to chart (1 to 200, defaults to 15)
    #[arg(long)]
    pub top: Option<usize>,
    /// Print this many raw rows before the summary
    #[arg(long)]
    pub preview: Option<usize>,
    /// Write the summary as delimited text
    #[arg(long = "csv-out")]
    pub csv_out: Option<PathBuf>,
    /// Delimiter for --csv-out (defaults to ',' or tab for .tsv)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Write the summary as an .xlsx workbook
    #[arg(long = "xlsx-out")]
    pub xlsx_out: Option<PathBuf>,
    /// Write the summary as JSON
    #[arg(long = "json-out")]
    pub json_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    /// Print nothing on stdout (exports only)
    None,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Mark this header as the SKU column instead of detecting it
    #[arg(long = "sku-column")]
    pub sku_column: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_names_and_literals_parse() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn summarize_flags_parse() {
        let cli = Cli::try_parse_from([
            "sku-tally",
            "summarize",
            "-i",
            "orders.xlsx",
            "--sheet",
            "1",
            "--chart",
            "--top",
            "5",
            "--format",
            "json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Summarize(args) => {
                assert_eq!(args.source.sheet.as_deref(), Some("1"));
                assert!(args.chart);
                assert_eq!(args.top, Some(5));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
