pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod columns;
pub mod error;
pub mod export;
pub mod io_utils;
pub mod preview;
pub mod report;
pub mod resolver;
pub mod source;
pub mod summarize;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use crate::{
    cli::{Cli, Commands, InputArgs},
    source::{LoadOptions, Table},
};

pub use crate::{
    aggregate::{Summary, SummaryRow, aggregate},
    error::ReportError,
    resolver::{ResolvedColumn, resolve},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sku_tally", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize(args) => summarize::execute(&args),
        Commands::Columns(args) => columns::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
    }
}

pub(crate) fn load_input(args: &InputArgs) -> Result<Table> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding,
        sheet: args.sheet.clone(),
    };
    Table::from_path(&args.input, &options)
        .with_context(|| format!("Loading sales export {:?}", args.input))
}
