use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, load_input, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let source = load_input(&args.source)?;
    print!("{}", table::preview_table(&source, args.rows));
    info!(
        "Displayed {} of {} row(s) from {:?}",
        args.rows.min(source.row_count()),
        source.row_count(),
        args.source.input
    );
    Ok(())
}
