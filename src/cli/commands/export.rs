//! Export command - write a saved Q-table as CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    export::write_csv,
    persistence::{DEFAULT_SAVE_PATH, SavedQTable},
};

#[derive(Parser, Debug)]
#[command(about = "Export a saved Q-table to CSV for external plotting")]
pub struct ExportArgs {
    /// Path to a saved Q-table
    #[arg(long, short = 'i', default_value = DEFAULT_SAVE_PATH)]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(long, short = 'o', default_value = "q_table.csv")]
    pub output: PathBuf,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let saved = SavedQTable::load_from_file(&args.input)?;
    let q_table = saved.into_table()?;

    write_csv(&q_table, &args.output)?;
    println!(
        "Exported {} states x 6 actions to {}",
        q_table.rows(),
        args.output.display()
    );

    Ok(())
}
