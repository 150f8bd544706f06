//! Inspect command - summarize a saved Q-table as a text heatmap

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    env::{ACTION_COUNT, ACTIONS},
    index::index_to_state,
    persistence::{DEFAULT_SAVE_PATH, SavedQTable},
    q_table::QTable,
};

/// Shade ramp from lowest to highest value
const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Parser, Debug)]
#[command(about = "Summarize a saved Q-table as a text heatmap")]
pub struct InspectArgs {
    /// Path to a saved Q-table
    #[arg(long, short = 'i', default_value = DEFAULT_SAVE_PATH)]
    pub input: PathBuf,

    /// Maximum number of state rows to print (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

fn shade(value: f64, min: f64, max: f64) -> char {
    let span = max - min;
    if span <= 0.0 {
        return SHADES[0];
    }
    let bucket = ((value - min) / span * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[bucket.min(SHADES.len() - 1)]
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = SavedQTable::load_from_file(&args.input)?;
    let q_table = saved.into_table()?;

    let min = q_table
        .values()
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let max = q_table
        .values()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    print_section("Q-table summary");
    print_kv("File", &args.input.display().to_string());
    print_kv("Disks", &q_table.num_disks().to_string());
    print_kv(
        "Shape",
        &format!("{} x {}", q_table.rows(), ACTION_COUNT),
    );
    print_kv("Min value", &format!("{min:.4}"));
    print_kv("Max value", &format!("{max:.4}"));

    print_subsection("State x action heatmap");
    let actions: Vec<String> = ACTIONS.iter().map(|action| action.to_string()).collect();
    println!("  {:>6}  {:12} {}  greedy", "index", "state", actions.join(" "));

    let rows = if args.limit == 0 {
        q_table.rows()
    } else {
        args.limit.min(q_table.rows())
    };
    for state in 0..rows {
        print_heatmap_row(&q_table, state, min, max);
    }
    if rows < q_table.rows() {
        println!("  ... {} more rows", q_table.rows() - rows);
    }

    Ok(())
}

fn print_heatmap_row(q_table: &QTable, state: usize, min: f64, max: f64) {
    let cells: Vec<String> = q_table
        .row(state)
        .iter()
        .map(|&value| format!("  {}  ", shade(value, min, max)))
        .collect();
    println!(
        "  {:>6}  {:12} {}  {}",
        state,
        index_to_state(state, q_table.num_disks()).to_string(),
        cells.join(" "),
        ACTIONS[q_table.greedy_action(state)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_spans_full_ramp() {
        assert_eq!(shade(0.0, 0.0, 1.0), SHADES[0]);
        assert_eq!(shade(1.0, 0.0, 1.0), SHADES[9]);
        assert_eq!(shade(0.5, 0.0, 1.0), SHADES[5]);
    }

    #[test]
    fn test_shade_handles_flat_table() {
        assert_eq!(shade(0.0, 0.0, 0.0), SHADES[0]);
    }
}
