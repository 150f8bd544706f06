//! CSV export of trained Q-tables
//!
//! Produces one row per state with all six action values, for plotting
//! heatmaps in external tools.

use std::path::Path;

use crate::{env::ACTION_COUNT, error::Result, index::index_to_state, q_table::QTable};

/// Write the full state-action table as CSV
///
/// Columns `q_0..q_5` follow the fixed action-index contract.
pub fn write_csv<P: AsRef<Path>>(table: &QTable, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["state_index".to_string(), "state".to_string()];
    header.extend((0..ACTION_COUNT).map(|action| format!("q_{action}")));
    writer.write_record(&header)?;

    for state in 0..table.rows() {
        let mut record = vec![
            state.to_string(),
            index_to_state(state, table.num_disks()).to_string(),
        ];
        record.extend(table.row(state).iter().map(|value| format!("{value:.6}")));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
