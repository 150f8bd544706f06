//! Persistence for trained Q-tables
//!
//! The table is written as a single MessagePack file that can be loaded
//! independently of the trainer for inspection or export.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{env::ACTION_COUNT, index::state_count, q_table::QTable};

/// Default file name for the persisted table
pub const DEFAULT_SAVE_PATH: &str = "q_table.mpk";

/// Versioned on-disk envelope for a dense Q-table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub num_disks: usize,
    /// Expected number of state rows, `3^num_disks`
    pub rows: usize,
    /// Number of action columns
    pub actions: usize,
    values: Vec<f64>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        Self {
            version: Self::VERSION,
            num_disks: table.num_disks(),
            rows: table.rows(),
            actions: ACTION_COUNT,
            values: table.values().to_vec(),
        }
    }

    /// Validate the envelope and unpack it into a usable table
    pub fn into_table(self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported Q-table file version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        if self.rows != state_count(self.num_disks) || self.actions != ACTION_COUNT {
            return Err(anyhow!(
                "Q-table shape mismatch: {}x{} is not valid for {} disks",
                self.rows,
                self.actions,
                self.num_disks
            ));
        }
        if self.values.len() != self.rows * self.actions {
            return Err(anyhow!(
                "Q-table has {} values, expected {}",
                self.values.len(),
                self.rows * self.actions
            ));
        }
        Ok(QTable::from_parts(self.num_disks, self.values))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize Q-table")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize Q-table")
    }
}
