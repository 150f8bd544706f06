//! Dense Q-table over the full state-action space
//!
//! Unlike a sparse map keyed by visited states, the table is allocated
//! for all `3^num_disks` states up front, matching the fixed shape of the
//! persisted artifact.

use serde::{Deserialize, Serialize};

use crate::{env::ACTION_COUNT, index::state_count};

/// Tabular action-value estimates, `3^num_disks` rows by six actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    num_disks: usize,
    /// Row-major values, `rows() * ACTION_COUNT` entries
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized table for the given puzzle size
    pub fn zeros(num_disks: usize) -> Self {
        Self {
            num_disks,
            values: vec![0.0; state_count(num_disks) * ACTION_COUNT],
        }
    }

    pub(crate) fn from_parts(num_disks: usize, values: Vec<f64>) -> Self {
        Self { num_disks, values }
    }

    pub fn num_disks(&self) -> usize {
        self.num_disks
    }

    /// Number of state rows
    pub fn rows(&self) -> usize {
        state_count(self.num_disks)
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[state * ACTION_COUNT + action]
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        self.values[state * ACTION_COUNT + action] = value;
    }

    /// All action values for one state
    pub fn row(&self, state: usize) -> &[f64] {
        &self.values[state * ACTION_COUNT..(state + 1) * ACTION_COUNT]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Maximum action value in a state
    pub fn max_value(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state; ties break toward the lowest index
    pub fn greedy_action(&self, state: usize) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// One-step Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        alpha: f64,
        gamma: f64,
    ) {
        let current = self.get(state, action);
        let target = reward + gamma * self.max_value(next_state);
        self.set(state, action, current + alpha * (target - current));
    }

    /// Terminal update using only the immediate reward, no bootstrap term
    ///
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    pub fn terminal_update(&mut self, state: usize, action: usize, reward: f64, alpha: f64) {
        let current = self.get(state, action);
        self.set(state, action, current + alpha * (reward - current));
    }
}
