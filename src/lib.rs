//! Tabular Q-learning for the Tower of Hanoi puzzle
//!
//! This crate provides:
//! - A Gym-style Tower of Hanoi environment with move legality and rewards
//! - A Q-learning trainer with epsilon-greedy exploration and decay
//! - Dense Q-table persistence, inspection, and CSV export
//! - A CLI (`hanoi`) wrapping training, evaluation, and export

pub mod cli;
pub mod env;
pub mod error;
pub mod export;
pub mod index;
pub mod observer;
pub mod persistence;
pub mod q_table;
pub mod render;
pub mod trainer;

pub use env::{ACTION_COUNT, ACTIONS, Action, HanoiEnv, PuzzleState, Step};
pub use error::{Error, Result};
pub use index::{index_to_state, state_count, state_to_index};
pub use persistence::SavedQTable;
pub use q_table::QTable;
pub use trainer::{
    EpisodeStats, Rollout, Trainer, TrainerConfig, TrainingSummary, greedy_rollout,
};
