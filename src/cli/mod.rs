//! CLI infrastructure for the Hanoi Q-learning toolkit
//!
//! This module provides the command-line interface for training,
//! evaluating, inspecting, and exporting learned Q-tables.

pub mod commands;
pub mod output;
