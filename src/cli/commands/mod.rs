//! CLI subcommand implementations

pub mod evaluate;
pub mod export;
pub mod inspect;
pub mod train;
