//! CLI subcommand implementations.

pub mod encode;
pub mod patch;
pub mod replay;
