//! CLI commands

pub mod generate;
pub mod resolve;
