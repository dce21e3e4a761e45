//! Maintenance subcommands. Each `run` returns `anyhow::Result` and leaves
//! exit-status handling to `main`.

pub mod audit;
pub mod clean;
pub mod list;
pub mod update;
