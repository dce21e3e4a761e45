//! Command-line interface for the `embark` binary.
//!
//! This module organises the full CLI pipeline:
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`bootstrap`] | Chooses between the real process arguments and arguments embedded in the executable. |
//! | [`app`]       | `Cli` - clap definition of the global flags, positional packages and subcommands. |
//! | [`dispatch`]  | Runs the root action or the selected subcommand against an `AppConfig`. |
//! | [`commands`]  | `audit`, `clean`, `list` and `update`. |
//!
//! Typical call sequence: `bootstrap::effective_args` → `Cli::try_parse_versioned` → `dispatch::run`.

pub mod app;
pub mod bootstrap;
pub mod commands;
pub mod dispatch;
