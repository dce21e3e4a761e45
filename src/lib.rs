// embark - self-contained package launcher

pub mod arch;
pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod mode;
pub mod orchestrator;
pub mod platform;
pub mod registry;

pub use arch::Arch;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use mode::Mode;
pub use orchestrator::{OrchestrationResult, Outcome};
