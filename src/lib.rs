pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{runner::ConformanceRunner, session::TestSession};
pub use adapters::console::ConsoleReporter;
pub use config::SuiteConfig;
pub use utils::error::{ConformanceError, Result};
