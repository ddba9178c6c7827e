pub mod checks;
pub mod runner;
pub mod session;

pub use crate::domain::model::{CheckOutcome, CheckResult, RunSummary};
pub use crate::domain::ports::Reporter;
pub use crate::utils::error::Result;
