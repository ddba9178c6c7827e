use crate::domain::model::{CheckResult, RunSummary};

/// Receives the progress of a conformance run.
pub trait Reporter {
    fn banner(&mut self, base_url: &str);
    fn check(&mut self, result: &CheckResult);
    fn aborted(&mut self, reason: &str);
    fn summary(&mut self, summary: &RunSummary);
}
