use crate::domain::model::{CheckResult, RunSummary};
use crate::domain::ports::Reporter;
use chrono::{SecondsFormat, Utc};
use std::io::{self, Stdout, Write};

const RULE_WIDTH: usize = 50;

/// Line-oriented progress log written to stdout (or any writer).
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleReporter<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write progress line: {}", e);
        }
    }

    fn rule(&mut self) {
        self.line(&"=".repeat(RULE_WIDTH));
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn banner(&mut self, base_url: &str) {
        self.line("🚀 Starting Storefront API Tests");
        self.line(&format!("Testing against: {}", base_url));
        self.line(&format!(
            "Started at: {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        self.rule();
    }

    fn check(&mut self, result: &CheckResult) {
        let line = if result.success {
            format!("✅ {} - PASSED {}", result.name, result.detail)
        } else {
            format!("❌ {} - FAILED {}", result.name, result.detail)
        };
        self.line(&line);
    }

    fn aborted(&mut self, reason: &str) {
        self.line(&format!("❌ {}", reason));
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.rule();
        self.line(&format!(
            "📊 Test Results: {}/{} tests passed",
            summary.tests_passed, summary.tests_run
        ));

        if summary.all_passed() {
            self.line("🎉 All tests passed! API is working correctly.");
        } else {
            self.line(&format!(
                "⚠️  {} test(s) failed. Check the details above.",
                summary.tests_failed()
            ));
        }
        if let Err(e) = self.out.flush() {
            tracing::warn!("Failed to flush progress log: {}", e);
        }
    }
}
