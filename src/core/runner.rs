use crate::config::{ContactPayload, SuiteConfig, SuiteSettings};
use crate::core::session::TestSession;
use crate::domain::model::{CheckOutcome, CheckResult, RunSummary};
use crate::domain::ports::Reporter;
use crate::utils::error::Result;

const HEALTH_ABORT_REASON: &str = "Health check failed - server may not be running";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECKS_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Process exit code for a finished (or aborted) run.
pub fn exit_code(all_passed: bool) -> i32 {
    if all_passed {
        EXIT_SUCCESS
    } else {
        EXIT_CHECKS_FAILED
    }
}

/// Drives the ordered sequence of endpoint checks against one server.
pub struct ConformanceRunner<R: Reporter> {
    pub(crate) session: TestSession,
    pub(crate) suite: SuiteSettings,
    pub(crate) contact: ContactPayload,
    reporter: R,
    aborted: bool,
}

impl<R: Reporter> ConformanceRunner<R> {
    pub fn new(config: &SuiteConfig, reporter: R) -> Result<Self> {
        Ok(Self {
            session: TestSession::from_config(config)?,
            suite: config.suite.clone(),
            contact: config.contact.clone(),
            reporter,
            aborted: false,
        })
    }

    /// Runs every check in order; true when all executed checks passed.
    ///
    /// A failed health probe aborts the run before any other request.
    pub async fn run_all(&mut self) -> bool {
        tracing::info!("Running conformance checks against {}", self.session.base_url());
        self.reporter.banner(self.session.base_url());

        if !self.check_health().await {
            tracing::error!("Health probe failed, aborting run");
            self.aborted = true;
            self.reporter.aborted(HEALTH_ABORT_REASON);
            return false;
        }

        let (services_ok, services) = self.check_list_services().await;

        self.check_categories().await;
        self.check_stats().await;
        self.check_featured().await;
        self.check_contact_form().await;

        if services_ok {
            match services.first().and_then(|service| service.get("id")) {
                Some(id) => {
                    let id = id.clone();
                    self.check_single_service(&id).await;
                }
                None => tracing::warn!("First service has no id, skipping single-service check"),
            }
        } else {
            tracing::info!("Skipping single-service check: no services were listed");
        }

        for term in self.suite.search_terms.clone() {
            self.check_search(&term).await;
        }
        for category in self.suite.categories.clone() {
            self.check_category_filter(&category).await;
        }

        let summary = self.summary();
        self.reporter.summary(&summary);
        tracing::info!(
            "Finished: {}/{} checks passed",
            summary.tests_passed,
            summary.tests_run
        );
        summary.all_passed()
    }

    pub(crate) fn log_test(&mut self, name: &str, outcome: CheckOutcome) -> bool {
        let result = CheckResult::new(name, outcome);
        if !result.success {
            tracing::debug!("{} failed: {}", result.name, result.detail);
        }
        let success = self.session.record(&result);
        self.reporter.check(&result);
        success
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            aborted: self.aborted,
            ..self.session.summary()
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }
}
