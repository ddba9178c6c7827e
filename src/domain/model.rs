use serde_json::Value;

/// Fields every service record must carry.
pub const REQUIRED_SERVICE_FIELDS: [&str; 7] = [
    "id",
    "title",
    "description",
    "price",
    "imageUrl",
    "category",
    "features",
];

pub const REQUIRED_HEALTH_FIELDS: [&str; 4] = ["status", "timestamp", "uptime", "memory"];

pub const REQUIRED_STATS_FIELDS: [&str; 5] = [
    "totalProducts",
    "categories",
    "averagePrice",
    "priceRange",
    "badgeDistribution",
];

pub const HEALTHY_STATUS: &str = "healthy";

/// Success flag and detail computed by a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub success: bool,
    pub detail: String,
}

impl CheckOutcome {
    pub fn new(success: bool, detail: impl Into<String>) -> Self {
        Self {
            success,
            detail: detail.into(),
        }
    }

    pub fn pass(detail: impl Into<String>) -> Self {
        Self::new(true, detail)
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self::new(false, detail)
    }

    pub fn unexpected_status(status: reqwest::StatusCode) -> Self {
        Self::fail(format!("Status Code: {}", status.as_u16()))
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::fail(format!("Error: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            name: name.into(),
            success: outcome.success,
            detail: outcome.detail,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tests_run: usize,
    pub tests_passed: usize,
    pub aborted: bool,
}

impl RunSummary {
    pub fn tests_failed(&self) -> usize {
        self.tests_run - self.tests_passed
    }

    pub fn all_passed(&self) -> bool {
        !self.aborted && self.tests_passed == self.tests_run
    }
}

/// Names of the fields in `required` that `body` does not carry.
///
/// A body that is not a JSON object is missing every field.
pub fn missing_fields<'a>(body: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| body.get(*field).is_none())
        .collect()
}

/// Unwraps the `{"services": [...]}` envelope the catalog uses for filtered queries.
pub fn services_payload(body: &Value) -> &Value {
    body.get("services").unwrap_or(body)
}

/// Renders an identifier the way it appears in a URL path segment.
pub fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a service record mentions `term` in any searchable field.
pub fn record_mentions(record: &Value, term: &str) -> bool {
    let needle = term.to_lowercase();
    let text_matches = |field: &str| {
        record
            .get(field)
            .and_then(Value::as_str)
            .map(|s| s.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    text_matches("title")
        || text_matches("description")
        || text_matches("category")
        || record
            .get("features")
            .and_then(Value::as_array)
            .map(|features| {
                features
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|f| f.to_lowercase().contains(&needle))
            })
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields() {
        let body = json!({"status": "healthy", "uptime": 12.5});
        assert_eq!(
            missing_fields(&body, &REQUIRED_HEALTH_FIELDS),
            vec!["timestamp", "memory"]
        );
        assert_eq!(missing_fields(&json!([1, 2]), &["status"]), vec!["status"]);
    }

    #[test]
    fn test_services_payload_unwraps_envelope() {
        let wrapped = json!({"services": [{"id": "1"}], "total": 1, "hasMore": false});
        assert_eq!(services_payload(&wrapped), &json!([{"id": "1"}]));

        let bare = json!([{"id": "2"}]);
        assert_eq!(services_payload(&bare), &bare);
    }

    #[test]
    fn test_id_segment() {
        assert_eq!(id_segment(&json!("abc-1")), "abc-1");
        assert_eq!(id_segment(&json!(42)), "42");
    }

    #[test]
    fn test_record_mentions() {
        let record = json!({
            "title": "Rage Aimbot",
            "description": "Undetected",
            "category": "Aimbot",
            "features": ["Wallhack ESP", "Triggerbot"]
        });
        assert!(record_mentions(&record, "aimbot"));
        assert!(record_mentions(&record, "esp"));
        assert!(!record_mentions(&record, "mobile"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            tests_run: 5,
            tests_passed: 4,
            aborted: false,
        };
        assert_eq!(summary.tests_failed(), 1);
        assert!(!summary.all_passed());
        assert!(RunSummary::default().all_passed());
    }
}
