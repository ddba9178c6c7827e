//! Per-endpoint checks.
//!
//! Each `evaluate_*` function judges a decoded 200 body and is free of I/O;
//! the `check_*` methods on [`ConformanceRunner`] issue the request, fold
//! transport and status failures into the outcome, and record the result.

use crate::core::runner::ConformanceRunner;
use crate::core::session::ApiReply;
use crate::domain::model::{
    id_segment, missing_fields, record_mentions, services_payload, CheckOutcome, HEALTHY_STATUS,
    REQUIRED_HEALTH_FIELDS, REQUIRED_SERVICE_FIELDS, REQUIRED_STATS_FIELDS,
};
use crate::domain::ports::Reporter;
use crate::utils::error::Result;
use serde_json::Value;

fn classify(reply: Result<ApiReply>, evaluate: impl FnOnce(&Value) -> CheckOutcome) -> CheckOutcome {
    match reply {
        Ok(ApiReply::Json(body)) => evaluate(&body),
        Ok(ApiReply::Status(status)) => CheckOutcome::unexpected_status(status),
        Err(e) => CheckOutcome::error(e),
    }
}

fn display_value(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

fn missing_detail(missing: &[&str]) -> String {
    format!("Missing required fields: {}", missing.join(", "))
}

pub fn evaluate_health(body: &Value) -> CheckOutcome {
    let missing = missing_fields(body, &REQUIRED_HEALTH_FIELDS);
    let status = body.get("status").and_then(Value::as_str);
    let success = missing.is_empty() && status == Some(HEALTHY_STATUS);

    CheckOutcome::new(success, format!("Status: {}", status.unwrap_or("unknown")))
}

/// Judges the catalog listing and hands back its records when it passes.
pub fn evaluate_service_list(body: &Value) -> (CheckOutcome, Vec<Value>) {
    let services = match body.as_array() {
        Some(services) if !services.is_empty() => services,
        _ => return (CheckOutcome::fail("No services found or invalid format"), Vec::new()),
    };

    let missing = missing_fields(&services[0], &REQUIRED_SERVICE_FIELDS);
    if !missing.is_empty() {
        return (CheckOutcome::fail(missing_detail(&missing)), Vec::new());
    }

    (
        CheckOutcome::pass(format!("Found {} services", services.len())),
        services.clone(),
    )
}

pub fn evaluate_categories(body: &Value) -> CheckOutcome {
    match body.get("categories").and_then(Value::as_array) {
        Some(categories) => {
            let names: Vec<String> = categories
                .iter()
                .map(|c| display_value(Some(c), ""))
                .collect();
            CheckOutcome::pass(format!(
                "Found {} categories: {}",
                names.len(),
                names.join(", ")
            ))
        }
        None => CheckOutcome::fail("Missing 'categories' list"),
    }
}

pub fn evaluate_single_service(body: &Value, requested_id: &Value) -> CheckOutcome {
    let missing = missing_fields(body, &REQUIRED_SERVICE_FIELDS);
    let title = display_value(body.get("title"), "Unknown");

    if !missing.is_empty() {
        return CheckOutcome::fail(format!("Service: {} ({})", title, missing_detail(&missing)));
    }

    match body.get("id") {
        Some(id) if id == requested_id => CheckOutcome::pass(format!("Service: {}", title)),
        other => CheckOutcome::fail(format!(
            "Service: {} (id mismatch: expected {}, got {})",
            title,
            id_segment(requested_id),
            display_value(other, "none")
        )),
    }
}

/// Relevance of the hits is reported but does not decide the outcome.
pub fn evaluate_search(body: &Value, term: &str) -> CheckOutcome {
    let services = match services_payload(body).as_array() {
        Some(services) => services,
        None => return CheckOutcome::fail(format!("Response for '{}' is not a list", term)),
    };

    if services.is_empty() {
        return CheckOutcome::pass(format!("No results for '{}'", term));
    }

    let found_term = services.iter().any(|service| record_mentions(service, term));
    let mut detail = format!("Found {} results for '{}'", services.len(), term);
    if !found_term {
        tracing::warn!("Search for '{}' returned records that never mention it", term);
        detail.push_str(" (term not matched)");
    }
    CheckOutcome::pass(detail)
}

pub fn evaluate_category_filter(body: &Value, category: &str) -> CheckOutcome {
    let services = match services_payload(body).as_array() {
        Some(services) => services,
        None => return CheckOutcome::fail(format!("Response for '{}' is not a list", category)),
    };

    if services.is_empty() {
        return CheckOutcome::pass(format!("No services in '{}' category", category));
    }

    let wanted = category.to_lowercase();
    let outside = services
        .iter()
        .filter(|service| {
            service
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_lowercase()
                != wanted
        })
        .count();

    let detail = format!("Found {} services in '{}' category", services.len(), category);
    if outside == 0 {
        CheckOutcome::pass(detail)
    } else {
        CheckOutcome::fail(format!("{} ({} outside category)", detail, outside))
    }
}

pub fn evaluate_stats(body: &Value) -> CheckOutcome {
    let missing = missing_fields(body, &REQUIRED_STATS_FIELDS);
    if !missing.is_empty() {
        return CheckOutcome::fail(missing_detail(&missing));
    }

    CheckOutcome::pass(format!(
        "Total Products: {}, Categories: {}",
        display_value(body.get("totalProducts"), ""),
        display_value(body.get("categories"), "")
    ))
}

pub fn evaluate_contact(body: &Value) -> CheckOutcome {
    let accepted = body.get("success") == Some(&Value::Bool(true));
    let reference = body.get("reference");
    let has_reference = match reference {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    };

    CheckOutcome::new(
        accepted && has_reference,
        format!("Reference: {}", display_value(reference, "N/A")),
    )
}

pub fn evaluate_featured(body: &Value, badges: &[String]) -> CheckOutcome {
    let services = match body.as_array() {
        Some(services) if !services.is_empty() => services,
        Some(_) => return CheckOutcome::fail("No featured services found"),
        None => return CheckOutcome::fail("Response is not a list"),
    };

    let unexpected: Vec<String> = services
        .iter()
        .filter_map(|service| {
            let badge = service.get("badge").and_then(Value::as_str);
            match badge {
                Some(b) if badges.iter().any(|accepted| accepted == b) => None,
                _ => Some(display_value(service.get("badge"), "none")),
            }
        })
        .collect();

    let detail = format!("Found {} featured services", services.len());
    if unexpected.is_empty() {
        CheckOutcome::pass(detail)
    } else {
        CheckOutcome::fail(format!("{} (unexpected badges: {})", detail, unexpected.join(", ")))
    }
}

impl<R: Reporter> ConformanceRunner<R> {
    pub async fn check_health(&mut self) -> bool {
        let reply = self.session.get_json("/health", &[]).await;
        self.log_test("Health Check", classify(reply, evaluate_health))
    }

    /// Returns the listed records when the check passed, otherwise an empty list.
    pub async fn check_list_services(&mut self) -> (bool, Vec<Value>) {
        let mut records = Vec::new();
        let reply = self.session.get_json("/services", &[]).await;
        let outcome = classify(reply, |body| {
            let (outcome, services) = evaluate_service_list(body);
            records = services;
            outcome
        });
        let success = self.log_test("Get All Services", outcome);
        (success, records)
    }

    pub async fn check_categories(&mut self) -> bool {
        let reply = self.session.get_json("/categories", &[]).await;
        self.log_test("Get Categories", classify(reply, evaluate_categories))
    }

    pub async fn check_single_service(&mut self, id: &Value) -> bool {
        let path = format!("/services/{}", id_segment(id));
        let reply = self.session.get_json(&path, &[]).await;
        self.log_test(
            "Get Single Service",
            classify(reply, |body| evaluate_single_service(body, id)),
        )
    }

    pub async fn check_search(&mut self, term: &str) -> bool {
        let reply = self.session.get_json("/services", &[("search", term)]).await;
        self.log_test(
            &format!("Search Services ('{}')", term),
            classify(reply, |body| evaluate_search(body, term)),
        )
    }

    pub async fn check_category_filter(&mut self, category: &str) -> bool {
        let reply = self
            .session
            .get_json("/services", &[("category", category)])
            .await;
        self.log_test(
            &format!("Filter by Category ('{}')", category),
            classify(reply, |body| evaluate_category_filter(body, category)),
        )
    }

    pub async fn check_stats(&mut self) -> bool {
        let reply = self.session.get_json("/stats", &[]).await;
        self.log_test("Get Statistics", classify(reply, evaluate_stats))
    }

    pub async fn check_contact_form(&mut self) -> bool {
        let reply = self.session.post_json("/contact", &self.contact).await;
        self.log_test("Contact Form Submission", classify(reply, evaluate_contact))
    }

    pub async fn check_featured(&mut self) -> bool {
        let reply = self.session.get_json("/services/featured", &[]).await;
        let badges = &self.suite.featured_badges;
        let outcome = classify(reply, |body| evaluate_featured(body, badges));
        self.log_test("Get Featured Services", outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(id: &str, category: &str, badge: Option<&str>) -> Value {
        let mut record = json!({
            "id": id,
            "title": format!("{} Suite", category),
            "description": "Undetected since launch",
            "price": 1999,
            "imageUrl": "https://cdn.example.com/x.png",
            "category": category,
            "features": ["Silent aim", "Config cloud"]
        });
        if let Some(badge) = badge {
            record["badge"] = json!(badge);
        }
        record
    }

    fn badges() -> Vec<String> {
        ["Popular", "VIP", "Hot"].map(String::from).to_vec()
    }

    #[test]
    fn test_health_requires_all_fields_and_healthy_status() {
        let healthy = json!({"status": "healthy", "timestamp": "t", "uptime": 3.2, "memory": {}});
        assert_eq!(evaluate_health(&healthy), CheckOutcome::pass("Status: healthy"));

        let degraded = json!({"status": "degraded", "timestamp": "t", "uptime": 3.2, "memory": {}});
        assert!(!evaluate_health(&degraded).success);

        let partial = json!({"status": "healthy", "timestamp": "t", "uptime": 3.2});
        assert!(!evaluate_health(&partial).success);

        assert_eq!(evaluate_health(&json!([])), CheckOutcome::fail("Status: unknown"));
    }

    #[test]
    fn test_service_list() {
        let body = json!([service("1", "Aimbot", None), service("2", "ESP", None)]);
        let (outcome, records) = evaluate_service_list(&body);
        assert_eq!(outcome, CheckOutcome::pass("Found 2 services"));
        assert_eq!(records.len(), 2);

        let (outcome, records) = evaluate_service_list(&json!([]));
        assert!(!outcome.success);
        assert!(records.is_empty());

        let (outcome, records) = evaluate_service_list(&json!([{"id": "1", "title": "A"}]));
        assert!(!outcome.success);
        assert!(outcome.detail.contains("description"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_categories() {
        let outcome = evaluate_categories(&json!({"categories": ["Aimbot", "ESP"]}));
        assert_eq!(outcome, CheckOutcome::pass("Found 2 categories: Aimbot, ESP"));

        assert!(!evaluate_categories(&json!({"categories": "Aimbot"})).success);
        assert!(!evaluate_categories(&json!(["Aimbot"])).success);
    }

    #[test]
    fn test_single_service_matches_requested_id() {
        let record = json!({
            "id": "1", "title": "A", "description": "d", "price": 1,
            "imageUrl": "u", "category": "Aimbot", "features": ["x"]
        });
        assert_eq!(
            evaluate_single_service(&record, &json!("1")),
            CheckOutcome::pass("Service: A")
        );

        let outcome = evaluate_single_service(&record, &json!("2"));
        assert!(!outcome.success);
        assert!(outcome.detail.contains("id mismatch: expected 2, got 1"));

        // Numeric and string ids are distinct values.
        assert!(!evaluate_single_service(&record, &json!(1)).success);
    }

    #[test]
    fn test_search_relevance_does_not_gate() {
        let hit = json!({"services": [service("1", "Aimbot", None)], "total": 1, "hasMore": false});
        assert_eq!(
            evaluate_search(&hit, "aimbot"),
            CheckOutcome::pass("Found 1 results for 'aimbot'")
        );

        let miss = json!([service("1", "Aimbot", None)]);
        let outcome = evaluate_search(&miss, "mobile");
        assert!(outcome.success);
        assert!(outcome.detail.ends_with("(term not matched)"));

        assert_eq!(
            evaluate_search(&json!({"services": []}), "ESP"),
            CheckOutcome::pass("No results for 'ESP'")
        );
        assert!(!evaluate_search(&json!({"total": 0}), "ESP").success);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let body = json!({"services": [service("1", "aimbot", None)]});
        assert!(evaluate_category_filter(&body, "Aimbot").success);

        let mixed = json!([service("1", "Aimbot", None), service("2", "ESP", None)]);
        let outcome = evaluate_category_filter(&mixed, "Aimbot");
        assert!(!outcome.success);
        assert!(outcome.detail.contains("1 outside category"));

        assert!(evaluate_category_filter(&json!([]), "Premium").success);
    }

    #[test]
    fn test_stats() {
        let body = json!({
            "totalProducts": 12,
            "categories": 4,
            "averagePrice": 2499.5,
            "priceRange": {"min": 999, "max": 4999},
            "badgeDistribution": {"Popular": 3, "None": 9}
        });
        assert_eq!(
            evaluate_stats(&body),
            CheckOutcome::pass("Total Products: 12, Categories: 4")
        );

        let outcome = evaluate_stats(&json!({"totalProducts": 12}));
        assert!(!outcome.success);
        assert!(outcome.detail.contains("badgeDistribution"));
    }

    #[test]
    fn test_contact_requires_success_and_reference() {
        let ok = json!({"success": true, "message": "Thanks", "reference": "REF-1700000000"});
        assert_eq!(evaluate_contact(&ok), CheckOutcome::pass("Reference: REF-1700000000"));

        assert!(!evaluate_contact(&json!({"success": true})).success);
        assert!(!evaluate_contact(&json!({"success": true, "reference": ""})).success);
        assert!(!evaluate_contact(&json!({"reference": "REF-1"})).success);
        assert!(!evaluate_contact(&json!({"success": "true", "reference": "REF-1"})).success);
        assert!(!evaluate_contact(&json!({"success": true, "reference": false})).success);
        assert!(!evaluate_contact(&json!({"success": true, "reference": {}})).success);
        assert!(evaluate_contact(&json!({"success": true, "reference": 1760860800000u64})).success);
    }

    #[test]
    fn test_featured_badges() {
        let popular = json!([service("1", "Aimbot", Some("Popular"))]);
        assert_eq!(
            evaluate_featured(&popular, &badges()),
            CheckOutcome::pass("Found 1 featured services")
        );

        let other = json!([service("1", "Aimbot", Some("Other"))]);
        let outcome = evaluate_featured(&other, &badges());
        assert!(!outcome.success);
        assert!(outcome.detail.contains("unexpected badges: Other"));

        let unbadged = json!([service("1", "Aimbot", None)]);
        assert!(!evaluate_featured(&unbadged, &badges()).success);

        assert!(!evaluate_featured(&json!([]), &badges()).success);
    }
}
