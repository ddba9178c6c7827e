use crate::utils::error::{ConformanceError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ConformanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConformanceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ConformanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// An API prefix is either empty or an absolute path without a query.
pub fn validate_api_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }

    let reason = if !prefix.starts_with('/') {
        "Prefix must start with '/'"
    } else if prefix.contains('?') || prefix.contains('#') {
        "Prefix cannot contain a query or fragment"
    } else {
        return Ok(());
    };

    Err(ConformanceError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: prefix.to_string(),
        reason: reason.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConformanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(ConformanceError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    for (index, value) in values.iter().enumerate() {
        validate_non_empty_string(&format!("{}[{}]", field_name, index), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("target.base_url", "http://localhost:5000").is_ok());
        assert!(validate_url("target.base_url", "https://shop.example.com").is_ok());
        assert!(validate_url("target.base_url", "").is_err());
        assert!(validate_url("target.base_url", "localhost:5000/api").is_err());
        assert!(validate_url("target.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_api_prefix() {
        assert!(validate_api_prefix("target.api_prefix", "/api").is_ok());
        assert!(validate_api_prefix("target.api_prefix", "").is_ok());
        assert!(validate_api_prefix("target.api_prefix", "api").is_err());
        assert!(validate_api_prefix("target.api_prefix", "/api?x=1").is_err());
    }

    #[test]
    fn test_validate_non_empty_list() {
        let badges = vec!["Popular".to_string(), "VIP".to_string()];
        assert!(validate_non_empty_list("suite.featured_badges", &badges).is_ok());
        assert!(validate_non_empty_list("suite.featured_badges", &[]).is_err());

        let blank = vec!["Hot".to_string(), "  ".to_string()];
        match validate_non_empty_list("suite.featured_badges", &blank) {
            Err(ConformanceError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "suite.featured_badges[1]");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
