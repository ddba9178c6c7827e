use crate::utils::error::{ConformanceError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Everything a conformance run needs: where to point and what to ask for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub target: TargetConfig,
    pub suite: SuiteSettings,
    pub contact: ContactPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub base_url: String,
    pub api_prefix: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteSettings {
    pub search_terms: Vec<String>,
    pub categories: Vec<String>,
    pub featured_badges: Vec<String>,
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            search_terms: ["aimbot", "ESP", "mobile"].map(String::from).to_vec(),
            categories: ["Aimbot", "ESP", "Mobile", "Premium"].map(String::from).to_vec(),
            featured_badges: ["Popular", "VIP", "Hot"].map(String::from).to_vec(),
        }
    }
}

/// Body posted to the contact endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub service: String,
}

impl Default for ContactPayload {
    fn default() -> Self {
        Self {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            message: "This is a test message".to_string(),
            service: "Test Service".to_string(),
        }
    }
}

impl SuiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConformanceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_BASE_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn base_url(&self) -> &str {
        &self.target.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.target.api_prefix
    }
}

impl Validate for SuiteConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("target.base_url", &self.target.base_url)?;
        validation::validate_api_prefix("target.api_prefix", &self.target.api_prefix)?;
        validation::validate_non_empty_list("suite.featured_badges", &self.suite.featured_badges)?;

        for (index, term) in self.suite.search_terms.iter().enumerate() {
            validation::validate_non_empty_string(&format!("suite.search_terms[{}]", index), term)?;
        }
        for (index, category) in self.suite.categories.iter().enumerate() {
            validation::validate_non_empty_string(&format!("suite.categories[{}]", index), category)?;
        }

        validation::validate_non_empty_string("contact.name", &self.contact.name)?;
        validation::validate_non_empty_string("contact.email", &self.contact.email)?;
        validation::validate_non_empty_string("contact.message", &self.contact.message)?;
        Ok(())
    }
}
