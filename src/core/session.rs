use crate::config::SuiteConfig;
use crate::domain::model::{CheckResult, RunSummary};
use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// What came back from the API: a decoded 200 body, or the status that stopped us.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Json(Value),
    Status(StatusCode),
}

/// Target address, shared HTTP client and the run counters.
pub struct TestSession {
    base_url: String,
    api_root: String,
    client: Client,
    tests_run: usize,
    tests_passed: usize,
}

impl TestSession {
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;

        Url::parse(base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_root = format!("{}{}", base_url, api_prefix.trim_end_matches('/'));

        Ok(Self {
            base_url,
            api_root,
            client,
            tests_run: 0,
            tests_passed: 0,
        })
    }

    pub fn from_config(config: &SuiteConfig) -> Result<Self> {
        Self::new(config.base_url(), config.api_prefix())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiReply> {
        let url = self.endpoint(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        Self::into_reply(response).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiReply> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        Self::into_reply(response).await
    }

    async fn into_reply(response: Response) -> Result<ApiReply> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            return Ok(ApiReply::Status(status));
        }
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(ApiReply::Json(body))
    }

    /// Counts one executed check; returns its success flag.
    pub fn record(&mut self, result: &CheckResult) -> bool {
        self.tests_run += 1;
        if result.success {
            self.tests_passed += 1;
        }
        result.success
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn tests_passed(&self) -> usize {
        self.tests_passed
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            tests_run: self.tests_run,
            tests_passed: self.tests_passed,
            aborted: false,
        }
    }
}
