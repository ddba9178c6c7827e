pub mod suite_config;

pub use suite_config::{ContactPayload, SuiteConfig, SuiteSettings, TargetConfig};

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "storefront-conformance")]
#[command(about = "Black-box conformance checks for the storefront catalog API")]
pub struct CliConfig {
    /// Base address of the server under test [default: http://localhost:5000]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path prefix of the API routes [default: /api]
    #[arg(long)]
    pub api_prefix: Option<String>,

    /// TOML suite file with target, search terms, categories and contact payload
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit diagnostics as JSON lines on stderr")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the suite file (if any) and applies command-line overrides on top.
    pub fn resolve(&self) -> Result<SuiteConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading suite file from: {}", path.display());
                SuiteConfig::from_file(path)?
            }
            None => SuiteConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.target.base_url = base_url.clone();
        }
        if let Some(api_prefix) = &self.api_prefix {
            config.target.api_prefix = api_prefix.clone();
        }

        Ok(config)
    }

    /// `resolve` followed by validation; what the binary runs with.
    pub fn load(&self) -> Result<SuiteConfig> {
        let config = self.resolve()?;
        config.validate()?;
        Ok(config)
    }
}
