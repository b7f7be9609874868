//! Client configuration via `dsadmin.toml` or the environment
//!
//! ```toml
//! project = "my-project"
//! endpoint = "http://localhost:8081"
//! timeout_ms = 10000
//!
//! [pager]
//! max_calls = 1000
//! ```
//!
//! [`ClientConfig::from_env`] follows the emulator conventions:
//! `DATASTORE_PROJECT_ID` names the project and `DATASTORE_EMULATOR_HOST`
//! (`host:port`) the endpoint.

use crate::error::{Error, Result};
use crate::pager::PagerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "dsadmin.toml";

/// Environment variable naming the project.
pub const ENV_PROJECT: &str = "DATASTORE_PROJECT_ID";

/// Environment variable naming the emulator `host:port`.
pub const ENV_EMULATOR_HOST: &str = "DATASTORE_EMULATOR_HOST";

const DEFAULT_EMULATOR_HOST: &str = "localhost:8081";

/// Settings for connecting to a datastore endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project id; required
    #[serde(default)]
    pub project: String,
    /// Base URL of the REST API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Pager settings
    #[serde(default)]
    pub pager: PagerConfig,
}

fn default_endpoint() -> String {
    format!("http://{}", DEFAULT_EMULATOR_HOST)
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            pager: PagerConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config for `project` with every other setting at its default
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# dsadmin client configuration
#
# Project id (required). Falls back to DATASTORE_PROJECT_ID when loaded from the environment.
project = ""

# REST endpoint of the datastore or its emulator.
endpoint = "http://localhost:8081"

# Per-request timeout in milliseconds.
timeout_ms = 10000

[pager]
# Maximum runQuery calls one page fetch may issue.
max_calls = 1000
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid TOML for this struct.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Build config from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build config from a variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let host = var(ENV_EMULATOR_HOST).unwrap_or_else(|| DEFAULT_EMULATOR_HOST.to_string());
        Self {
            project: var(ENV_PROJECT).unwrap_or_default(),
            endpoint: host_to_endpoint(&host),
            ..Self::default()
        }
    }

    /// Check that the config is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a missing project or endpoint, or a zero
    /// call budget.
    pub fn validate(&self) -> Result<()> {
        if self.project.is_empty() {
            return Err(Error::config("missing project setting"));
        }
        if self.endpoint.is_empty() {
            return Err(Error::config("missing endpoint setting"));
        }
        if self.pager.max_calls == 0 {
            return Err(Error::config("pager.max_calls must be at least 1"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// `host:port` becomes `http://host:port`; full URLs pass through
fn host_to_endpoint(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", host)
    }
}
