//! Runtime configuration for the service and its collaborators.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_LINT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP evaluation service.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub lint: LintConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            lint: LintConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration for the external quality linter collaborator.
#[derive(Clone, Debug)]
pub struct LintConfig {
    /// Explicit linter executable; discovered on PATH when unset.
    pub binary: Option<PathBuf>,
    /// Upper bound on one linter invocation.
    pub timeout: Duration,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            binary: None,
            timeout: Duration::from_secs(DEFAULT_LINT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            lint: LintConfig::default(),
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
