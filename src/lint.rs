//! External quality linter collaborator.
//!
//! The one impure boundary of the engine: pylint is invoked
//! out-of-process over a call-unique temporary file, bounded by a
//! timeout, and its textual report is parsed for the fixed
//! `rated at X/10` score line. Every failure mode, including a missing
//! executable, a hung process, or an unparseable report, degrades to an
//! absent assessment; the analysis itself never fails because of this
//! collaborator.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::config::LintConfig;
use crate::core::QualityAssessment;

static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rated at ([-\d.]+)/10").expect("score pattern is valid"));

pub struct PylintRunner {
    binary: Option<PathBuf>,
    timeout: Duration,
}

impl PylintRunner {
    /// Resolve the linter executable once at startup. A missing binary
    /// disables quality scoring for the process lifetime.
    pub fn from_config(config: &LintConfig) -> Self {
        let binary = config
            .binary
            .clone()
            .or_else(|| which::which("pylint").ok());
        if binary.is_none() {
            tracing::warn!("pylint not found; external quality scoring disabled");
        }
        Self {
            binary,
            timeout: config.timeout,
        }
    }

    /// A runner that never produces an assessment. Used where
    /// deterministic reports are required regardless of the host.
    pub fn disabled() -> Self {
        Self {
            binary: None,
            timeout: Duration::from_secs(0),
        }
    }

    /// Score a Python fragment, or `None` when the collaborator is
    /// unavailable in any way.
    pub async fn assess(&self, code: &str) -> Option<QualityAssessment> {
        let binary = self.binary.as_deref()?;
        match self.run(binary, code).await {
            Ok(assessment) => Some(assessment),
            Err(err) => {
                tracing::warn!(error = %err, "quality linter unavailable");
                None
            }
        }
    }

    async fn run(&self, binary: &Path, code: &str) -> Result<QualityAssessment> {
        let scratch = write_fragment(code)?;

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(binary)
                .arg(scratch.path())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .context("linter timed out")?
        .context("failed to run linter")?;

        // The scratch file would also be removed on drop; closing
        // explicitly lets a cleanup failure be logged.
        if let Err(err) = scratch.close() {
            tracing::warn!(error = %err, "failed to remove linter scratch file");
        }

        let report = String::from_utf8_lossy(&output.stdout).into_owned();
        let score = parse_score(&report);
        Ok(QualityAssessment { score, report })
    }
}

/// Write the fragment to a call-unique temporary `.py` file so parallel
/// analyses never collide.
fn write_fragment(code: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("codegauge-")
        .suffix(".py")
        .tempfile()
        .context("failed to create linter scratch file")?;
    file.write_all(code.as_bytes())
        .context("failed to write linter scratch file")?;
    file.flush()
        .context("failed to flush linter scratch file")?;
    Ok(file)
}

fn parse_score(report: &str) -> Option<f64> {
    SCORE_PATTERN
        .captures(report)
        .and_then(|captures| captures.get(1))
        .and_then(|matched| matched.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_fixed_score_line() {
        let report = "************* Module scratch\n\
                      Your code has been rated at 7.50/10 (previous run: 7.00/10)\n";
        assert_eq!(parse_score(report), Some(7.5));
    }

    #[test]
    fn parses_negative_scores() {
        assert_eq!(parse_score("rated at -2.50/10"), Some(-2.5));
    }

    #[test]
    fn missing_score_line_yields_none() {
        assert_eq!(parse_score("fatal error before rating"), None);
    }

    #[tokio::test]
    async fn disabled_runner_never_assesses() {
        let runner = PylintRunner::disabled();
        assert!(runner.assess("x = 1\n").await.is_none());
    }
}
