use colored::Colorize;
use std::path::Path;
use thiserror::Error;

use super::config::RunConfig;
use crate::driver::traits::DriverError;

/// Faults that stop a run before the first scenario
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Target URL must start with http:// or https://: {0}")]
    InvalidTargetUrl(String),

    #[error("Cannot prepare output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Verify the run can start: a usable target URL and writable artifact locations
pub fn check_prerequisites(config: &RunConfig) -> Result<(), SetupError> {
    let url = config.target_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SetupError::InvalidTargetUrl(url.to_string()));
    }

    let mut artifacts = vec![config.report_path.as_path(), config.screenshot_path.as_path()];
    if let Some(ref junit) = config.junit_path {
        artifacts.push(junit.as_path());
    }
    for artifact in artifacts {
        ensure_parent_dir(artifact)?;
    }

    println!("{} All prerequisites are met", "✓".green());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), SetupError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|source| SetupError::OutputDir {
            path: parent.display().to_string(),
            source,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_target() {
        let config = RunConfig {
            target_url: "file:///tmp/login.html".to_string(),
            ..RunConfig::default()
        };
        let err = check_prerequisites(&config).unwrap_err();
        assert!(matches!(err, SetupError::InvalidTargetUrl(_)));
    }

    #[test]
    fn test_creates_artifact_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            target_url: "https://example.com/login".to_string(),
            report_path: dir.path().join("reports/test_results.json"),
            screenshot_path: dir.path().join("shots/evidence.png"),
            ..RunConfig::default()
        };
        check_prerequisites(&config).unwrap();
        assert!(dir.path().join("reports").is_dir());
        assert!(dir.path().join("shots").is_dir());
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let config = RunConfig {
            target_url: "https://example.com/login".to_string(),
            report_path: blocker.join("test_results.json"),
            ..RunConfig::default()
        };
        let err = check_prerequisites(&config).unwrap_err();
        assert!(matches!(err, SetupError::OutputDir { .. }));
    }
}
