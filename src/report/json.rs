use super::types::RunReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the report as pretty JSON, creating the parent directory if needed
pub fn write(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn read(path: &Path) -> Result<RunReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("Not a run report: {}", path.display()))?;
    Ok(report)
}
