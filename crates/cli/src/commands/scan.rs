use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::config::build_workbench;
use crate::display::{print_project, print_skipped};

pub async fn scan_command(
    global: &GlobalArgs,
    paths: &[PathBuf],
    children: bool,
    json: bool,
    diagnostics: bool,
) -> Result<()> {
    let workbench = build_workbench(global)?;

    let targets = if children {
        let mut targets = Vec::new();
        for parent in paths {
            targets.extend(child_directories(parent)?);
        }
        targets
    } else {
        paths.to_vec()
    };
    debug!("Scanning {} directories", targets.len());

    let report = workbench.scan(&targets).await?;

    if json {
        let output = if diagnostics {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string_pretty(&report.projects)?
        };
        println!("{output}");
        return Ok(());
    }

    println!("🔍 Scanned {} director(ies)", targets.len());
    println!("{}", "=".repeat(60));

    if report.projects.is_empty() {
        println!("\n❌ No projects found.");
    } else {
        println!("\n✅ Found {} project(s):\n", report.projects.len());
        for record in report.projects.values() {
            print_project(record);
            println!();
        }
    }

    if diagnostics {
        print_skipped(&report.skipped);
    }

    Ok(())
}

/// Immediate subdirectories of `parent`, sorted, hidden ones excluded
pub fn child_directories(parent: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(parent)
        .with_context(|| format!("Failed to read directory {}", parent.display()))?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    Ok(dirs)
}
