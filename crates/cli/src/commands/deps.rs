use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::config::build_workbench;
use crate::display::print_dependencies;

pub async fn deps_command(global: &GlobalArgs, project: &Path, json: bool) -> Result<()> {
    let workbench = build_workbench(global)?;
    debug!("Resolving dependencies of {}", project.display());

    let descriptor = workbench
        .read_descriptor(project)
        .await
        .with_context(|| format!("No readable project at {}", project.display()))?;
    let dependencies = workbench
        .load_all_project_dependencies(project)
        .await
        .with_context(|| format!("Failed to resolve dependencies of {}", descriptor.name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dependencies)?);
    } else {
        print_dependencies(descriptor.name(), &dependencies);

        let declared = descriptor.dependency_queue().len();
        if declared > dependencies.len() {
            println!(
                "\nℹ️  {} declared dependencies are not installed",
                declared - dependencies.len()
            );
        }
    }

    Ok(())
}
