use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::path::{Component, Path};
use tracing::info;
use workbench_core::manifest::read_manifest;

use crate::cli::{GlobalArgs, ScaffoldKind};
use crate::config::{build_workbench, command_template, ui_template};

pub async fn scaffold_command(
    global: &GlobalArgs,
    project: &Path,
    file: &Path,
    kind: ScaffoldKind,
    register: Option<&str>,
) -> Result<()> {
    if file.is_absolute() || file.components().any(|c| c == Component::ParentDir) {
        bail!("Scaffold target must stay inside the project: {}", file.display());
    }

    let workbench = build_workbench(global)?;

    let title = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");
    let contents = match kind {
        ScaffoldKind::Command => command_template(title),
        ScaffoldKind::Ui => ui_template(title),
    };

    let created = workbench
        .scaffold_source(project, file, &contents)
        .await
        .with_context(|| format!("Failed to create {}", file.display()))?;
    println!("✅ Created: {}", created.display());

    if let Some(identifier) = register {
        let descriptor = workbench.read_descriptor(project).await?;
        let mut manifest = read_manifest(project, &descriptor)
            .await
            .context("Cannot register the command: manifest is unreadable")?;

        register_command(&mut manifest, title, identifier, file)?;
        workbench
            .write_manifest(project, &descriptor, &manifest)
            .await?;
        info!("Registered {} in the manifest", identifier);
        println!("📝 Registered command: {}", identifier);
    }

    Ok(())
}

/// Append a command entry to the manifest's `commands` list
pub fn register_command(
    manifest: &mut Value,
    name: &str,
    identifier: &str,
    script: &Path,
) -> Result<()> {
    let Some(object) = manifest.as_object_mut() else {
        bail!("Manifest is not a JSON object");
    };

    let commands = object
        .entry("commands")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(commands) = commands.as_array_mut() else {
        bail!("Manifest `commands` is not a list");
    };

    if commands
        .iter()
        .any(|c| c.get("identifier").and_then(Value::as_str) == Some(identifier))
    {
        bail!("A command with identifier {identifier:?} already exists");
    }

    commands.push(json!({
        "name": name,
        "identifier": identifier,
        "script": script.to_string_lossy().replace('\\', "/"),
    }));
    Ok(())
}
