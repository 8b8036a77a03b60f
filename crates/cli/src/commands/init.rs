use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::info;
use workbench_core::Descriptor;

use crate::cli::GlobalArgs;
use crate::config::{build_workbench, manifest_template};

pub async fn init_command(
    global: &GlobalArgs,
    dir: &Path,
    name: Option<&str>,
    manifest: &str,
    force: bool,
) -> Result<()> {
    let workbench = build_workbench(global)?;

    let name = match name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .context("Cannot derive a project name from the directory; pass --name")?,
    };

    let manifest_rel = Path::new(manifest);
    if manifest.is_empty() || manifest_rel.is_absolute() {
        bail!("Manifest path must be relative to the project: {manifest}");
    }

    let descriptor_path = workbench.config().layout.descriptor_path(dir);
    if descriptor_path.exists() && !force {
        println!("❌ Descriptor already exists at: {}", descriptor_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    println!("🚀 Initializing plugin project in: {}", dir.display());

    let manifest_path = dir.join(manifest_rel);
    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut descriptor = Descriptor::new(&name);
    descriptor.set_version("0.1.0");
    descriptor.set_manifest_path(manifest);

    workbench
        .write_descriptor(dir, &descriptor)
        .await
        .with_context(|| format!("Failed to write {}", descriptor_path.display()))?;
    info!("Created descriptor: {}", descriptor_path.display());

    if manifest_path.exists() && !force {
        info!("Keeping existing manifest: {}", manifest_path.display());
    } else {
        workbench
            .write_manifest(dir, &descriptor, &manifest_template(&name))
            .await
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
        info!("Created manifest: {}", manifest_path.display());
    }

    println!("\n✅ Initialization complete!");
    println!("   • Descriptor: {}", descriptor_path.display());
    println!("   • Manifest:   {}", manifest_path.display());

    Ok(())
}
