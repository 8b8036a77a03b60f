use crate::{
    config::ProjectLayout,
    error::Result,
    manifest::read_json,
    types::{Dependency, DependencyLocation},
};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

/// Read the installed descriptor of one dependency.
///
/// Returns `Ok(None)` when the dependency is declared but not installed.
/// Any other read or parse failure is an error.
pub async fn load_dependency_metadata(
    project: &Path,
    name: &str,
    location: DependencyLocation,
    layout: &ProjectLayout,
) -> Result<Option<Dependency>> {
    if !is_safe_name(name) {
        warn!("Ignoring dependency {:?} in {:?}: not a package name", name, project);
        return Ok(None);
    }

    let path = layout.installed_descriptor_path(project, name);

    let installed: Map<String, Value> = match read_json(&path).await {
        Ok(installed) => installed,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(Some(Dependency::from_installed(name, &installed, location)))
}

/// Names that stay inside the installed packages directory
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && name
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
