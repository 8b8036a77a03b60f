use crate::{
    config::ProjectLayout,
    error::Result,
    interfaces::ScanObserver,
    manifest::{read_descriptor, read_directory_stat, read_icon, read_manifest},
    types::{ProjectField, ProjectRecord},
};
use std::path::Path;
use tracing::debug;

/// Load one project directory into a merged record.
///
/// The descriptor is required and its failure is returned. Manifest, icon
/// and creation time are read concurrently afterwards; a failure in any of
/// them is reported to `observer` and leaves that field `None`.
pub async fn load_project(
    path: &Path,
    layout: &ProjectLayout,
    observer: &dyn ScanObserver,
) -> Result<ProjectRecord> {
    let descriptor = read_descriptor(path, layout).await?;
    debug!("Loaded descriptor for {:?} from {:?}", descriptor.name(), path);

    let (manifest, icon, stat) = tokio::join!(
        read_manifest(path, &descriptor),
        read_icon(path, layout),
        read_directory_stat(path),
    );

    let manifest = soft(manifest, path, ProjectField::Manifest, observer);
    let icon = soft(icon, path, ProjectField::Icon, observer);
    let created_at = soft(
        stat.map(|stat| stat.created),
        path,
        ProjectField::CreatedAt,
        observer,
    );

    Ok(ProjectRecord {
        descriptor,
        path: path.to_path_buf(),
        manifest,
        icon,
        created_at,
    })
}

fn soft<T>(
    result: Result<T>,
    path: &Path,
    field: ProjectField,
    observer: &dyn ScanObserver,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            observer.field_unavailable(path, field, &error);
            None
        }
    }
}
