use crate::{
    config::ProjectLayout,
    error::{Error, Result},
    types::{Descriptor, FileStat},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Read and parse a JSON file
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = tokio::fs::read(path).await.map_err(|e| Error::io(path, e))?;
    serde_json::from_slice(&contents).map_err(|e| Error::parse(path, e))
}

/// Filesystem metadata for `path`; fails when the platform cannot report a
/// creation time.
pub async fn read_directory_stat(path: &Path) -> Result<FileStat> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let created = metadata.created().map_err(|e| Error::io(path, e))?;

    Ok(FileStat {
        created,
        modified: metadata.modified().ok(),
        is_dir: metadata.is_dir(),
    })
}

pub async fn read_descriptor(project: &Path, layout: &ProjectLayout) -> Result<Descriptor> {
    read_json(&layout.descriptor_path(project)).await
}

/// The manifest's location comes from the descriptor, so this needs a
/// descriptor that was already read.
pub async fn read_manifest(project: &Path, descriptor: &Descriptor) -> Result<Value> {
    let relative = descriptor
        .manifest_path()
        .ok_or_else(|| Error::MissingManifestPath(project.to_path_buf()))?;
    read_json(&project.join(relative)).await
}

/// Icon bytes as standard base64 text
pub async fn read_icon(project: &Path, layout: &ProjectLayout) -> Result<String> {
    let path = layout.icon_path(project);
    let bytes = tokio::fs::read(&path).await.map_err(|e| Error::io(&path, e))?;

    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png && !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(Error::InvalidIcon(path));
    }

    Ok(STANDARD.encode(bytes))
}
