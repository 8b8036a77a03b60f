use crate::{
    config::{ProjectLayout, WorkbenchConfig},
    error::{Error, Result},
    types::Descriptor,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write a sibling temp file and rename it over the target
    pub atomic: bool,
}

impl From<&WorkbenchConfig> for WriteOptions {
    fn from(config: &WorkbenchConfig) -> Self {
        Self {
            atomic: config.atomic_writes,
        }
    }
}

/// Pretty-print `value` with two-space indentation and a trailing newline
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    Ok(contents)
}

pub async fn write_descriptor(
    project: &Path,
    layout: &ProjectLayout,
    descriptor: &Descriptor,
    options: WriteOptions,
) -> Result<()> {
    let path = layout.descriptor_path(project);
    write_file(&path, to_pretty_json(descriptor)?.as_bytes(), options).await
}

/// Overwrite the manifest the descriptor points at
pub async fn write_manifest(
    project: &Path,
    descriptor: &Descriptor,
    manifest: &Value,
    options: WriteOptions,
) -> Result<()> {
    let relative = descriptor
        .manifest_path()
        .ok_or_else(|| Error::MissingManifestPath(project.to_path_buf()))?;
    let path = project.join(relative);
    write_file(&path, to_pretty_json(manifest)?.as_bytes(), options).await
}

/// Create a new file next to the manifest, e.g. the source of a new command.
///
/// Parent directories are created; an existing file is never overwritten.
pub async fn scaffold_source(
    project: &Path,
    descriptor: &Descriptor,
    relative: &Path,
    contents: &str,
) -> Result<PathBuf> {
    let manifest = descriptor
        .manifest_path()
        .ok_or_else(|| Error::MissingManifestPath(project.to_path_buf()))?;
    let base = project.join(manifest);
    let target = base.parent().unwrap_or(project).join(relative);

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .await
        .map_err(|e| Error::io(&target, e))?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| Error::io(&target, e))?;
    file.flush().await.map_err(|e| Error::io(&target, e))?;

    debug!("Scaffolded {:?}", target);
    Ok(target)
}

async fn write_file(path: &Path, contents: &[u8], options: WriteOptions) -> Result<()> {
    if !options.atomic {
        debug!("Writing {:?}", path);
        return tokio::fs::write(path, contents)
            .await
            .map_err(|e| Error::io(path, e));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    debug!("Writing {:?} through {:?}", path, temp_path);
    tokio::fs::write(&temp_path, contents)
        .await
        .map_err(|e| Error::io(&temp_path, e))?;
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(Error::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{read_descriptor, read_manifest};
    use crate::types::DependencyLocation;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor() -> Descriptor {
        let mut descriptor = Descriptor::new("writer-test");
        descriptor.set_version("2.0.0");
        descriptor.insert_dependency(DependencyLocation::Dependencies, "foo", "^1.0.0");
        descriptor.set_manifest_path("src/manifest.json");
        descriptor
    }

    #[tokio::test]
    async fn test_descriptor_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::default();
        let written = descriptor();

        write_descriptor(temp_dir.path(), &layout, &written, WriteOptions::default())
            .await
            .unwrap();
        let read = read_descriptor(temp_dir.path(), &layout).await.unwrap();
        assert_eq!(read, written);

        let raw = fs::read_to_string(layout.descriptor_path(temp_dir.path())).unwrap();
        assert!(raw.starts_with("{\n  \"name\""));
        assert!(raw.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_rewriting_a_loaded_descriptor_keeps_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::default();
        let original = r#"{
  "name": "p",
  "scripts": {
    "build": "skpm-build"
  },
  "devDependencies": {},
  "version": 3,
  "description": "d"
}
"#;
        fs::write(layout.descriptor_path(temp_dir.path()), original).unwrap();

        let loaded = read_descriptor(temp_dir.path(), &layout).await.unwrap();
        write_descriptor(temp_dir.path(), &layout, &loaded, WriteOptions::default())
            .await
            .unwrap();

        let rewritten = fs::read_to_string(layout.descriptor_path(temp_dir.path())).unwrap();
        assert_eq!(rewritten, original);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::default();

        write_descriptor(
            temp_dir.path(),
            &layout,
            &descriptor(),
            WriteOptions { atomic: true },
        )
        .await
        .unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["descriptor.json"]);
    }

    #[tokio::test]
    async fn test_write_manifest_uses_descriptor_pointer() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        let descriptor = descriptor();
        let manifest = json!({ "identifier": "com.example.writer", "commands": [] });

        write_manifest(temp_dir.path(), &descriptor, &manifest, WriteOptions::default())
            .await
            .unwrap();
        let read = read_manifest(temp_dir.path(), &descriptor).await.unwrap();
        assert_eq!(read, manifest);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("gone");

        let err = write_descriptor(
            &project,
            &ProjectLayout::default(),
            &descriptor(),
            WriteOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_scaffold_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let descriptor = descriptor();

        let created = scaffold_source(
            temp_dir.path(),
            &descriptor,
            Path::new("commands/hello.js"),
            "export default function () {}\n",
        )
        .await
        .unwrap();
        assert_eq!(created, temp_dir.path().join("src/commands/hello.js"));

        let err = scaffold_source(temp_dir.path(), &descriptor, Path::new("commands/hello.js"), "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IoError { ref source, .. } if source.kind() == std::io::ErrorKind::AlreadyExists
        ));
    }
}
