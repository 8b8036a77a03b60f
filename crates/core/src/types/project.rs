use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use super::descriptor::Descriptor;

/// Filesystem metadata for a project directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub created: SystemTime,
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
}

/// Merged view of one project directory.
///
/// The descriptor is the identity of the record; the remaining fields are
/// auxiliary and `None` when they could not be read. When serialized the
/// auxiliary fields sit under `__`-prefixed keys next to the descriptor keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub descriptor: Descriptor,
    pub path: PathBuf,
    pub manifest: Option<Value>,
    /// Base64 encoded icon bytes
    pub icon: Option<String>,
    pub created_at: Option<SystemTime>,
}

impl ProjectRecord {
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }
}

// Descriptor keys with this prefix would collide with the auxiliary ones
const RESERVED_KEY_PREFIX: &str = "__";

impl Serialize for ProjectRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.descriptor.fields() {
            if !key.starts_with(RESERVED_KEY_PREFIX) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("__path", &self.path)?;
        map.serialize_entry("__manifest", &self.manifest)?;
        map.serialize_entry("__icon", &self.icon)?;
        map.serialize_entry("__createdAt", &self.created_at)?;
        map.end()
    }
}

/// Projects keyed by name, rebuilt on every scan
pub type ProjectSet = BTreeMap<String, ProjectRecord>;

/// Auxiliary parts of a project whose failure only blanks a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Manifest,
    Icon,
    CreatedAt,
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectField::Manifest => write!(f, "manifest"),
            ProjectField::Icon => write!(f, "icon"),
            ProjectField::CreatedAt => write!(f, "creation time"),
        }
    }
}

/// A project left out of a scan, with the reason it failed to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProject {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a scan including the projects that were dropped
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub projects: ProjectSet,
    pub skipped: Vec<SkippedProject>,
}
