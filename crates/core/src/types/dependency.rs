use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Declared section a dependency was listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyLocation {
    #[serde(rename = "dependencies")]
    Dependencies,
    #[serde(rename = "devDependencies")]
    DevDependencies,
}

impl DependencyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyLocation::Dependencies => "dependencies",
            DependencyLocation::DevDependencies => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime state of a dependency. The loader only ever produces `Idle`;
/// the other states belong to whoever installs and removes packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    #[default]
    Idle,
    Installing,
    Updating,
    Removing,
}

/// A declared dependency waiting for its installed metadata to be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedDependency {
    pub name: String,
    pub location: DependencyLocation,
}

impl QueuedDependency {
    pub fn new(name: impl Into<String>, location: DependencyLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Installed metadata for one dependency of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name the project declares, which is also the registry key
    pub name: String,
    /// Name in the installed descriptor when it differs from the declared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Installed version, not the range declared by the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Either a bare URL string or a `{ "type", "url" }` object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Value>,
    pub status: DependencyStatus,
    pub location: DependencyLocation,
}

impl Dependency {
    /// Project an installed package descriptor onto the fields we keep.
    ///
    /// The dependency is named after `declared_name`, so an aliased install
    /// stays under the key the project asked for.
    pub fn from_installed(
        declared_name: &str,
        installed: &Map<String, Value>,
        location: DependencyLocation,
    ) -> Self {
        let text = |key: &str| installed.get(key).and_then(Value::as_str).map(str::to_string);

        let keywords = installed
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        // Legacy descriptors use { "type": "MIT", "url": ... }
        let license = match installed.get("license") {
            Some(Value::String(name)) => Some(name.clone()),
            Some(Value::Object(obj)) => obj.get("type").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };

        Self {
            name: declared_name.to_string(),
            package_name: text("name").filter(|name| name != declared_name),
            description: text("description"),
            keywords,
            version: text("version"),
            homepage: text("homepage"),
            license,
            repository: installed.get("repository").filter(|v| !v.is_null()).cloned(),
            status: DependencyStatus::Idle,
            location,
        }
    }
}

/// Resolved dependencies of one project, keyed by name
pub type DependencySet = BTreeMap<String, Dependency>;
