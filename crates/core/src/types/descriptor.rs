use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use super::dependency::{DependencyLocation, QueuedDependency};

const NAME: &str = "name";
const VERSION: &str = "version";
const PLUGIN_CONFIG: &str = "pluginConfig";
const MANIFEST_PATH: &str = "manifestPath";

/// A project's `descriptor.json`.
///
/// The file is held as a JSON object in its original key order, so writing a
/// loaded descriptor back reproduces it. The accessors read the fields the
/// pipeline needs and treat a value of the wrong type as absent; only a
/// string `name` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    name: String,
    fields: Map<String, Value>,
}

impl Descriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut fields = Map::new();
        fields.insert(NAME.to_string(), Value::String(name.clone()));
        Self { name, fields }
    }

    /// Wrap a parsed descriptor object; fails when `name` is missing or not a string.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, String> {
        let name = match fields.get(NAME) {
            Some(Value::String(name)) => name.clone(),
            Some(other) => return Err(format!("`name` must be a string, found {other}")),
            None => return Err("missing field `name`".to_string()),
        };
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get(VERSION).and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.fields
            .insert(VERSION.to_string(), Value::String(version.into()));
    }

    /// Any top-level field, as written in the file
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Declared dependencies of one section with their version ranges.
    ///
    /// A section that is missing or not an object declares nothing.
    pub fn declared(&self, location: DependencyLocation) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .get(location.as_str())
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|section| section.iter().map(|(name, range)| (name.as_str(), range)))
    }

    /// Add or replace a dependency, turning a malformed section into an object
    pub fn insert_dependency(
        &mut self,
        location: DependencyLocation,
        name: impl Into<String>,
        range: impl Into<String>,
    ) {
        if let Some(section) = object_entry(&mut self.fields, location.as_str()) {
            section.insert(name.into(), Value::String(range.into()));
        }
    }

    /// Relative location of the plugin manifest, if the descriptor declares one
    pub fn manifest_path(&self) -> Option<&Path> {
        self.fields
            .get(PLUGIN_CONFIG)
            .and_then(|config| config.get(MANIFEST_PATH))
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
            .map(Path::new)
    }

    pub fn set_manifest_path(&mut self, path: impl Into<String>) {
        if let Some(config) = object_entry(&mut self.fields, PLUGIN_CONFIG) {
            config.insert(MANIFEST_PATH.to_string(), Value::String(path.into()));
        }
    }

    /// Every declared dependency tagged with the section it came from.
    ///
    /// A name declared in both sections is queued once, as a dev dependency.
    pub fn dependency_queue(&self) -> Vec<QueuedDependency> {
        let mut queue: BTreeMap<&str, DependencyLocation> = BTreeMap::new();

        for location in [
            DependencyLocation::Dependencies,
            DependencyLocation::DevDependencies,
        ] {
            for (name, _) in self.declared(location) {
                queue.insert(name, location);
            }
        }

        queue
            .into_iter()
            .map(|(name, location)| QueuedDependency::new(name, location))
            .collect()
    }
}

fn object_entry<'a>(
    fields: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    let entry = fields
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry.as_object_mut()
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Descriptor::from_fields(fields).map_err(de::Error::custom)
    }
}
