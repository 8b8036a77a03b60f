use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = ".workbench.json";

const DEFAULT_CONCURRENCY: usize = 16;
const DEFAULT_ITEM_TIMEOUT_MS: u64 = 30_000;

/// Where the pipeline looks for files inside a project directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ProjectLayout {
    /// Descriptor file name, used both for projects and installed packages
    pub descriptor: PathBuf,
    pub icon: PathBuf,
    pub installed_packages: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from("descriptor.json"),
            icon: PathBuf::from("assets/icon.png"),
            installed_packages: PathBuf::from("installed-packages"),
        }
    }
}

impl ProjectLayout {
    pub fn descriptor_path(&self, project: &Path) -> PathBuf {
        project.join(&self.descriptor)
    }

    pub fn icon_path(&self, project: &Path) -> PathBuf {
        project.join(&self.icon)
    }

    /// Descriptor of an installed package; scoped names like `@scope/pkg`
    /// map to nested directories.
    pub fn installed_descriptor_path(&self, project: &Path, dependency: &str) -> PathBuf {
        let mut path = project.join(&self.installed_packages);
        for segment in dependency.split('/') {
            path.push(segment);
        }
        path.join(&self.descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WorkbenchConfig {
    pub layout: ProjectLayout,

    /// Maximum number of projects or dependencies read at once
    pub concurrency: usize,

    /// Per-item read timeout; `null` or `0` disables it
    pub item_timeout_ms: Option<u64>,

    /// Write through a temp file and rename instead of overwriting in place
    pub atomic_writes: bool,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            layout: ProjectLayout::default(),
            concurrency: DEFAULT_CONCURRENCY,
            item_timeout_ms: Some(DEFAULT_ITEM_TIMEOUT_MS),
            atomic_writes: false,
        }
    }
}

impl WorkbenchConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Nearest config file above `start_path`, or defaults, with environment
    /// overrides applied on top.
    pub fn discover(start_path: &Path) -> Result<Self> {
        let mut config = match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading workbench config from {:?}", path);
                Self::load_from_file(&path)?
            }
            None => {
                tracing::debug!("No {} found above {:?}, using defaults", CONFIG_FILE_NAME, start_path);
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("WORKBENCH_CONCURRENCY") {
            self.concurrency = value.trim().parse().map_err(|_| {
                Error::ConfigError(format!("WORKBENCH_CONCURRENCY is not a number: {value}"))
            })?;
        }
        if let Ok(value) = std::env::var("WORKBENCH_ITEM_TIMEOUT_MS") {
            let ms: u64 = value.trim().parse().map_err(|_| {
                Error::ConfigError(format!("WORKBENCH_ITEM_TIMEOUT_MS is not a number: {value}"))
            })?;
            self.item_timeout_ms = (ms > 0).then_some(ms);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::ConfigError(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let layout = [
            ("layout.descriptor", &self.layout.descriptor),
            ("layout.icon", &self.layout.icon),
            ("layout.installed_packages", &self.layout.installed_packages),
        ];
        for (field, path) in layout {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigError(format!("{field} must not be empty")));
            }
            if path.is_absolute() || path.components().any(|c| c == Component::ParentDir) {
                return Err(Error::ConfigError(format!(
                    "{field} must stay inside the project directory: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Per-item timeout; `None` and `0` both disable it
    pub fn item_timeout(&self) -> Option<Duration> {
        self.item_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
