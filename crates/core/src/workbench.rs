//! Entry point tying configuration, scan context and the pipeline together

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{
    concurrency::ScanContext,
    config::WorkbenchConfig,
    dependency,
    error::{Error, Result},
    interfaces::ScanObserver,
    manifest,
    project::{self, WriteOptions},
    types::{Dependency, DependencySet, Descriptor, ProjectRecord, ProjectSet, QueuedDependency, ScanReport},
};

/// Loads and writes plugin projects with one configuration.
///
/// Cloning shares the cancellation token and observer.
#[derive(Debug, Clone)]
pub struct Workbench {
    config: WorkbenchConfig,
    context: ScanContext,
}

impl Workbench {
    /// Create a workbench from the nearest `.workbench.json` above the
    /// current directory
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Ok(Self::with_config(WorkbenchConfig::discover(&cwd)?))
    }

    pub fn with_config(config: WorkbenchConfig) -> Self {
        let context = ScanContext::new(&config);
        Self { config, context }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.context = self.context.with_observer(observer);
        self
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    /// Token that aborts any scan in progress when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.context.cancel.clone()
    }

    pub async fn load_project(&self, path: &Path) -> Result<ProjectRecord> {
        project::load_project(path, &self.context.layout, self.context.observer.as_ref()).await
    }

    pub async fn load_projects<I, P>(&self, paths: I) -> Result<ProjectSet>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        project::load_projects(paths, &self.context).await
    }

    pub async fn scan<I, P>(&self, paths: I) -> Result<ScanReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        project::scan(paths, &self.context).await
    }

    pub async fn read_descriptor(&self, path: &Path) -> Result<Descriptor> {
        manifest::read_descriptor(path, &self.context.layout).await
    }

    pub async fn load_project_dependencies(
        &self,
        path: &Path,
        queue: &[QueuedDependency],
    ) -> Result<Vec<Dependency>> {
        dependency::load_project_dependencies(path, queue, &self.context).await
    }

    pub async fn load_all_project_dependencies(&self, path: &Path) -> Result<DependencySet> {
        dependency::load_all_project_dependencies(path, &self.context).await
    }

    pub async fn write_descriptor(&self, path: &Path, descriptor: &Descriptor) -> Result<()> {
        project::write_descriptor(path, &self.context.layout, descriptor, self.write_options())
            .await
    }

    pub async fn write_manifest(
        &self,
        path: &Path,
        descriptor: &Descriptor,
        manifest: &Value,
    ) -> Result<()> {
        project::write_manifest(path, descriptor, manifest, self.write_options()).await
    }

    /// Stamp `contents` into a new file relative to the project's manifest
    pub async fn scaffold_source(
        &self,
        path: &Path,
        relative: &Path,
        contents: &str,
    ) -> Result<PathBuf> {
        let descriptor = self.read_descriptor(path).await?;
        project::scaffold_source(path, &descriptor, relative, contents).await
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions::from(&self.config)
    }
}
