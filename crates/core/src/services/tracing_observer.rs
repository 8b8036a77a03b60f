//! Default observer that forwards to `tracing`

use crate::{error::Error, interfaces::ScanObserver, types::ProjectField};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl ScanObserver for TracingObserver {
    fn project_skipped(&self, path: &Path, error: &Error) {
        // Deleted projects are the common case, so this is not a warning
        debug!(path = %path.display(), %error, "Skipping project");
    }

    fn field_unavailable(&self, path: &Path, field: ProjectField, error: &Error) {
        warn!(path = %path.display(), %field, %error, "Project field unavailable");
    }

    fn dependency_missing(&self, project: &Path, name: &str) {
        debug!(project = %project.display(), dependency = name, "Dependency not installed");
    }
}
