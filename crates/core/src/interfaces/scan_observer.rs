//! Observer interface for scan side channels
//!
//! Soft failures never reach the caller as errors. Anything that wants to
//! see them (logs, telemetry, a diagnostics panel) implements this trait
//! and is handed to the scan context.

use crate::{error::Error, types::ProjectField};
use std::path::Path;

/// Receives the failures a scan swallows
pub trait ScanObserver: Send + Sync {
    /// A project failed to load and was left out of the result set
    fn project_skipped(&self, _path: &Path, _error: &Error) {}

    /// An auxiliary project file could not be read; the field is left empty
    fn field_unavailable(&self, _path: &Path, _field: ProjectField, _error: &Error) {}

    /// A declared dependency has no installed descriptor
    fn dependency_missing(&self, _project: &Path, _name: &str) {}
}
