//! Observer that keeps what it sees in memory

use crate::{error::Error, interfaces::ScanObserver, types::ProjectField};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    ProjectSkipped {
        path: PathBuf,
        reason: String,
    },
    FieldUnavailable {
        path: PathBuf,
        field: ProjectField,
        reason: String,
    },
    DependencyMissing {
        project: PathBuf,
        name: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    observations: Mutex<Vec<Observation>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in arrival order
    pub fn observations(&self) -> Vec<Observation> {
        match self.observations.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn take(&self) -> Vec<Observation> {
        match self.observations.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn push(&self, observation: Observation) {
        match self.observations.lock() {
            Ok(mut guard) => guard.push(observation),
            Err(poisoned) => poisoned.into_inner().push(observation),
        }
    }
}

impl ScanObserver for RecordingObserver {
    fn project_skipped(&self, path: &Path, error: &Error) {
        self.push(Observation::ProjectSkipped {
            path: path.to_path_buf(),
            reason: error.to_string(),
        });
    }

    fn field_unavailable(&self, path: &Path, field: ProjectField, error: &Error) {
        self.push(Observation::FieldUnavailable {
            path: path.to_path_buf(),
            field,
            reason: error.to_string(),
        });
    }

    fn dependency_missing(&self, project: &Path, name: &str) {
        self.push(Observation::DependencyMissing {
            project: project.to_path_buf(),
            name: name.to_string(),
        });
    }
}
