//! workbench-core - Discovery engine for local plugin projects
//!
//! This crate provides functionality to:
//! - Load a plugin project's descriptor, manifest, icon and metadata into one record
//! - Scan many project directories concurrently, dropping the ones that fail to load
//! - Resolve installed metadata for every dependency a project declares
//! - Write descriptors and manifests back to disk
pub mod concurrency;
pub mod config;
pub mod dependency;
pub mod error;
pub mod interfaces;
pub mod manifest;
pub mod project;
pub mod services;
pub mod types;
pub mod workbench;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use concurrency::{ScanContext, TaskLimits};
pub use config::{ProjectLayout, WorkbenchConfig};
pub use interfaces::ScanObserver;
pub use project::WriteOptions;
pub use services::{RecordingObserver, TracingObserver};
pub use workbench::Workbench;
