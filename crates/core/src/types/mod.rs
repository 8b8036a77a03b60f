pub mod dependency;
pub mod descriptor;
pub mod project;

// Re-export commonly used types
pub use dependency::{
    Dependency, DependencyLocation, DependencySet, DependencyStatus, QueuedDependency,
};
pub use descriptor::Descriptor;
pub use project::{FileStat, ProjectField, ProjectRecord, ProjectSet, ScanReport, SkippedProject};
