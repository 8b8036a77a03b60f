//! Installed metadata for a project's declared dependencies

pub mod aggregator;
pub mod reader;

pub use aggregator::{load_all_project_dependencies, load_project_dependencies};
pub use reader::load_dependency_metadata;
