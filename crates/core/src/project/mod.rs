//! Project loading, aggregation and persistence

pub mod aggregator;
pub mod loader;
pub mod writer;

pub use aggregator::{load_projects, scan};
pub use loader::load_project;
pub use writer::{WriteOptions, scaffold_source, to_pretty_json, write_descriptor, write_manifest};
