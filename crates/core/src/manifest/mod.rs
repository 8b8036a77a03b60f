//! Single-file readers for the metadata a project directory carries

pub mod reader;

pub use reader::{read_descriptor, read_directory_stat, read_icon, read_json, read_manifest};
