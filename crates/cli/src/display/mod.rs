pub mod formatter;

pub use formatter::{print_dependencies, print_project, print_skipped};
