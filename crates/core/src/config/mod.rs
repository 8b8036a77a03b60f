pub mod settings;

pub use settings::{CONFIG_FILE_NAME, ProjectLayout, WorkbenchConfig};
