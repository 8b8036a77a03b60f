pub mod overrides;
pub mod templates;

pub use overrides::{build_workbench, resolve_config};
pub use templates::{command_template, manifest_template, ui_template};
