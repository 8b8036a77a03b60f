pub mod deps;
pub mod init;
pub mod scaffold;
pub mod scan;

pub use deps::deps_command;
pub use init::init_command;
pub use scaffold::scaffold_command;
pub use scan::scan_command;
