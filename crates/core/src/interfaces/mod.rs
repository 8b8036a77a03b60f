//! Collaborator interfaces
//!
//! Traits the pipeline calls out to instead of reaching for process-wide
//! state. Concrete implementations live in `crate::services`.

pub mod scan_observer;

pub use scan_observer::ScanObserver;
