//! Service implementations for the collaborator interfaces

pub mod recording_observer;
pub mod tracing_observer;

pub use recording_observer::{Observation, RecordingObserver};
pub use tracing_observer::TracingObserver;
