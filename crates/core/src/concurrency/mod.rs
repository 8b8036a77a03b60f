//! Bounded fan-out for independent reads
//!
//! Aggregators drive their per-item futures through
//! `StreamExt::buffer_unordered` on the calling task, so at most
//! `TaskLimits::concurrency` reads are in flight and the fold over the
//! results needs no locking. Every item goes through [`guarded`], which
//! applies the per-item timeout and the scan's cancellation token.

use crate::{
    config::{ProjectLayout, WorkbenchConfig},
    error::{Error, Result},
    interfaces::ScanObserver,
    services::TracingObserver,
};
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLimits {
    pub concurrency: usize,
    pub item_timeout: Option<Duration>,
}

impl Default for TaskLimits {
    fn default() -> Self {
        let config = WorkbenchConfig::default();
        Self::from(&config)
    }
}

impl From<&WorkbenchConfig> for TaskLimits {
    fn from(config: &WorkbenchConfig) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            item_timeout: config.item_timeout(),
        }
    }
}

/// Everything an aggregator needs besides its inputs
#[derive(Clone)]
pub struct ScanContext {
    pub layout: ProjectLayout,
    pub limits: TaskLimits,
    pub cancel: CancellationToken,
    pub observer: Arc<dyn ScanObserver>,
}

impl ScanContext {
    pub fn new(config: &WorkbenchConfig) -> Self {
        Self {
            layout: config.layout.clone(),
            limits: TaskLimits::from(config),
            cancel: CancellationToken::new(),
            observer: Arc::new(TracingObserver::new()),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Fails fast once the scan has been cancelled
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new(&WorkbenchConfig::default())
    }
}

impl fmt::Debug for ScanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanContext")
            .field("layout", &self.layout)
            .field("limits", &self.limits)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Run one item's future under the scan's timeout and cancellation token.
pub async fn guarded<T, F>(ctx: &ScanContext, path: &Path, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let timed = async {
        match ctx.limits.item_timeout {
            Some(after) => match tokio::time::timeout(after, work).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    path: path.to_path_buf(),
                    after,
                }),
            },
            None => work.await,
        }
    };

    tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => Err(Error::Cancelled),
        result = timed => result,
    }
}
