use crate::{
    concurrency::{ScanContext, guarded},
    error::{Error, Result},
    types::{ProjectRecord, ProjectSet, ScanReport, SkippedProject},
};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::loader::load_project;

/// Load every project in `paths` and key the successes by name.
///
/// A project that fails to load for any reason is treated as deleted and
/// left out; the only error returned is [`Error::Cancelled`].
pub async fn load_projects<I, P>(paths: I, ctx: &ScanContext) -> Result<ProjectSet>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Ok(scan(paths, ctx).await?.projects)
}

/// Same as [`load_projects`], also returning the projects that were left
/// out and why.
pub async fn scan<I, P>(paths: I, ctx: &ScanContext) -> Result<ScanReport>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ctx.check_cancelled()?;

    let paths: Vec<PathBuf> = paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    debug!(
        "Scanning {} projects with concurrency {}",
        paths.len(),
        ctx.limits.concurrency
    );

    let outcomes: Vec<(PathBuf, Result<ProjectRecord>)> = stream::iter(paths)
        .map(|path| async move {
            let result = guarded(
                ctx,
                &path,
                load_project(&path, &ctx.layout, ctx.observer.as_ref()),
            )
            .await;
            (path, result)
        })
        .buffer_unordered(ctx.limits.concurrency)
        .collect()
        .await;

    // Completion order; a later duplicate name replaces the earlier record
    let report = outcomes.into_iter().try_fold(
        ScanReport::default(),
        |mut report, (path, result)| match result {
            Ok(record) => {
                let name = record.name().to_string();
                if let Some(previous) = report.projects.insert(name.clone(), record) {
                    warn!(
                        "Project name {:?} at {:?} replaces the one at {:?}",
                        name, path, previous.path
                    );
                }
                Ok(report)
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(error) => {
                ctx.observer.project_skipped(&path, &error);
                report.skipped.push(SkippedProject {
                    path,
                    reason: error.to_string(),
                });
                Ok(report)
            }
        },
    )?;

    debug!(
        "Scan finished: {} loaded, {} skipped",
        report.projects.len(),
        report.skipped.len()
    );
    Ok(report)
}
