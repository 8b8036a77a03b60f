use crate::{
    concurrency::{ScanContext, guarded},
    error::{Error, Result},
    manifest::read_descriptor,
    types::{Dependency, DependencySet, QueuedDependency},
};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use tracing::debug;

use super::reader::load_dependency_metadata;

/// Resolve a batch of queued dependencies for one project.
///
/// Dependencies that are not installed are dropped. The first other error
/// aborts the batch; reads still in flight are dropped with it.
pub async fn load_project_dependencies(
    project: &Path,
    queue: &[QueuedDependency],
    ctx: &ScanContext,
) -> Result<Vec<Dependency>> {
    ctx.check_cancelled()?;

    stream::iter(queue)
        .map(|queued| async move {
            let path = ctx.layout.installed_descriptor_path(project, &queued.name);
            let resolved = guarded(
                ctx,
                &path,
                load_dependency_metadata(project, &queued.name, queued.location, &ctx.layout),
            )
            .await?;

            if resolved.is_none() {
                ctx.observer.dependency_missing(project, &queued.name);
            }
            Ok::<_, Error>(resolved)
        })
        .buffer_unordered(ctx.limits.concurrency)
        .try_filter_map(|resolved| async move { Ok::<_, Error>(resolved) })
        .try_collect()
        .await
}

/// Re-read the project's descriptor and resolve every declared dependency,
/// keyed by name.
pub async fn load_all_project_dependencies(
    project: &Path,
    ctx: &ScanContext,
) -> Result<DependencySet> {
    let descriptor = guarded(ctx, project, read_descriptor(project, &ctx.layout)).await?;
    let queue = descriptor.dependency_queue();
    debug!(
        "Resolving {} dependencies of {:?}",
        queue.len(),
        descriptor.name()
    );

    let resolved = load_project_dependencies(project, &queue, ctx).await?;

    Ok(resolved
        .into_iter()
        .map(|dependency| (dependency.name.clone(), dependency))
        .collect())
}
