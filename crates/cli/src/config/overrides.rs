use anyhow::{Context, Result};
use std::env;
use workbench_core::{Workbench, WorkbenchConfig};

use crate::cli::GlobalArgs;

/// Resolve the effective config: explicit file or discovered
/// `.workbench.json`, then environment, then command-line flags.
pub fn resolve_config(global: &GlobalArgs) -> Result<WorkbenchConfig> {
    let mut config = match &global.config {
        Some(path) => {
            let mut config = WorkbenchConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides()?;
            config
        }
        None => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            WorkbenchConfig::discover(&cwd)?
        }
    };

    apply_flags(&mut config, global);
    config.validate()?;
    Ok(config)
}

fn apply_flags(config: &mut WorkbenchConfig, global: &GlobalArgs) {
    if let Some(concurrency) = global.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(ms) = global.timeout_ms {
        config.item_timeout_ms = (ms > 0).then_some(ms);
    }
    if global.atomic_writes {
        config.atomic_writes = true;
    }
}

pub fn build_workbench(global: &GlobalArgs) -> Result<Workbench> {
    Ok(Workbench::with_config(resolve_config(global)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = WorkbenchConfig::default();
        let global = GlobalArgs {
            concurrency: Some(2),
            timeout_ms: Some(0),
            atomic_writes: true,
            ..Default::default()
        };

        apply_flags(&mut config, &global);
        assert_eq!(config.concurrency, 2);
        assert!(config.item_timeout_ms.is_none());
        assert!(config.atomic_writes);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = WorkbenchConfig::default();
        apply_flags(&mut config, &GlobalArgs::default());
        assert_eq!(config, WorkbenchConfig::default());
    }
}
