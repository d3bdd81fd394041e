//! Command implementations

pub mod build;
pub mod completions;
pub mod explain;
pub mod flags;
pub mod plan;

use anyhow::Result;

use crate::cli::ConfigArgs;
use crossplan::core::artifact::DEFAULT_ARTIFACT_NAME;
use crossplan::core::{BuildMode, Platform};
use crossplan::ops::PlanRequest;
use crossplan::util::config::{global_config_path, load_config, project_config_path};
use crossplan::util::Config;

/// Load the global and project config files.
pub fn load_settings() -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let global = global_config_path().unwrap_or_default();

    Ok(load_config(&global, &project_config_path(&cwd)))
}

/// Layer command-line options over the loaded config.
pub fn plan_request(config: &Config, args: &ConfigArgs) -> Result<PlanRequest> {
    let mut flags = config.flag_set()?;

    if args.release {
        flags = flags.with_build_mode(BuildMode::Release);
    }
    if let Some(kind) = args.kind {
        flags = flags.with_artifact_kind(kind);
    }
    if args.exceptions_as_assertions {
        flags = flags.with_exceptions_as_assertions(true);
    }
    if args.force_stl {
        flags = flags.with_standard_container_types(true);
    }
    for cap in args.disabled() {
        flags = flags.with_capability(cap, false);
    }

    let platform = match &args.target {
        Some(platform) => platform.clone(),
        None => config.target()?.unwrap_or_else(Platform::host),
    };

    let name = args
        .name
        .clone()
        .or_else(|| config.build.name.clone())
        .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

    Ok(PlanRequest::new(flags)
        .with_platform(platform)
        .with_artifact_name(name))
}
