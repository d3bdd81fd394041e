//! Configuration file support for crossplan.
//!
//! crossplan reads two configuration file locations:
//! - Global: `~/.crossplan/config.toml` - User-wide defaults
//! - Project: `.crossplan/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::capability::Capability;
use crate::core::flags::{ArtifactKind, BuildMode, FlagSet};
use crate::core::platform::Platform;

/// crossplan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Capability toggles
    pub features: FeaturesConfig,

    /// Compiler overrides
    pub toolchain: ToolchainSettings,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build mode (debug, release)
    pub mode: Option<String>,

    /// Artifact kind (static, shared)
    pub kind: Option<String>,

    /// Artifact base name
    pub name: Option<String>,

    /// Target triple to plan for (defaults to the host)
    pub target: Option<String>,

    /// Map exceptions to assertions
    pub exceptions_as_assertions: bool,

    /// Force standard-library container types
    pub force_stl_types: bool,

    /// Default number of parallel jobs (None = auto-detect)
    pub jobs: Option<usize>,

    /// Directory holding the SPIRV-Cross sources
    pub source_dir: Option<PathBuf>,

    /// Directory for objects and artifacts
    pub out_dir: Option<PathBuf>,

    /// Always emit compile_commands.json
    pub emit_compile_commands: bool,
}

/// Capability toggles. Every capability is on unless disabled here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub disable_glsl: bool,
    pub disable_hlsl: bool,
    pub disable_msl: bool,
    pub disable_cpp: bool,
    pub disable_reflect: bool,
    pub disable_util: bool,
}

impl FeaturesConfig {
    /// Whether `cap` is switched off.
    pub fn is_disabled(&self, cap: Capability) -> bool {
        match cap {
            Capability::Glsl => self.disable_glsl,
            Capability::Hlsl => self.disable_hlsl,
            Capability::Msl => self.disable_msl,
            Capability::Cpp => self.disable_cpp,
            Capability::Reflect => self.disable_reflect,
            Capability::Util => self.disable_util,
        }
    }

    fn merge(&mut self, other: &FeaturesConfig) {
        self.disable_glsl |= other.disable_glsl;
        self.disable_hlsl |= other.disable_hlsl;
        self.disable_msl |= other.disable_msl;
        self.disable_cpp |= other.disable_cpp;
        self.disable_reflect |= other.disable_reflect;
        self.disable_util |= other.disable_util;
    }
}

/// Toolchain settings for the artifact emitter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C++ compiler (e.g., /usr/bin/clang++)
    pub cxx: Option<PathBuf>,

    /// Path to the archiver (e.g., /usr/bin/llvm-ar)
    pub ar: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Build settings
        if other.build.mode.is_some() {
            self.build.mode = other.build.mode;
        }
        if other.build.kind.is_some() {
            self.build.kind = other.build.kind;
        }
        if other.build.name.is_some() {
            self.build.name = other.build.name;
        }
        if other.build.target.is_some() {
            self.build.target = other.build.target;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.source_dir.is_some() {
            self.build.source_dir = other.build.source_dir;
        }
        if other.build.out_dir.is_some() {
            self.build.out_dir = other.build.out_dir;
        }
        self.build.exceptions_as_assertions |= other.build.exceptions_as_assertions;
        self.build.force_stl_types |= other.build.force_stl_types;
        self.build.emit_compile_commands |= other.build.emit_compile_commands;

        self.features.merge(&other.features);

        // Toolchain settings
        if other.toolchain.cxx.is_some() {
            self.toolchain.cxx = other.toolchain.cxx;
        }
        if other.toolchain.ar.is_some() {
            self.toolchain.ar = other.toolchain.ar;
        }
    }

    /// Parse the configured build mode.
    pub fn build_mode(&self) -> Result<Option<BuildMode>> {
        self.build
            .mode
            .as_deref()
            .map(|s| {
                s.parse::<BuildMode>()
                    .map_err(|e| anyhow!("invalid `build.mode` in config: {}", e))
            })
            .transpose()
    }

    /// Parse the configured artifact kind.
    pub fn artifact_kind(&self) -> Result<Option<ArtifactKind>> {
        self.build
            .kind
            .as_deref()
            .map(|s| {
                s.parse::<ArtifactKind>()
                    .map_err(|e| anyhow!("invalid `build.kind` in config: {}", e))
            })
            .transpose()
    }

    /// Parse the configured target triple.
    pub fn target(&self) -> Result<Option<Platform>> {
        self.build
            .target
            .as_deref()
            .map(|s| {
                s.parse::<Platform>()
                    .map_err(|e| anyhow!("invalid `build.target` in config: {}", e))
            })
            .transpose()
    }

    /// The flag set described by this config alone.
    pub fn flag_set(&self) -> Result<FlagSet> {
        let mut flags = FlagSet::new()
            .with_exceptions_as_assertions(self.build.exceptions_as_assertions)
            .with_standard_container_types(self.build.force_stl_types);

        if let Some(mode) = self.build_mode()? {
            flags = flags.with_build_mode(mode);
        }
        if let Some(kind) = self.artifact_kind()? {
            flags = flags.with_artifact_kind(kind);
        }
        for cap in Capability::ALL {
            if self.features.is_disabled(cap) {
                flags = flags.with_capability(cap, false);
            }
        }

        Ok(flags)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.crossplan/config.toml)
/// 2. Global config (~/.crossplan/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global crossplan config directory (~/.crossplan).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".crossplan"))
}

/// Get the global config path (~/.crossplan/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.crossplan/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".crossplan").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.build.mode.is_none());
        assert!(!config.build.exceptions_as_assertions);
        assert!(!config.features.disable_glsl);
        assert_eq!(config.flag_set().unwrap(), FlagSet::new());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
mode = "release"
kind = "shared"
name = "spvc"
jobs = 8
force_stl_types = true

[features]
disable_msl = true

[toolchain]
cxx = "/usr/bin/clang++"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.name.as_deref(), Some("spvc"));
        assert_eq!(config.build.jobs, Some(8));
        assert_eq!(config.toolchain.cxx, Some(PathBuf::from("/usr/bin/clang++")));

        let flags = config.flag_set().unwrap();
        assert_eq!(flags.build_mode, BuildMode::Release);
        assert_eq!(flags.artifact_kind, ArtifactKind::Shared);
        assert!(flags.use_standard_container_types);
        assert!(!flags.is_enabled(Capability::Msl));
        assert!(flags.is_enabled(Capability::Glsl));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.mode = Some("debug".to_string());
        base.build.jobs = Some(4);
        base.build.force_stl_types = true;
        base.features.disable_cpp = true;

        let mut override_cfg = Config::default();
        override_cfg.build.mode = Some("release".to_string());
        override_cfg.features.disable_reflect = true;

        base.merge(override_cfg);

        assert_eq!(base.build.mode.as_deref(), Some("release"));
        assert_eq!(base.build.jobs, Some(4)); // Not overridden
        // Toggles accumulate
        assert!(base.build.force_stl_types);
        assert!(base.features.disable_cpp);
        assert!(base.features.disable_reflect);
    }

    #[test]
    fn test_invalid_enum_is_error() {
        let mut config = Config::default();
        config.build.kind = Some("dynamic-ish".to_string());
        assert!(config.flag_set().is_err());

        config.build.kind = None;
        config.build.target = Some("linux".to_string());
        assert!(config.target().is_err());
    }

    #[test]
    fn test_unparseable_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[build\nmode = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.build.mode.is_none());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[build]
kind = "shared"
target = "x86_64-unknown-linux-gnu"

[toolchain]
ar = "/usr/bin/ar"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[build]
kind = "static"

[toolchain]
ar = "/usr/bin/llvm-ar"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);

        assert_eq!(config.build.kind.as_deref(), Some("static"));
        assert_eq!(
            config.target().unwrap().map(|p| p.to_string()),
            Some("x86_64-unknown-linux-gnu".to_string())
        );
        assert_eq!(config.toolchain.ar, Some(PathBuf::from("/usr/bin/llvm-ar")));
    }
}
