//! The user-supplied flag set for one planning pass.
//!
//! A [`FlagSet`] is a plain `Copy` value. Every planning function takes it by
//! reference, so a pass always observes the same flags from start to finish
//! and several configurations can be planned side by side in one process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::capability::Capability;

/// Build profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Debug,
    Release,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            _ => Err(format!(
                "invalid build mode '{}'; expected 'debug' or 'release'",
                s
            )),
        }
    }
}

/// Whether the library is produced as a static archive or a shared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Static library (.a / .lib)
    #[default]
    #[serde(alias = "staticlib")]
    Static,
    /// Shared/dynamic library (.so / .dylib / .dll)
    #[serde(alias = "sharedlib", alias = "dynamic")]
    Shared,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Static => "static",
            ArtifactKind::Shared => "shared",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" | "staticlib" => Ok(ArtifactKind::Static),
            "shared" | "sharedlib" | "dynamic" => Ok(ArtifactKind::Shared),
            _ => Err(format!(
                "invalid artifact kind '{}'; expected 'static' or 'shared'",
                s
            )),
        }
    }
}

/// One enable bit per optional capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub glsl: bool,
    pub hlsl: bool,
    pub msl: bool,
    pub cpp: bool,
    pub reflect: bool,
    pub util: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::all()
    }
}

impl Capabilities {
    /// Every capability enabled.
    pub fn all() -> Self {
        Capabilities {
            glsl: true,
            hlsl: true,
            msl: true,
            cpp: true,
            reflect: true,
            util: true,
        }
    }

    /// Every capability disabled.
    pub fn none() -> Self {
        Capabilities {
            glsl: false,
            hlsl: false,
            msl: false,
            cpp: false,
            reflect: false,
            util: false,
        }
    }

    /// Check whether a capability is enabled.
    pub fn is_enabled(&self, capability: Capability) -> bool {
        match capability {
            Capability::Glsl => self.glsl,
            Capability::Hlsl => self.hlsl,
            Capability::Msl => self.msl,
            Capability::Cpp => self.cpp,
            Capability::Reflect => self.reflect,
            Capability::Util => self.util,
        }
    }

    /// Return a copy with one capability switched.
    pub fn with(mut self, capability: Capability, enabled: bool) -> Self {
        let slot = match capability {
            Capability::Glsl => &mut self.glsl,
            Capability::Hlsl => &mut self.hlsl,
            Capability::Msl => &mut self.msl,
            Capability::Cpp => &mut self.cpp,
            Capability::Reflect => &mut self.reflect,
            Capability::Util => &mut self.util,
        };
        *slot = enabled;
        self
    }

    /// Enabled capabilities in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(move |c| self.is_enabled(*c))
    }
}

/// All toggles and modes for a single planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FlagSet {
    pub build_mode: BuildMode,
    pub artifact_kind: ArtifactKind,
    pub exceptions_as_assertions: bool,
    /// Use standard library containers instead of the internal ones
    pub use_standard_container_types: bool,
    pub capabilities: Capabilities,
}

impl FlagSet {
    /// Create a flag set with defaults: debug, static, every capability on.
    pub fn new() -> Self {
        FlagSet::default()
    }

    pub fn with_build_mode(mut self, mode: BuildMode) -> Self {
        self.build_mode = mode;
        self
    }

    pub fn with_artifact_kind(mut self, kind: ArtifactKind) -> Self {
        self.artifact_kind = kind;
        self
    }

    pub fn with_exceptions_as_assertions(mut self, enabled: bool) -> Self {
        self.exceptions_as_assertions = enabled;
        self
    }

    pub fn with_standard_container_types(mut self, enabled: bool) -> Self {
        self.use_standard_container_types = enabled;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_capability(mut self, capability: Capability, enabled: bool) -> Self {
        self.capabilities = self.capabilities.with(capability, enabled);
        self
    }

    /// Check whether a capability is enabled.
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities.is_enabled(capability)
    }
}
