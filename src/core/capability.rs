//! Optional capabilities of the library and their static build tables.
//!
//! Every capability owns a fixed, ordered list of translation units and at
//! most one presence macro. The tables below are the only place these
//! mappings live; the planner iterates them instead of branching per
//! capability.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::define::Define;

/// An optional, independently toggleable module of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// GLSL back end (foundation for the other shading-language back ends)
    Glsl,
    /// HLSL back end
    Hlsl,
    /// Metal Shading Language back end
    Msl,
    /// C++ back end
    Cpp,
    /// JSON reflection back end
    Reflect,
    /// Helper utilities
    Util,
}

impl Capability {
    /// All capabilities in canonical plan order.
    pub const ALL: [Capability; 6] = [
        Capability::Glsl,
        Capability::Hlsl,
        Capability::Msl,
        Capability::Cpp,
        Capability::Reflect,
        Capability::Util,
    ];

    /// Get the capability name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Glsl => "glsl",
            Capability::Hlsl => "hlsl",
            Capability::Msl => "msl",
            Capability::Cpp => "cpp",
            Capability::Reflect => "reflect",
            Capability::Util => "util",
        }
    }

    /// Look up the static build table entry for this capability.
    pub fn spec(&self) -> &'static CapabilitySpec {
        // CAPABILITY_TABLE is indexed in declaration order
        &CAPABILITY_TABLE[*self as usize]
    }

    /// Source units compiled when this capability is enabled.
    pub fn sources(&self) -> &'static [&'static str] {
        self.spec().sources
    }

    /// Presence macro defined when this capability is enabled.
    pub fn define(&self) -> Option<Define> {
        self.spec().define()
    }

    /// Capabilities that must be enabled for this one to be enabled.
    pub fn prerequisites(&self) -> impl Iterator<Item = Capability> + '_ {
        DEPENDENCY_EDGES
            .iter()
            .filter(move |edge| edge.dependent == *self)
            .map(|edge| edge.prerequisite)
    }

    /// Capabilities that cannot be enabled without this one.
    pub fn dependents(&self) -> impl Iterator<Item = Capability> + '_ {
        DEPENDENCY_EDGES
            .iter()
            .filter(move |edge| edge.prerequisite == *self)
            .map(|edge| edge.dependent)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown capability '{}'; expected one of: glsl, hlsl, msl, cpp, reflect, util",
                    s
                )
            })
    }
}

/// Static build table entry for one capability.
#[derive(Debug)]
pub struct CapabilitySpec {
    pub capability: Capability,
    pub sources: &'static [&'static str],
    /// Presence macro as `(name, value)`
    pub macro_def: Option<(&'static str, &'static str)>,
}

impl CapabilitySpec {
    /// Presence macro as a [`Define`].
    pub fn define(&self) -> Option<Define> {
        self.macro_def
            .map(|(name, value)| Define::key_value(name, value))
    }
}

/// A directed "dependent requires prerequisite" relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub dependent: Capability,
    pub prerequisite: Capability,
}

/// Foundational units, always compiled first.
pub const CORE_SOURCES: &[&str] = &[
    "spirv_cross.cpp",
    "spirv_parser.cpp",
    "spirv_cross_parsed_ir.cpp",
    "spirv_cfg.cpp",
];

/// Public C API units, always compiled after the core.
pub const C_API_SOURCES: &[&str] = &["spirv_cross_c.cpp"];

pub static CAPABILITY_TABLE: [CapabilitySpec; 6] = [
    CapabilitySpec {
        capability: Capability::Glsl,
        sources: &["spirv_glsl.cpp"],
        macro_def: Some(("SPIRV_CROSS_C_API_GLSL", "1")),
    },
    CapabilitySpec {
        capability: Capability::Hlsl,
        sources: &["spirv_hlsl.cpp"],
        macro_def: Some(("SPIRV_CROSS_C_API_HLSL", "1")),
    },
    CapabilitySpec {
        capability: Capability::Msl,
        sources: &["spirv_msl.cpp"],
        macro_def: Some(("SPIRV_CROSS_C_API_MSL", "1")),
    },
    CapabilitySpec {
        capability: Capability::Cpp,
        sources: &["spirv_cpp.cpp"],
        macro_def: Some(("SPIRV_CROSS_C_API_CPP", "1")),
    },
    CapabilitySpec {
        capability: Capability::Reflect,
        sources: &["spirv_reflect.cpp"],
        macro_def: Some(("SPIRV_CROSS_C_API_REFLECT", "1")),
    },
    CapabilitySpec {
        capability: Capability::Util,
        sources: &["spirv_cross_util.cpp"],
        macro_def: None,
    },
];

/// Prerequisite edges, in the order the validator evaluates them.
pub static DEPENDENCY_EDGES: [DependencyEdge; 4] = [
    DependencyEdge {
        dependent: Capability::Hlsl,
        prerequisite: Capability::Glsl,
    },
    DependencyEdge {
        dependent: Capability::Msl,
        prerequisite: Capability::Glsl,
    },
    DependencyEdge {
        dependent: Capability::Cpp,
        prerequisite: Capability::Glsl,
    },
    DependencyEdge {
        dependent: Capability::Reflect,
        prerequisite: Capability::Glsl,
    },
];

/// Forces standard library containers over the library's own replacements.
pub const FORCE_STL_MACRO: &str = "SPIRV_CROSS_FORCE_STL_TYPES";

/// Turns internal exceptions into assertions.
pub const ASSERTIONS_MACRO: &str = "SPIRV_CROSS_EXCEPTIONS_TO_ASSERTIONS";
