//! Compilation plan generation.
//!
//! A CompilationPlan describes which source groups to compile, which global
//! macros to define, and which artifact to produce. It is computed from a
//! flag set that has already passed validation; nothing here re-checks the
//! prerequisite edges.

use serde::Serialize;

use crate::core::artifact::ArtifactDescriptor;
use crate::core::capability::{
    Capability, ASSERTIONS_MACRO, CAPABILITY_TABLE, C_API_SOURCES, CORE_SOURCES, FORCE_STL_MACRO,
};
use crate::core::define::Define;
use crate::core::flags::FlagSet;

/// What a source group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Core,
    CApi,
    Capability(Capability),
}

impl GroupKind {
    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            GroupKind::Core => "core",
            GroupKind::CApi => "c-api",
            GroupKind::Capability(c) => c.as_str(),
        }
    }
}

/// An ordered run of translation units and the macro that comes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup {
    pub kind: GroupKind,
    pub sources: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<Define>,
}

/// The complete plan for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationPlan {
    /// Source groups in compile order
    pub groups: Vec<SourceGroup>,

    /// Global macro definitions, applied to every unit
    pub defines: Vec<Define>,

    /// Artifact to produce
    pub artifact: ArtifactDescriptor,
}

impl CompilationPlan {
    /// Iterate every source unit in plan order.
    pub fn sources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.sources.iter().copied())
    }

    /// Number of translation units in the plan.
    pub fn source_count(&self) -> usize {
        self.groups.iter().map(|g| g.sources.len()).sum()
    }

    /// Capabilities included in the plan, in canonical order.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.groups.iter().filter_map(|g| match g.kind {
            GroupKind::Capability(c) => Some(c),
            _ => None,
        })
    }

    /// Global macros as `-D` flags.
    pub fn define_flags(&self) -> Vec<String> {
        self.defines.iter().map(Define::to_flag).collect()
    }
}

/// Build the compilation plan for a validated flag set.
///
/// `export_macro` is the platform adapter's output for this artifact kind.
pub fn build_plan(
    flags: &FlagSet,
    export_macro: Option<Define>,
    artifact_name: &str,
) -> CompilationPlan {
    let mut groups = vec![
        SourceGroup {
            kind: GroupKind::Core,
            sources: CORE_SOURCES,
            define: None,
        },
        SourceGroup {
            kind: GroupKind::CApi,
            sources: C_API_SOURCES,
            define: None,
        },
    ];
    let mut defines = Vec::new();

    for spec in CAPABILITY_TABLE.iter() {
        if !flags.is_enabled(spec.capability) {
            continue;
        }
        let define = spec.define();
        if let Some(ref d) = define {
            defines.push(d.clone());
        }
        groups.push(SourceGroup {
            kind: GroupKind::Capability(spec.capability),
            sources: spec.sources,
            define,
        });
    }

    if flags.use_standard_container_types {
        defines.push(Define::flag(FORCE_STL_MACRO));
    }

    if let Some(export) = export_macro {
        defines.push(export);
    }

    // The matching -fno-exceptions flag comes from the flag assembler
    if flags.exceptions_as_assertions {
        defines.push(Define::flag(ASSERTIONS_MACRO));
    }

    tracing::debug!(
        "planned {} group(s), {} unit(s), {} define(s)",
        groups.len(),
        groups.iter().map(|g| g.sources.len()).sum::<usize>(),
        defines.len()
    );

    CompilationPlan {
        groups,
        defines,
        artifact: ArtifactDescriptor::new(flags.artifact_kind, artifact_name),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::flags::{ArtifactKind, Capabilities};

    fn kinds(plan: &CompilationPlan) -> Vec<GroupKind> {
        plan.groups.iter().map(|g| g.kind).collect()
    }

    #[test]
    fn test_core_and_c_api_always_first() {
        let flags = FlagSet::new().with_capabilities(Capabilities::none());
        let plan = build_plan(&flags, None, "spirv-cross");

        assert_eq!(kinds(&plan), vec![GroupKind::Core, GroupKind::CApi]);
        assert_eq!(plan.groups[0].sources.len(), 4);
        assert!(plan.defines.is_empty());
    }

    #[test]
    fn test_full_plan_order() {
        let plan = build_plan(&FlagSet::new(), None, "spirv-cross");
        assert_eq!(
            kinds(&plan),
            vec![
                GroupKind::Core,
                GroupKind::CApi,
                GroupKind::Capability(Capability::Glsl),
                GroupKind::Capability(Capability::Hlsl),
                GroupKind::Capability(Capability::Msl),
                GroupKind::Capability(Capability::Cpp),
                GroupKind::Capability(Capability::Reflect),
                GroupKind::Capability(Capability::Util),
            ]
        );
        assert_eq!(plan.source_count(), 11);
        assert_eq!(
            plan.define_flags(),
            vec![
                "-DSPIRV_CROSS_C_API_GLSL=1",
                "-DSPIRV_CROSS_C_API_HLSL=1",
                "-DSPIRV_CROSS_C_API_MSL=1",
                "-DSPIRV_CROSS_C_API_CPP=1",
                "-DSPIRV_CROSS_C_API_REFLECT=1",
            ]
        );
    }

    #[test]
    fn test_order_independent_of_how_flags_were_set() {
        let forward = FlagSet::new()
            .with_capabilities(Capabilities::none())
            .with_capability(Capability::Glsl, true)
            .with_capability(Capability::Msl, true)
            .with_capability(Capability::Util, true);
        let backward = FlagSet::new()
            .with_capabilities(Capabilities::none())
            .with_capability(Capability::Util, true)
            .with_capability(Capability::Msl, true)
            .with_capability(Capability::Glsl, true);

        let a = build_plan(&forward, None, "spirv-cross");
        let b = build_plan(&backward, None, "spirv-cross");
        assert_eq!(a, b);
        assert_eq!(
            a.capabilities().collect::<Vec<_>>(),
            vec![Capability::Glsl, Capability::Msl, Capability::Util]
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let flags = FlagSet::new()
            .with_standard_container_types(true)
            .with_exceptions_as_assertions(true);
        let a = serde_json::to_vec(&build_plan(&flags, None, "spirv-cross")).unwrap();
        let b = serde_json::to_vec(&build_plan(&flags, None, "spirv-cross")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_global_macro_order() {
        let flags = FlagSet::new()
            .with_capabilities(Capabilities::none().with(Capability::Glsl, true))
            .with_artifact_kind(ArtifactKind::Shared)
            .with_standard_container_types(true)
            .with_exceptions_as_assertions(true);
        let export = Define::key_value("SPVC_PUBLIC_API", "__declspec(dllexport)");
        let plan = build_plan(&flags, Some(export.clone()), "spirv-cross");

        assert_eq!(
            plan.defines,
            vec![
                Define::key_value("SPIRV_CROSS_C_API_GLSL", "1"),
                Define::flag(FORCE_STL_MACRO),
                export,
                Define::flag(ASSERTIONS_MACRO),
            ]
        );
        assert_eq!(plan.artifact.kind, ArtifactKind::Shared);
    }

    #[test]
    fn test_no_duplicate_units_or_macros() {
        let flags = FlagSet::new()
            .with_standard_container_types(true)
            .with_exceptions_as_assertions(true);
        let plan = build_plan(&flags, Some(Define::flag("EXPORT")), "spirv-cross");

        let units: HashSet<_> = plan.sources().collect();
        assert_eq!(units.len(), plan.source_count());

        let macros: HashSet<_> = plan.defines.iter().map(Define::name).collect();
        assert_eq!(macros.len(), plan.defines.len());
    }

    #[test]
    fn test_util_group_has_no_macro() {
        let flags = FlagSet::new()
            .with_capabilities(Capabilities::none().with(Capability::Util, true));
        let plan = build_plan(&flags, None, "spirv-cross");

        let util = plan.groups.last().unwrap();
        assert_eq!(util.kind, GroupKind::Capability(Capability::Util));
        assert_eq!(util.sources, &["spirv_cross_util.cpp"]);
        assert!(util.define.is_none());
        assert!(plan.defines.is_empty());
    }
}
