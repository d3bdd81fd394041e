//! Planning orchestration.
//!
//! validate -> export macro -> compilation plan -> toolchain flags.
//! A constraint violation stops the pass before any plan is assembled.

use serde::Serialize;

use crate::builder::export::export_macro_for;
use crate::builder::flags::assemble_flags;
use crate::builder::plan::{build_plan, CompilationPlan};
use crate::builder::validation::{validate, ConstraintViolation};
use crate::core::artifact::DEFAULT_ARTIFACT_NAME;
use crate::core::flags::FlagSet;
use crate::core::platform::Platform;
use crate::util::hash::Fingerprint;

/// Inputs for one planning pass.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub flags: FlagSet,
    pub platform: Platform,
    pub artifact_name: String,
}

impl PlanRequest {
    /// Plan for the host platform with the default artifact name.
    pub fn new(flags: FlagSet) -> Self {
        PlanRequest {
            flags,
            platform: Platform::host(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self
    }
}

/// Everything the artifact emitter needs, computed from a valid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedBuild {
    pub flags: FlagSet,
    pub platform: Platform,
    pub plan: CompilationPlan,
    pub toolchain_flags: Vec<String>,
}

impl PlannedBuild {
    /// Stable identity of this configuration.
    ///
    /// Two builds share a fingerprint only if they compile the same units
    /// with the same macros and flags for the same artifact and platform.
    pub fn fingerprint(&self) -> String {
        let defines = self.plan.define_flags();
        let platform = self.platform.to_string();

        let mut fp = Fingerprint::new();
        fp.update_section("platform", [platform.as_str()])
            .update_section(
                "artifact",
                [self.plan.artifact.kind.as_str(), self.plan.artifact.name.as_str()],
            )
            .update_section("sources", self.plan.sources())
            .update_section("defines", defines.iter().map(String::as_str))
            .update_section("flags", self.toolchain_flags.iter().map(String::as_str));
        fp.finish_short()
    }
}

/// Run one planning pass.
pub fn plan(request: &PlanRequest) -> Result<PlannedBuild, ConstraintViolation> {
    let flags = &request.flags;

    validate(flags)?;

    let export = export_macro_for(&request.platform, flags.artifact_kind);
    let plan = build_plan(flags, export, &request.artifact_name);
    let toolchain_flags = assemble_flags(flags.build_mode, flags.exceptions_as_assertions);

    tracing::debug!(
        "planned {} for {} ({} mode)",
        plan.artifact.kind,
        request.platform,
        flags.build_mode
    );

    Ok(PlannedBuild {
        flags: *flags,
        platform: request.platform.clone(),
        plan,
        toolchain_flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::plan::GroupKind;
    use crate::core::capability::Capability;
    use crate::core::define::Define;
    use crate::core::flags::{ArtifactKind, BuildMode, Capabilities};

    fn linux() -> Platform {
        Platform::parse("x86_64-unknown-linux-gnu").unwrap()
    }

    #[test]
    fn test_glsl_hlsl_release_static() {
        let flags = FlagSet::new()
            .with_capabilities(
                Capabilities::none()
                    .with(Capability::Glsl, true)
                    .with(Capability::Hlsl, true),
            )
            .with_build_mode(BuildMode::Release)
            .with_artifact_kind(ArtifactKind::Static);

        let build = plan(&PlanRequest::new(flags).with_platform(linux())).unwrap();

        let kinds: Vec<_> = build.plan.groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![
                GroupKind::Core,
                GroupKind::CApi,
                GroupKind::Capability(Capability::Glsl),
                GroupKind::Capability(Capability::Hlsl),
            ]
        );
        assert_eq!(
            build.plan.defines,
            vec![
                Define::key_value("SPIRV_CROSS_C_API_GLSL", "1"),
                Define::key_value("SPIRV_CROSS_C_API_HLSL", "1"),
            ]
        );
        assert_eq!(
            build.toolchain_flags,
            vec!["-g0", "-std=c++11", "-Wall", "-Wextra", "-Wshadow", "-Wno-deprecated"]
        );
        assert!(!build.plan.defines.iter().any(|d| d.name() == "SPVC_PUBLIC_API"));
    }

    #[test]
    fn test_glsl_disabled_hlsl_enabled_fails_before_planning() {
        let flags = FlagSet::new().with_capabilities(
            Capabilities::none().with(Capability::Hlsl, true),
        );

        let err = plan(&PlanRequest::new(flags)).unwrap_err();
        assert_eq!(err.dependent, Capability::Hlsl);
        assert_eq!(err.prerequisite, Capability::Glsl);
    }

    #[test]
    fn test_exceptions_as_assertions_adds_macro_and_flag() {
        let flags = FlagSet::new().with_exceptions_as_assertions(true);
        let build = plan(&PlanRequest::new(flags)).unwrap();

        assert_eq!(
            build.toolchain_flags.last().map(String::as_str),
            Some("-fno-exceptions")
        );
        assert_eq!(
            build.plan.defines.last(),
            Some(&Define::flag("SPIRV_CROSS_EXCEPTIONS_TO_ASSERTIONS"))
        );
    }

    #[test]
    fn test_shared_windows_gets_dllexport() {
        let flags = FlagSet::new().with_artifact_kind(ArtifactKind::Shared);
        let request = PlanRequest::new(flags)
            .with_platform(Platform::parse("x86_64-pc-windows-msvc").unwrap());
        let build = plan(&request).unwrap();

        assert!(build
            .plan
            .define_flags()
            .contains(&"-DSPVC_PUBLIC_API=__declspec(dllexport)".to_string()));
    }

    #[test]
    fn test_fingerprint_tracks_configuration() {
        let request = PlanRequest::new(FlagSet::new()).with_platform(linux());
        let a = plan(&request).unwrap();
        let b = plan(&request).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());

        let release = plan(&PlanRequest {
            flags: FlagSet::new().with_build_mode(BuildMode::Release),
            ..request.clone()
        })
        .unwrap();
        assert_ne!(a.fingerprint(), release.fingerprint());

        let renamed = plan(&request.clone().with_artifact_name("spvc")).unwrap();
        assert_ne!(a.fingerprint(), renamed.fingerprint());
    }
}
