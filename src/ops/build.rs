//! Build orchestration.
//!
//! Plans the configuration and hands the result to an artifact emitter.
//! An invalid configuration never reaches the emitter.

use anyhow::Result;
use serde::Serialize;

use crate::builder::emitter::{Artifact, ArtifactEmitter};
use crate::ops::plan::{plan, PlanRequest, PlannedBuild};

/// Result of a completed build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub build: PlannedBuild,
    pub artifact: Artifact,
}

/// Plan `request`, then emit it.
///
/// A constraint violation is returned as the error's root cause so callers
/// can downcast it and render the full diagnostic.
pub fn build(request: &PlanRequest, emitter: &dyn ArtifactEmitter) -> Result<BuildOutcome> {
    let planned = plan(request)?;
    emit(planned, emitter)
}

/// Emit an already validated plan.
///
/// Callers that need to set up the emitter (toolchain detection and the
/// like) plan first, so a bad flag set is reported before any of that runs.
pub fn emit(planned: PlannedBuild, emitter: &dyn ArtifactEmitter) -> Result<BuildOutcome> {
    tracing::info!(
        "Building {} ({}, {}) for {} [{}]",
        planned.plan.artifact.name,
        planned.plan.artifact.kind,
        planned.flags.build_mode,
        planned.platform,
        planned.fingerprint()
    );

    let artifact = emitter.emit(&planned)?;

    Ok(BuildOutcome {
        build: planned,
        artifact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    use crate::builder::validation::ConstraintViolation;
    use crate::core::capability::Capability;
    use crate::core::flags::{ArtifactKind, Capabilities, FlagSet};
    use crate::core::platform::Platform;

    /// Records every build it is handed.
    #[derive(Default)]
    struct RecordingEmitter {
        seen: RefCell<Vec<PlannedBuild>>,
    }

    impl ArtifactEmitter for RecordingEmitter {
        fn emit(&self, build: &PlannedBuild) -> Result<Artifact> {
            self.seen.borrow_mut().push(build.clone());
            Ok(Artifact {
                name: build.plan.artifact.name.clone(),
                kind: build.plan.artifact.kind,
                path: PathBuf::from("out").join(build.plan.artifact.output_filename(&build.platform)),
                commands: Vec::new(),
            })
        }
    }

    fn linux() -> Platform {
        Platform::parse("x86_64-unknown-linux-gnu").unwrap()
    }

    #[test]
    fn test_valid_request_reaches_emitter() {
        let emitter = RecordingEmitter::default();
        let request = PlanRequest::new(FlagSet::new().with_artifact_kind(ArtifactKind::Shared))
            .with_platform(linux());

        let outcome = build(&request, &emitter).unwrap();
        assert_eq!(outcome.artifact.path, PathBuf::from("out/libspirv-cross.so"));
        assert_eq!(emitter.seen.borrow().len(), 1);
        assert_eq!(emitter.seen.borrow()[0], outcome.build);
    }

    #[test]
    fn test_violation_stops_before_emitter() {
        let emitter = RecordingEmitter::default();
        let flags = FlagSet::new().with_capability(Capability::Glsl, false);
        let request = PlanRequest::new(flags).with_platform(linux());

        let err = build(&request, &emitter).unwrap_err();
        let violation = err.downcast_ref::<ConstraintViolation>().unwrap();
        assert_eq!(violation.dependent, Capability::Hlsl);
        assert!(emitter.seen.borrow().is_empty());
    }

    #[test]
    fn test_minimal_configuration_builds() {
        let emitter = RecordingEmitter::default();
        let request =
            PlanRequest::new(FlagSet::new().with_capabilities(Capabilities::none())).with_platform(linux());

        let outcome = build(&request, &emitter).unwrap();
        assert_eq!(outcome.build.plan.source_count(), 5);
    }

    #[test]
    fn test_emit_skips_planning() {
        let emitter = RecordingEmitter::default();
        let planned = plan(&PlanRequest::new(FlagSet::new()).with_platform(linux())).unwrap();

        let outcome = emit(planned.clone(), &emitter).unwrap();
        assert_eq!(outcome.build, planned);
        assert_eq!(emitter.seen.borrow().len(), 1);
    }
}
