//! Build configuration planning and artifact emission.
//!
//! The planning stages (validation, export macro, compilation plan and
//! toolchain flags) are pure functions of the flag set and platform. The
//! emitter is the only stage that runs a compiler.

pub mod emitter;
pub mod export;
pub mod flags;
pub mod plan;
pub mod toolchain;
pub mod validation;

pub use emitter::{Artifact, ArtifactEmitter, EmitOptions, NativeEmitter};
pub use export::export_macro_for;
pub use flags::assemble_flags;
pub use plan::{build_plan, CompilationPlan, GroupKind, SourceGroup};
pub use toolchain::{detect_toolchain, CommandSpec, GccToolchain, Toolchain, ToolchainPlatform};
pub use validation::{validate, ConstraintViolation};
