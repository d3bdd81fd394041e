//! crossplan - build configuration planner for the SPIRV-Cross C API library
//!
//! Turns a set of feature toggles into a validated compilation plan: the
//! source units to compile, the preprocessor macros to define, the export
//! macro for the target platform, and the compiler flags. The emitter can
//! then drive a GCC-style toolchain to produce the library.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use builder::{CompilationPlan, ConstraintViolation};
pub use core::{capability::Capability, flags::FlagSet, platform::Platform};
pub use ops::{plan, PlanRequest, PlannedBuild};
