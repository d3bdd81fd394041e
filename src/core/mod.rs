//! Core data structures for crossplan.
//!
//! This module contains the foundational types the planner works on:
//! - Capabilities and their static source/macro tables
//! - The immutable flag set for one planning pass
//! - Target platform and artifact identity
//! - Preprocessor defines

pub mod artifact;
pub mod capability;
pub mod define;
pub mod flags;
pub mod platform;

pub use artifact::ArtifactDescriptor;
pub use capability::Capability;
pub use define::Define;
pub use flags::{ArtifactKind, BuildMode, Capabilities, FlagSet};
pub use platform::Platform;
