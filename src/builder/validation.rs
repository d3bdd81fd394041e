//! Capability prerequisite validation.
//!
//! Checked exactly once per planning pass, before any plan is assembled.
//! The first violated edge (in [`DEPENDENCY_EDGES`] order) is reported;
//! violations are not aggregated.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::capability::{Capability, DEPENDENCY_EDGES};
use crate::core::flags::FlagSet;
use crate::util::diagnostic::Diagnostic;

/// An enabled capability whose prerequisite is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("capability `{dependent}` requires `{prerequisite}`, which is disabled")]
#[diagnostic(code(crossplan::config::constraint_violation))]
pub struct ConstraintViolation {
    pub dependent: Capability,
    pub prerequisite: Capability,
}

impl ConstraintViolation {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(format!("invalid capability selection: {}", self))
            .with_context(format!(
                "`{}` is only available when `{}` is enabled",
                self.dependent, self.prerequisite
            ))
            .with_suggestion(format!(
                "Enable `{}` (drop `--disable-{}`)",
                self.prerequisite, self.prerequisite
            ))
            .with_suggestion(format!(
                "Disable `{}` as well (`--disable-{}`)",
                self.dependent, self.dependent
            ))
    }
}

/// Check the flag set against every prerequisite edge.
pub fn validate(flags: &FlagSet) -> Result<(), ConstraintViolation> {
    for edge in DEPENDENCY_EDGES.iter() {
        if flags.is_enabled(edge.dependent) && !flags.is_enabled(edge.prerequisite) {
            return Err(ConstraintViolation {
                dependent: edge.dependent,
                prerequisite: edge.prerequisite,
            });
        }
    }
    Ok(())
}
