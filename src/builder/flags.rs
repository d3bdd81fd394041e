//! Toolchain flag assembly.
//!
//! The output order is fixed: debug-symbol suppression, language standard,
//! warning policy, exception policy. Some drivers care about where the
//! standard flag sits relative to later flags, so callers must not reorder.

use crate::core::flags::BuildMode;

/// Suppresses debug information (release builds only).
pub const NO_DEBUG_SYMBOLS: &str = "-g0";

/// Language standard the library is written against.
pub const LANGUAGE_STANDARD: &str = "-std=c++11";

/// Warning policy, applied in every mode.
pub const WARNING_FLAGS: &[&str] = &["-Wall", "-Wextra", "-Wshadow", "-Wno-deprecated"];

/// Disables C++ exceptions (paired with the assertions macro).
pub const NO_EXCEPTIONS: &str = "-fno-exceptions";

/// Assemble compiler flags for a build mode and exception policy.
pub fn assemble_flags(mode: BuildMode, exceptions_as_assertions: bool) -> Vec<String> {
    let mut flags = Vec::with_capacity(WARNING_FLAGS.len() + 3);

    if mode == BuildMode::Release {
        flags.push(NO_DEBUG_SYMBOLS.to_string());
    }

    flags.push(LANGUAGE_STANDARD.to_string());
    flags.extend(WARNING_FLAGS.iter().map(|f| f.to_string()));

    if exceptions_as_assertions {
        flags.push(NO_EXCEPTIONS.to_string());
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_starts_with_no_debug() {
        let flags = assemble_flags(BuildMode::Release, false);
        assert_eq!(flags.first().map(String::as_str), Some(NO_DEBUG_SYMBOLS));
        assert_eq!(
            flags,
            vec!["-g0", "-std=c++11", "-Wall", "-Wextra", "-Wshadow", "-Wno-deprecated"]
        );
    }

    #[test]
    fn test_debug_omits_no_debug() {
        let flags = assemble_flags(BuildMode::Debug, false);
        assert!(!flags.iter().any(|f| f == NO_DEBUG_SYMBOLS));
        assert_eq!(flags[0], LANGUAGE_STANDARD);
    }

    #[test]
    fn test_exceptions_flag_is_last() {
        for mode in [BuildMode::Debug, BuildMode::Release] {
            let flags = assemble_flags(mode, true);
            assert_eq!(flags.last().map(String::as_str), Some(NO_EXCEPTIONS));
            assert_eq!(flags.iter().filter(|f| *f == NO_EXCEPTIONS).count(), 1);

            let flags = assemble_flags(mode, false);
            assert!(!flags.iter().any(|f| f == NO_EXCEPTIONS));
        }
    }

    #[test]
    fn test_standard_precedes_warnings() {
        let flags = assemble_flags(BuildMode::Release, true);
        let std_pos = flags.iter().position(|f| f == LANGUAGE_STANDARD).unwrap();
        for warning in WARNING_FLAGS {
            let pos = flags.iter().position(|f| f == warning).unwrap();
            assert!(std_pos < pos);
        }
    }
}
