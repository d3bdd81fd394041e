//! Export-visibility macro selection.
//!
//! Shared builds annotate the public C API with the platform's export
//! attribute. The mapping is a two-way branch: Windows-family targets get
//! `__declspec(dllexport)`, everything else (including OS names this crate
//! has never heard of) gets the default-visibility attribute.

use crate::core::define::Define;
use crate::core::flags::ArtifactKind;
use crate::core::platform::Platform;

/// Macro the public C API headers use to mark exported functions.
pub const EXPORT_MACRO: &str = "SPVC_PUBLIC_API";

pub const WINDOWS_EXPORT_ATTRIBUTE: &str = "__declspec(dllexport)";
pub const DEFAULT_VISIBILITY_ATTRIBUTE: &str = "__attribute__((visibility(\"default\")))";

/// Pick the export macro for a platform and artifact kind.
///
/// Static artifacts never need one.
pub fn export_macro_for(platform: &Platform, kind: ArtifactKind) -> Option<Define> {
    match kind {
        ArtifactKind::Static => None,
        ArtifactKind::Shared => {
            let attribute = if platform.is_windows_family() {
                WINDOWS_EXPORT_ATTRIBUTE
            } else {
                DEFAULT_VISIBILITY_ATTRIBUTE
            };
            Some(Define::key_value(EXPORT_MACRO, attribute))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIPLES: &[&str] = &[
        "x86_64-pc-windows-msvc",
        "x86_64-w64-mingw32",
        "x86_64-unknown-linux-gnu",
        "aarch64-apple-darwin",
        "wasm32-unknown-emscripten",
        "sparc64-unknown-plan9",
    ];

    #[test]
    fn test_static_never_exports() {
        for triple in TRIPLES {
            let platform = Platform::parse(triple).unwrap();
            assert_eq!(export_macro_for(&platform, ArtifactKind::Static), None);
        }
    }

    #[test]
    fn test_shared_windows_uses_dllexport() {
        for triple in [
            "x86_64-pc-windows-msvc",
            "x86_64-w64-mingw32",
            "i686-pc-cygwin",
            "i686-pc-win32",
        ] {
            let platform = Platform::parse(triple).unwrap();
            let define = export_macro_for(&platform, ArtifactKind::Shared).unwrap();
            assert_eq!(
                define.to_flag(),
                "-DSPVC_PUBLIC_API=__declspec(dllexport)",
                "{}",
                triple
            );
        }
    }

    #[test]
    fn test_shared_elsewhere_uses_visibility_attribute() {
        for triple in &TRIPLES[2..] {
            let platform = Platform::parse(triple).unwrap();
            let define = export_macro_for(&platform, ArtifactKind::Shared).unwrap();
            assert_eq!(define.name(), EXPORT_MACRO);
            assert_eq!(define.value(), Some(DEFAULT_VISIBILITY_ATTRIBUTE));
        }
    }
}
