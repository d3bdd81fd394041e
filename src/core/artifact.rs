//! Artifact descriptor - what the emitter produces.

use serde::{Deserialize, Serialize};

use crate::core::flags::ArtifactKind;
use crate::core::platform::Platform;

/// Default artifact name for the library.
pub const DEFAULT_ARTIFACT_NAME: &str = "spirv-cross";

/// The library artifact to produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    pub name: String,
}

impl ArtifactDescriptor {
    pub fn new(kind: ArtifactKind, name: impl Into<String>) -> Self {
        ArtifactDescriptor {
            kind,
            name: name.into(),
        }
    }

    /// Get the typical file extension for this artifact on a platform.
    pub fn extension(&self, platform: &Platform) -> &'static str {
        match self.kind {
            ArtifactKind::Static => {
                if platform.is_windows_family() && platform.env.as_deref() == Some("msvc") {
                    "lib"
                } else {
                    "a"
                }
            }
            ArtifactKind::Shared => {
                if platform.is_windows_family() {
                    "dll"
                } else if platform.is_apple() {
                    "dylib"
                } else {
                    "so"
                }
            }
        }
    }

    /// Get the typical file prefix for this artifact on a platform.
    pub fn prefix(&self, platform: &Platform) -> &'static str {
        let msvc_style = platform.is_windows_family() && platform.env.as_deref() == Some("msvc");
        match self.kind {
            ArtifactKind::Static if msvc_style => "",
            ArtifactKind::Shared if platform.is_windows_family() => "",
            _ => "lib",
        }
    }

    /// Get the output filename for this artifact.
    pub fn output_filename(&self, platform: &Platform) -> String {
        format!(
            "{}{}.{}",
            self.prefix(platform),
            self.name,
            self.extension(platform)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(triple: &str) -> Platform {
        Platform::parse(triple).unwrap()
    }

    #[test]
    fn test_output_filenames() {
        let st = ArtifactDescriptor::new(ArtifactKind::Static, "spirv-cross");
        let sh = ArtifactDescriptor::new(ArtifactKind::Shared, "spirv-cross");

        let linux = platform("x86_64-unknown-linux-gnu");
        let mac = platform("aarch64-apple-darwin");
        let msvc = platform("x86_64-pc-windows-msvc");
        let mingw = platform("x86_64-w64-mingw32");

        assert_eq!(st.output_filename(&linux), "libspirv-cross.a");
        assert_eq!(sh.output_filename(&linux), "libspirv-cross.so");
        assert_eq!(sh.output_filename(&mac), "libspirv-cross.dylib");
        assert_eq!(st.output_filename(&msvc), "spirv-cross.lib");
        assert_eq!(sh.output_filename(&msvc), "spirv-cross.dll");
        assert_eq!(st.output_filename(&mingw), "libspirv-cross.a");
        assert_eq!(sh.output_filename(&mingw), "spirv-cross.dll");
    }
}
