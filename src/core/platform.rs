//! Target platform identity.
//!
//! The planner only needs to know which OS family a build targets; the
//! triple is kept whole so the emitter and artifact naming can use it too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target triple components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// CPU architecture (x86_64, aarch64, etc.)
    pub arch: String,
    /// Vendor (unknown, apple, pc, w64, etc.)
    pub vendor: String,
    /// Operating system (linux, darwin, windows, mingw32, etc.)
    pub os: String,
    /// Environment/ABI (gnu, musl, msvc, etc.)
    pub env: Option<String>,
}

impl Platform {
    /// Create a new platform from triple parts.
    pub fn new(arch: &str, vendor: &str, os: &str, env: Option<&str>) -> Self {
        Platform {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            os: os.to_string(),
            env: env.map(|s| s.to_string()),
        }
    }

    /// Detect the host platform.
    pub fn host() -> Self {
        // Use Rust's target triple as approximation
        let arch = std::env::consts::ARCH;
        let os = std::env::consts::OS;

        let (vendor, env) = match os {
            "linux" => ("unknown", Some("gnu")),
            "macos" => ("apple", None),
            "windows" => ("pc", Some("msvc")),
            _ => ("unknown", None),
        };

        Platform::new(arch, vendor, os, env)
    }

    /// Parse a target triple string.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        Some(Platform {
            arch: parts[0].to_string(),
            vendor: parts[1].to_string(),
            os: parts[2].to_string(),
            env: (parts.len() > 3).then(|| parts[3..].join("-")),
        })
    }

    /// Whether the triple names a Windows-family OS.
    pub fn is_windows_family(&self) -> bool {
        let os = self.os.to_lowercase();
        matches!(os.as_str(), "windows" | "win32" | "cygwin") || os.starts_with("mingw")
    }

    /// Whether the triple names an Apple OS.
    pub fn is_apple(&self) -> bool {
        matches!(
            self.os.to_lowercase().as_str(),
            "macos" | "darwin" | "ios" | "tvos" | "watchos" | "visionos"
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.env {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::parse(s).ok_or_else(|| {
            format!(
                "invalid target triple '{}'; expected <arch>-<vendor>-<os>[-<env>]",
                s
            )
        })
    }
}
