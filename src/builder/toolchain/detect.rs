//! Toolchain detection functions.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use which::which;

use crate::util::config::ToolchainSettings;

use super::{GccToolchain, ToolchainPlatform};

/// Detect the available toolchain.
///
/// Tries to find a C++ compiler and an archiver with the following priority:
/// 1. `[toolchain]` config settings
/// 2. Environment variables (CXX, CC, AR)
/// 3. PATH search for c++/g++/clang++ and ar/llvm-ar
pub fn detect_toolchain(settings: &ToolchainSettings) -> Result<GccToolchain> {
    let Some(cxx) = find_cxx(settings) else {
        bail!(
            "no C++ compiler found\n\
             \n\
             crossplan requires a GCC-style C++ compiler (g++, clang++, or c++).\n\
             Set the CXX environment variable, set `cxx` under [toolchain] in\n\
             .crossplan/config.toml, or install a compiler."
        )
    };

    let Some(ar) = find_ar(settings) else {
        bail!(
            "no archiver found\n\
             \n\
             Set the AR environment variable or `ar` under [toolchain] in .crossplan/config.toml."
        )
    };

    let family = detect_compiler_family(&cxx);

    tracing::debug!(
        "Using toolchain: cxx={} ({}), ar={}",
        cxx.display(),
        family.as_str(),
        ar.display()
    );

    Ok(GccToolchain::new(cxx, ar, family))
}

fn find_cxx(settings: &ToolchainSettings) -> Option<PathBuf> {
    if let Some(cxx) = &settings.cxx {
        if cxx.exists() {
            return Some(cxx.clone());
        }
        if let Ok(found) = which(cxx) {
            return Some(found);
        }
        tracing::warn!("Configured C++ compiler not found: {}", cxx.display());
    }

    if let Ok(cxx_env) = std::env::var("CXX") {
        return Some(PathBuf::from(cxx_env));
    }

    if let Ok(cc_env) = std::env::var("CC") {
        return Some(GccToolchain::infer_cxx(Path::new(&cc_env)));
    }

    which("c++")
        .or_else(|_| which("g++"))
        .or_else(|_| which("clang++"))
        .ok()
}

fn find_ar(settings: &ToolchainSettings) -> Option<PathBuf> {
    if let Some(ar) = &settings.ar {
        if ar.exists() {
            return Some(ar.clone());
        }
        if let Ok(found) = which(ar) {
            return Some(found);
        }
        tracing::warn!("Configured archiver not found: {}", ar.display());
    }

    if let Ok(ar_env) = std::env::var("AR") {
        return Some(PathBuf::from(ar_env));
    }

    which("ar").or_else(|_| which("llvm-ar")).ok()
}

/// Detect whether the compiler is GCC, Clang, or Apple Clang.
fn detect_compiler_family(cxx: &Path) -> ToolchainPlatform {
    // Check binary name first
    let name = cxx
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if name.contains("clang") {
        return detect_clang_variant(cxx);
    } else if name.contains("g++") || name.contains("gcc") {
        return ToolchainPlatform::Gcc;
    }

    // Try to detect from --version output
    if let Ok(output) = std::process::Command::new(cxx).arg("--version").output() {
        let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if stdout.contains("clang") {
            return detect_clang_variant(cxx);
        }
    }

    // Default to GCC
    ToolchainPlatform::Gcc
}

/// Detect if Clang is Apple Clang or regular Clang.
fn detect_clang_variant(cxx: &Path) -> ToolchainPlatform {
    if let Ok(output) = std::process::Command::new(cxx).arg("--version").output() {
        let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if stdout.contains("apple") {
            return ToolchainPlatform::AppleClang;
        }
    }

    ToolchainPlatform::Clang
}
