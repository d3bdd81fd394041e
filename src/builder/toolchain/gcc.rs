//! GCC/Clang toolchain implementation.

use std::path::{Path, PathBuf};

use super::{ArchiveInput, CommandSpec, CompileInput, LinkInput, Toolchain, ToolchainPlatform};

/// GCC/Clang toolchain (Unix-like systems and MinGW).
#[derive(Debug, Clone)]
pub struct GccToolchain {
    /// Path to the C++ compiler driver
    pub cxx: PathBuf,
    /// Path to the archiver
    pub ar: PathBuf,
    /// Compiler family (gcc, clang, apple-clang)
    pub family: ToolchainPlatform,
}

impl GccToolchain {
    /// Create a new GCC-style toolchain.
    pub fn new(cxx: PathBuf, ar: PathBuf, family: ToolchainPlatform) -> Self {
        GccToolchain { cxx, ar, family }
    }

    /// Infer the C++ driver path from a C compiler path.
    ///
    /// Handles common patterns:
    /// - gcc, x86_64-linux-gnu-gcc -> g++, x86_64-linux-gnu-g++
    /// - clang -> clang++
    /// - cc, /usr/bin/cc -> c++, /usr/bin/c++
    pub fn infer_cxx(cc: &Path) -> PathBuf {
        let cc_str = cc.to_string_lossy();

        // gcc or *-gcc -> g++ or *-g++
        if cc_str.ends_with("gcc") {
            return PathBuf::from(format!("{}++", &cc_str[..cc_str.len() - 2]));
        }

        // clang -> clang++
        if cc_str.ends_with("clang") {
            return PathBuf::from(format!("{}++", cc_str));
        }

        // Only match "cc" when it's a complete basename (not "mycc")
        let is_standalone_cc = cc_str == "cc"
            || cc_str.ends_with("/cc")
            || cc_str.ends_with("\\cc")
            || cc_str.ends_with("-cc");

        if is_standalone_cc {
            return PathBuf::from(format!("{}++", &cc_str[..cc_str.len() - 1]));
        }

        PathBuf::from(format!("{}++", cc_str))
    }
}

impl Toolchain for GccToolchain {
    fn platform(&self) -> ToolchainPlatform {
        self.family
    }

    fn cxx_compiler_path(&self) -> &Path {
        &self.cxx
    }

    fn compile_command(&self, input: &CompileInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cxx);

        // Compile only
        cmd = cmd.arg("-c");

        // Planner flags first, in the order they were assembled
        cmd = cmd.args(input.cflags.iter().cloned());

        for dir in &input.include_dirs {
            cmd = cmd.arg(format!("-I{}", dir.display()));
        }

        for (name, value) in &input.defines {
            match value {
                Some(v) => cmd = cmd.arg(format!("-D{}={}", name, v)),
                None => cmd = cmd.arg(format!("-D{}", name)),
            }
        }

        cmd = cmd.arg(input.source.display().to_string());
        cmd = cmd.arg("-o");
        cmd = cmd.arg(input.output.display().to_string());

        cmd
    }

    fn archive_command(&self, input: &ArchiveInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.ar);

        // Create archive with symbol index, replace files
        cmd = cmd.arg("rcs");
        cmd = cmd.arg(input.output.display().to_string());

        for obj in &input.objects {
            cmd = cmd.arg(obj.display().to_string());
        }

        cmd
    }

    fn link_shared_command(&self, input: &LinkInput) -> CommandSpec {
        // The C++ driver pulls in the C++ runtime
        let mut cmd = CommandSpec::new(&self.cxx);

        if self.family == ToolchainPlatform::AppleClang {
            cmd = cmd.arg("-dynamiclib");
        } else {
            cmd = cmd.arg("-shared");
        }

        cmd = cmd.arg("-o");
        cmd = cmd.arg(input.output.display().to_string());

        for obj in &input.objects {
            cmd = cmd.arg(obj.display().to_string());
        }

        cmd = cmd.args(input.ldflags.iter().cloned());

        cmd
    }

    fn pic_flag(&self) -> Option<&str> {
        Some("-fPIC")
    }

    fn object_extension(&self) -> &str {
        "o"
    }
}
