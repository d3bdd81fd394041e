//! Toolchain abstraction for the artifact emitter.
//!
//! The planner emits GCC-dialect flags, so the emitter drives GCC-style
//! compilers (GCC, Clang, Apple Clang, zig c++ and friends).
//!
//! Toolchain detection priority:
//! 1. Toolchain section of the config file (`[toolchain]` in `.crossplan/config.toml`)
//! 2. Environment variables (CXX, AR)
//! 3. Auto-detection (searching PATH for common compilers)

use std::path::{Path, PathBuf};

use serde::Serialize;

mod detect;
mod gcc;

pub use detect::detect_toolchain;
pub use gcc::GccToolchain;

/// A command to execute: program and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "g++", "ar")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Render as a single shell-like line for logs and dry runs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| {
            if a.contains(|c: char| c.is_whitespace() || c == '"' || c == '(') {
                format!("'{}'", a)
            } else {
                a.clone()
            }
        }));
        parts.join(" ")
    }
}

/// Input for a compile step.
#[derive(Debug, Clone)]
pub struct CompileInput {
    /// Source file to compile
    pub source: PathBuf,
    /// Output object file
    pub output: PathBuf,
    /// Include directories
    pub include_dirs: Vec<PathBuf>,
    /// Preprocessor defines (name, optional value)
    pub defines: Vec<(String, Option<String>)>,
    /// Compiler flags, in order
    pub cflags: Vec<String>,
}

/// Input for an archive step (creating static library).
#[derive(Debug, Clone)]
pub struct ArchiveInput {
    /// Object files to archive
    pub objects: Vec<PathBuf>,
    /// Output archive file
    pub output: PathBuf,
}

/// Input for a shared library link step.
#[derive(Debug, Clone)]
pub struct LinkInput {
    /// Object files to link
    pub objects: Vec<PathBuf>,
    /// Output shared library
    pub output: PathBuf,
    /// Additional linker flags
    pub ldflags: Vec<String>,
}

/// The family of a GCC-style toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainPlatform {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
}

impl ToolchainPlatform {
    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainPlatform::Gcc => "gcc",
            ToolchainPlatform::Clang => "clang",
            ToolchainPlatform::AppleClang => "apple-clang",
        }
    }
}

/// Trait for toolchain implementations.
///
/// Each toolchain knows how to generate commands for its specific compiler.
pub trait Toolchain: Send + Sync {
    /// Get the toolchain platform.
    fn platform(&self) -> ToolchainPlatform;

    /// Get the C++ compiler path.
    fn cxx_compiler_path(&self) -> &Path;

    /// Generate a compile command for one C++ translation unit.
    fn compile_command(&self, input: &CompileInput) -> CommandSpec;

    /// Generate an archive command (create static library).
    fn archive_command(&self, input: &ArchiveInput) -> CommandSpec;

    /// Generate a link command for a shared library.
    fn link_shared_command(&self, input: &LinkInput) -> CommandSpec;

    /// Flag needed for position-independent objects, if any.
    fn pic_flag(&self) -> Option<&str>;

    /// Get the object file extension.
    fn object_extension(&self) -> &str;
}
