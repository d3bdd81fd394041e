//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crossplan::core::{ArtifactKind, Capability, Platform};

/// crossplan - build configuration planner for the SPIRV-Cross C API library
#[derive(Parser)]
#[command(name = "crossplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration and print the compilation plan
    Plan(PlanArgs),

    /// Plan and compile the library
    Build(BuildArgs),

    /// Show the compiler flags and macro definitions
    Flags(FlagsArgs),

    /// Show what a capability compiles and what it depends on
    Explain(ExplainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options that shape the flag set. Shared by every planning command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Plan a release build
    #[arg(short, long)]
    pub release: bool,

    /// Artifact kind (static, shared)
    #[arg(long, value_name = "KIND")]
    pub kind: Option<ArtifactKind>,

    /// Map exceptions to assertions and compile without exceptions
    #[arg(long)]
    pub exceptions_as_assertions: bool,

    /// Force standard-library container types
    #[arg(long)]
    pub force_stl: bool,

    /// Leave out the GLSL backend
    #[arg(long)]
    pub disable_glsl: bool,

    /// Leave out the HLSL backend
    #[arg(long)]
    pub disable_hlsl: bool,

    /// Leave out the MSL backend
    #[arg(long)]
    pub disable_msl: bool,

    /// Leave out the C++ backend
    #[arg(long)]
    pub disable_cpp: bool,

    /// Leave out the reflection backend
    #[arg(long)]
    pub disable_reflect: bool,

    /// Leave out the utility helpers
    #[arg(long)]
    pub disable_util: bool,

    /// Target triple to plan for (defaults to the host)
    #[arg(long, value_name = "TRIPLE")]
    pub target: Option<Platform>,

    /// Artifact base name
    #[arg(long)]
    pub name: Option<String>,
}

impl ConfigArgs {
    /// Capabilities switched off on the command line.
    pub fn disabled(&self) -> impl Iterator<Item = Capability> {
        [
            (Capability::Glsl, self.disable_glsl),
            (Capability::Hlsl, self.disable_hlsl),
            (Capability::Msl, self.disable_msl),
            (Capability::Cpp, self.disable_cpp),
            (Capability::Reflect, self.disable_reflect),
            (Capability::Util, self.disable_util),
        ]
        .into_iter()
        .filter_map(|(cap, disabled)| disabled.then_some(cap))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory holding the SPIRV-Cross sources
    #[arg(long, value_name = "DIR", env = "CROSSPLAN_SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory for objects and the artifact
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Emit compile_commands.json
    #[arg(long)]
    pub emit_compile_commands: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show compiler flags only
    #[arg(long, conflicts_with = "defines")]
    pub compile: bool,

    /// Show macro definitions only
    #[arg(long)]
    pub defines: bool,
}

#[derive(Args)]
pub struct ExplainArgs {
    /// Capability to explain (glsl, hlsl, msl, cpp, reflect, util)
    pub capability: Capability,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
