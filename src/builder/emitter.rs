//! Artifact emission.
//!
//! The emitter is the only part of the crate that touches the compiler. It
//! receives a finished [`PlannedBuild`] and turns it into compile commands
//! plus one archive or link command. Translation units compile in parallel;
//! the final archive/link step runs once all objects exist.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::builder::toolchain::{ArchiveInput, CommandSpec, CompileInput, LinkInput, Toolchain};
use crate::core::flags::ArtifactKind;
use crate::ops::plan::PlannedBuild;
use crate::util::fs::{ensure_dir, normalize_path, write_string};
use crate::util::process::ProcessBuilder;

/// Consumes a planned build and produces the library artifact.
pub trait ArtifactEmitter {
    fn emit(&self, build: &PlannedBuild) -> Result<Artifact>;
}

/// A produced (or, for dry runs, would-be) library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub name: String,
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// Commands that produce it, in execution order
    pub commands: Vec<CommandSpec>,
}

/// Emitter settings.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Directory holding the library's source units and headers
    pub source_dir: PathBuf,
    /// Directory for objects and the final artifact
    pub out_dir: PathBuf,
    /// Number of parallel compile jobs (None = one per core)
    pub jobs: Option<usize>,
    /// Render the commands without running them
    pub dry_run: bool,
    /// Suppress the progress bar
    pub verbose: bool,
    /// Where to write compile_commands.json, if anywhere
    pub compile_commands: Option<PathBuf>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            source_dir: PathBuf::from("."),
            out_dir: PathBuf::from("target").join("crossplan"),
            jobs: None,
            dry_run: false,
            verbose: false,
            compile_commands: None,
        }
    }
}

/// A single compilation step.
#[derive(Debug, Clone)]
pub struct CompileStep {
    /// Source file
    pub source: PathBuf,
    /// Output object file
    pub output: PathBuf,
    /// Fully rendered compiler invocation
    pub command: CommandSpec,
}

/// Every command needed to produce the artifact, in execution order.
#[derive(Debug, Clone)]
pub struct EmitSteps {
    pub compiles: Vec<CompileStep>,
    /// Archive (static) or link (shared) command
    pub finalize: CommandSpec,
    pub output: PathBuf,
}

/// Emitter that drives a GCC-style toolchain directly.
pub struct NativeEmitter<T: Toolchain> {
    toolchain: T,
    opts: EmitOptions,
}

impl<T: Toolchain> NativeEmitter<T> {
    pub fn new(toolchain: T, opts: EmitOptions) -> Self {
        NativeEmitter { toolchain, opts }
    }

    /// Directory that holds objects for this exact configuration.
    pub fn object_dir(&self, build: &PlannedBuild) -> PathBuf {
        self.opts.out_dir.join("obj").join(build.fingerprint())
    }

    /// Render every command for a planned build without running anything.
    pub fn steps(&self, build: &PlannedBuild) -> EmitSteps {
        let obj_dir = self.object_dir(build);
        let plan = &build.plan;

        let mut cflags = build.toolchain_flags.clone();
        if plan.artifact.kind == ArtifactKind::Shared && !build.platform.is_windows_family() {
            if let Some(pic) = self.toolchain.pic_flag() {
                cflags.push(pic.to_string());
            }
        }

        let defines: Vec<_> = plan.defines.iter().map(|d| d.to_pair()).collect();

        let compiles: Vec<CompileStep> = plan
            .sources()
            .map(|unit| {
                let source = self.opts.source_dir.join(unit);
                let stem = Path::new(unit)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| unit.to_string());
                let output =
                    obj_dir.join(format!("{}.{}", stem, self.toolchain.object_extension()));

                let input = CompileInput {
                    source: source.clone(),
                    output: output.clone(),
                    include_dirs: vec![self.opts.source_dir.clone()],
                    defines: defines.clone(),
                    cflags: cflags.clone(),
                };

                CompileStep {
                    source,
                    output,
                    command: self.toolchain.compile_command(&input),
                }
            })
            .collect();

        let output = self
            .opts
            .out_dir
            .join(plan.artifact.output_filename(&build.platform));
        let objects: Vec<PathBuf> = compiles.iter().map(|c| c.output.clone()).collect();

        let finalize = match plan.artifact.kind {
            ArtifactKind::Static => self.toolchain.archive_command(&ArchiveInput {
                objects,
                output: output.clone(),
            }),
            ArtifactKind::Shared => self.toolchain.link_shared_command(&LinkInput {
                objects,
                output: output.clone(),
                ldflags: Vec::new(),
            }),
        };

        EmitSteps {
            compiles,
            finalize,
            output,
        }
    }

    /// Source units the plan needs that are not present on disk.
    pub fn missing_sources(&self, steps: &EmitSteps) -> Vec<PathBuf> {
        steps
            .compiles
            .iter()
            .filter(|s| !s.source.is_file())
            .map(|s| s.source.clone())
            .collect()
    }

    fn compile_all(&self, steps: &EmitSteps) -> Result<()> {
        let total = steps.compiles.len();
        tracing::info!(
            "Compiling {} translation unit(s) with {} ({})",
            total,
            self.toolchain.cxx_compiler_path().display(),
            self.toolchain.platform().as_str()
        );

        let pb = if !self.opts.verbose && total > 1 {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.opts.jobs.unwrap_or(0))
            .build()
            .context("failed to create compile thread pool")?;

        let results: Vec<Result<()>> = pool.install(|| {
            steps
                .compiles
                .par_iter()
                .map(|step| {
                    let result = self.compile(step);
                    if let Some(pb) = &pb {
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        });

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        for result in results {
            result?;
        }

        Ok(())
    }

    /// Compile a single source file.
    fn compile(&self, step: &CompileStep) -> Result<()> {
        if let Some(parent) = step.output.parent() {
            ensure_dir(parent)?;
        }

        tracing::debug!("{}", step.command.display());

        let output = process_builder_from_spec(&step.command).exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "compilation failed for {}\n{}",
                step.source.display(),
                stderr
            );
        }

        Ok(())
    }

    fn finalize(&self, steps: &EmitSteps) -> Result<()> {
        if let Some(parent) = steps.output.parent() {
            ensure_dir(parent)?;
        }

        tracing::debug!("{}", steps.finalize.display());

        process_builder_from_spec(&steps.finalize)
            .exec_and_check()
            .with_context(|| format!("failed to produce {}", steps.output.display()))?;

        Ok(())
    }
}

impl<T: Toolchain> ArtifactEmitter for NativeEmitter<T> {
    fn emit(&self, build: &PlannedBuild) -> Result<Artifact> {
        let start = Instant::now();
        let steps = self.steps(build);

        let artifact = Artifact {
            name: build.plan.artifact.name.clone(),
            kind: build.plan.artifact.kind,
            path: steps.output.clone(),
            commands: steps
                .compiles
                .iter()
                .map(|c| c.command.clone())
                .chain(std::iter::once(steps.finalize.clone()))
                .collect(),
        };

        if let Some(path) = &self.opts.compile_commands {
            write_compile_commands(path, &steps, &self.opts.source_dir)?;
            tracing::info!("Wrote {}", path.display());
        }

        let missing = self.missing_sources(&steps);

        if self.opts.dry_run {
            if !missing.is_empty() {
                tracing::warn!(
                    "{} source unit(s) not found under {}",
                    missing.len(),
                    self.opts.source_dir.display()
                );
            }
            return Ok(artifact);
        }

        if !missing.is_empty() {
            let list: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "{} source unit(s) not found under {}:\n  {}\n\
                 help: point --source-dir at a SPIRV-Cross checkout",
                missing.len(),
                self.opts.source_dir.display(),
                list.join("\n  ")
            );
        }

        self.compile_all(&steps)?;
        self.finalize(&steps)?;

        tracing::info!(
            "Finished {} in {:.2}s",
            artifact.path.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(artifact)
    }
}

fn process_builder_from_spec(spec: &CommandSpec) -> ProcessBuilder {
    ProcessBuilder::new(&spec.program).args(&spec.args)
}

/// compile_commands.json entry.
#[derive(Debug, Serialize, Deserialize)]
struct CompileCommand {
    directory: String,
    file: String,
    arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

/// Write a compilation database for the planned units.
pub fn write_compile_commands(path: &Path, steps: &EmitSteps, directory: &Path) -> Result<()> {
    let directory = normalize_path(directory).display().to_string();

    let commands: Vec<CompileCommand> = steps
        .compiles
        .iter()
        .map(|step| {
            let mut arguments = Vec::with_capacity(step.command.args.len() + 1);
            arguments.push(step.command.program.display().to_string());
            arguments.extend(step.command.args.iter().cloned());

            CompileCommand {
                directory: directory.clone(),
                file: step.source.display().to_string(),
                arguments,
                output: Some(step.output.display().to_string()),
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&commands)?;
    write_string(path, &json)
}
