//! `crossplan build` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::BuildArgs;
use crossplan::builder::emitter::{EmitOptions, NativeEmitter};
use crossplan::builder::toolchain::{detect_toolchain, GccToolchain, ToolchainPlatform};
use crossplan::ops;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let config = super::load_settings()?;
    let request = super::plan_request(&config, &args.config)?;

    // Reject a bad flag set before touching the toolchain.
    let planned = ops::plan(&request)?;

    let source_dir = args
        .source_dir
        .or_else(|| config.build.source_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let out_dir = args
        .out_dir
        .or_else(|| config.build.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from("target").join("crossplan"));

    let compile_commands = (args.emit_compile_commands || config.build.emit_compile_commands)
        .then(|| out_dir.join("compile_commands.json"));

    let opts = EmitOptions {
        source_dir,
        out_dir,
        jobs: args.jobs.or(config.build.jobs),
        dry_run: args.dry_run,
        verbose,
        compile_commands,
    };

    // A dry run only renders commands, so it never needs a real compiler.
    let toolchain = match detect_toolchain(&config.toolchain) {
        Ok(toolchain) => toolchain,
        Err(_) if args.dry_run => GccToolchain::new(
            config.toolchain.cxx.clone().unwrap_or_else(|| PathBuf::from("c++")),
            config.toolchain.ar.clone().unwrap_or_else(|| PathBuf::from("ar")),
            ToolchainPlatform::Gcc,
        ),
        Err(e) => return Err(e),
    };

    let emitter = NativeEmitter::new(toolchain, opts);
    let outcome = ops::emit(planned, &emitter)?;

    if args.dry_run {
        for command in &outcome.artifact.commands {
            println!("{}", command.display());
        }
    } else {
        println!("{}", outcome.artifact.path.display());
    }

    Ok(())
}
