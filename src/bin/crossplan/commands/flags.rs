//! `crossplan flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use crossplan::ops::plan;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let config = super::load_settings()?;
    let request = super::plan_request(&config, &args.config)?;

    let planned = plan(&request)?;

    if !args.defines {
        for flag in &planned.toolchain_flags {
            println!("{}", flag);
        }
    }

    if !args.compile {
        for flag in planned.plan.define_flags() {
            println!("{}", flag);
        }
    }

    Ok(())
}
