//! `crossplan plan` command

use anyhow::Result;

use crate::cli::{OutputFormat, PlanArgs};
use crossplan::ops::{plan, PlannedBuild};

pub fn execute(args: PlanArgs) -> Result<()> {
    let config = super::load_settings()?;
    let request = super::plan_request(&config, &args.config)?;

    let planned = plan(&request)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&planned)?),
        OutputFormat::Text => print_plan(&planned),
    }

    Ok(())
}

fn print_plan(planned: &PlannedBuild) {
    let plan = &planned.plan;

    println!(
        "{} ({}, {}) for {}",
        plan.artifact.output_filename(&planned.platform),
        plan.artifact.kind,
        planned.flags.build_mode,
        planned.platform
    );
    println!("fingerprint: {}", planned.fingerprint());

    println!();
    println!("Source groups:");
    for group in &plan.groups {
        match &group.define {
            Some(define) => println!("  {} [{}]", group.kind.label(), define),
            None => println!("  {}", group.kind.label()),
        }
        for source in group.sources {
            println!("    {}", source);
        }
    }

    println!();
    println!("Macros:");
    if plan.defines.is_empty() {
        println!("  (none)");
    }
    for define in &plan.defines {
        println!("  {}", define);
    }

    println!();
    println!("Toolchain flags:");
    println!("  {}", planned.toolchain_flags.join(" "));
}
