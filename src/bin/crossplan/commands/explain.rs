//! `crossplan explain` command

use anyhow::Result;

use crate::cli::ExplainArgs;

pub fn execute(args: ExplainArgs) -> Result<()> {
    let cap = args.capability;

    println!("{}", cap);

    println!("  sources:");
    for source in cap.sources() {
        println!("    {}", source);
    }

    match cap.define() {
        Some(define) => println!("  macro: {}", define),
        None => println!("  macro: (none)"),
    }

    let requires: Vec<_> = cap.prerequisites().map(|c| c.to_string()).collect();
    if requires.is_empty() {
        println!("  requires: (nothing)");
    } else {
        println!("  requires: {}", requires.join(", "));
    }

    let required_by: Vec<_> = cap.dependents().map(|c| c.to_string()).collect();
    if !required_by.is_empty() {
        println!("  required by: {}", required_by.join(", "));
    }

    Ok(())
}
