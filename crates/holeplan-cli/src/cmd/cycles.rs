//! `hp cycles`: list circular dependencies and the holes they block.

use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;

use super::{InputArgs, load_analysis};
use crate::output::{OutputMode, render};

/// Arguments for `hp cycles`.
#[derive(Args, Debug, Clone)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<String>>,
    unscheduled: Vec<String>,
}

/// Execute `hp cycles`.
pub fn run_cycles(
    args: &CyclesArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let (analysis, _) = load_analysis(&args.input, config_path, output, project_root)?;
    let payload = CyclesOutput {
        unscheduled: analysis.unscheduled().into_iter().map(|h| h.id.clone()).collect(),
        cycles: analysis.circular_deps,
    };
    render(output, &payload, render_cycles_human)
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Dependency cycles ({})", payload.cycles.len())?;
    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for id in cycle {
            writeln!(w, "  - {id}")?;
        }
    }

    writeln!(w, "\nUnscheduled holes ({})", payload.unscheduled.len())?;
    for id in &payload.unscheduled {
        writeln!(w, "  - {id}")?;
    }
    Ok(())
}
