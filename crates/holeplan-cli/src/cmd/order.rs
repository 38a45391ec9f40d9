//! `hp order`: implementation order with ratio scores.

use std::io::Write;
use std::path::Path;

use clap::Args;
use holeplan_core::EnhancedHole;
use serde::Serialize;

use super::{InputArgs, load_analysis};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `hp order`.
#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct OrderEntry {
    position: usize,
    id: String,
    #[serde(rename = "type")]
    hole_type: String,
    priority: u32,
    complexity: u32,
    ratio: f64,
    dependencies: Vec<String>,
}

impl OrderEntry {
    fn new(position: usize, hole: &EnhancedHole) -> Self {
        Self {
            position,
            id: hole.id.clone(),
            hole_type: hole.hole_type.clone(),
            priority: hole.priority,
            complexity: hole.complexity,
            ratio: hole.ratio(),
            dependencies: hole.dependencies.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OrderOutput {
    order: Vec<OrderEntry>,
    unscheduled: Vec<String>,
}

/// Execute `hp order`.
pub fn run_order(
    args: &OrderArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let (analysis, _) = load_analysis(&args.input, config_path, output, project_root)?;
    let payload = OrderOutput {
        order: analysis
            .implement_order
            .iter()
            .enumerate()
            .map(|(i, h)| OrderEntry::new(i + 1, h))
            .collect(),
        unscheduled: analysis.unscheduled().into_iter().map(|h| h.id.clone()).collect(),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &payload.order {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:.2}",
            entry.position, entry.id, entry.priority, entry.complexity, entry.ratio
        )?;
    }
    for id in &payload.unscheduled {
        writeln!(w, "-\t{id}\tunscheduled")?;
    }
    Ok(())
}

fn render_pretty(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Implementation order")?;
    if payload.order.is_empty() {
        writeln!(w, "  (nothing schedulable)")?;
    }
    for entry in &payload.order {
        writeln!(
            w,
            "{:>3}. {:<28} P{:<3} C{:<3} ratio {:.2}",
            entry.position, entry.id, entry.priority, entry.complexity, entry.ratio
        )?;
        if !entry.dependencies.is_empty() {
            writeln!(w, "     after: {}", entry.dependencies.join(", "))?;
        }
    }

    if !payload.unscheduled.is_empty() {
        writeln!(w)?;
        writeln!(w, "⚠ unscheduled (circular dependencies):")?;
        for id in &payload.unscheduled {
            writeln!(w, "    {id}")?;
        }
    }
    Ok(())
}
