//! `hp analyze`: run the full pipeline and report the aggregate result.

use std::io::Write;
use std::path::Path;

use clap::Args;
use holeplan_triage::HoleAnalysis;

use super::{InputArgs, load_analysis};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `hp analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `hp analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let (analysis, _) = load_analysis(&args.input, config_path, output, project_root)?;
    render_mode(output, &analysis, render_text, render_pretty)
}

fn critical_path_line(analysis: &HoleAnalysis) -> String {
    if analysis.critical_path.is_empty() {
        return "(none)".to_string();
    }
    let ids: Vec<&str> = analysis.critical_path.iter().map(|h| h.id.as_str()).collect();
    format!("{} ({})", ids.join(" -> "), analysis.critical_path_complexity())
}

fn render_text(analysis: &HoleAnalysis, w: &mut dyn Write) -> std::io::Result<()> {
    let strong = analysis.dependencies.iter().filter(|e| e.is_strong()).count();
    writeln!(w, "holes={}", analysis.holes.len())?;
    writeln!(w, "edges={} strong={strong}", analysis.dependencies.len())?;
    writeln!(w, "scheduled={}", analysis.implement_order.len())?;
    writeln!(w, "cycles={}", analysis.circular_deps.len())?;
    writeln!(w, "total_complexity={}", analysis.total_complexity)?;
    writeln!(w, "average_priority={:.1}", analysis.average_priority)?;
    writeln!(w, "critical_path={}", critical_path_line(analysis))
}

fn render_pretty(analysis: &HoleAnalysis, w: &mut dyn Write) -> std::io::Result<()> {
    let strong = analysis.dependencies.iter().filter(|e| e.is_strong()).count();
    pretty_section(w, "Hole analysis")?;
    pretty_kv(w, "Holes", analysis.holes.len().to_string())?;
    pretty_kv(
        w,
        "Dependencies",
        format!("{} ({strong} strong)", analysis.dependencies.len()),
    )?;
    pretty_kv(
        w,
        "Scheduled",
        format!("{}/{}", analysis.implement_order.len(), analysis.holes.len()),
    )?;
    pretty_kv(w, "Total complexity", analysis.total_complexity.to_string())?;
    pretty_kv(w, "Average priority", format!("{:.1}", analysis.average_priority))?;
    pretty_kv(w, "Milestones", analysis.milestones.len().to_string())?;
    pretty_kv(w, "Critical path", critical_path_line(analysis))?;

    if analysis.has_cycles() {
        writeln!(w)?;
        writeln!(w, "⚠ circular dependencies:")?;
        for cycle in &analysis.circular_deps {
            writeln!(w, "    {}", cycle.join(" → "))?;
        }
    }
    Ok(())
}
