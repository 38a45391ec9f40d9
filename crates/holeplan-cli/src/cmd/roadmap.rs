//! `hp roadmap`: milestone roadmap for the implementation order.

use std::path::Path;

use clap::Args;
use holeplan_triage::Milestone;
use holeplan_triage::roadmap::render_roadmap;
use serde::Serialize;

use super::{InputArgs, load_analysis};
use crate::output::{OutputMode, render};

/// Arguments for `hp roadmap`.
#[derive(Args, Debug, Clone)]
pub struct RoadmapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Hide the suggested implementation under each hole.
    #[arg(long)]
    pub no_suggestions: bool,
}

#[derive(Debug, Serialize)]
struct RoadmapOutput<'a> {
    milestones: &'a [Milestone],
    circular_deps: &'a [Vec<String>],
    unscheduled: Vec<&'a str>,
    critical_path: Vec<&'a str>,
    critical_path_complexity: u64,
    #[serde(skip)]
    text: String,
}

/// Execute `hp roadmap`.
pub fn run_roadmap(
    args: &RoadmapArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let (analysis, config) = load_analysis(&args.input, config_path, output, project_root)?;

    let mut roadmap_config = config.roadmap;
    if args.no_suggestions {
        roadmap_config.show_suggestions = false;
    }

    let payload = RoadmapOutput {
        milestones: &analysis.milestones,
        circular_deps: &analysis.circular_deps,
        unscheduled: analysis.unscheduled().into_iter().map(|h| h.id.as_str()).collect(),
        critical_path: analysis.critical_path.iter().map(|h| h.id.as_str()).collect(),
        critical_path_complexity: analysis.critical_path_complexity(),
        text: render_roadmap(&analysis, &roadmap_config),
    };

    render(output, &payload, |p, w| w.write_all(p.text.as_bytes()))
}
