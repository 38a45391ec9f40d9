//! Plain-text implementation roadmap.
//!
//! Pure formatting over a finished [`HoleAnalysis`]: cycle warnings, totals,
//! one section per milestone, the holes left unscheduled and the critical
//! path summary.

use std::fmt::Write as FmtWrite;

use holeplan_core::config::RoadmapConfig;

use crate::analyze::HoleAnalysis;

/// Render `analysis` as a roadmap.
#[must_use]
pub fn render_roadmap(analysis: &HoleAnalysis, config: &RoadmapConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Typed Hole Implementation Roadmap ===\n");

    if analysis.has_cycles() {
        let _ = writeln!(out, "WARNING: Circular dependencies detected!");
        for (i, cycle) in analysis.circular_deps.iter().enumerate() {
            let _ = writeln!(out, "  Cycle {}: {}", i + 1, cycle.join(" -> "));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Total Holes: {}", analysis.holes.len());
    let _ = writeln!(out, "Total Complexity: {}", analysis.total_complexity);
    let _ = writeln!(out, "Average Priority: {:.1}\n", analysis.average_priority);

    for (i, milestone) in analysis.milestones.iter().enumerate() {
        let _ = writeln!(out, "Milestone {}:", i + 1);
        for (j, hole) in milestone.holes.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} (Priority: {}, Complexity: {})",
                j + 1,
                hole.hole_type,
                hole.priority,
                hole.complexity
            );
            if !hole.constraint.is_empty() {
                let _ = writeln!(out, "     Constraints: {}", hole.constraint);
            }
            if config.show_suggestions && !hole.suggested_impl.is_empty() {
                let _ = writeln!(out, "     Suggestion: {}", hole.suggested_impl);
            }
            if !hole.dependencies.is_empty() {
                let _ = writeln!(out, "     Dependencies: {}", hole.dependencies.len());
            }
        }
        out.push('\n');
    }

    let blocked = analysis.unscheduled();
    if !blocked.is_empty() {
        let _ = writeln!(out, "Unscheduled (blocked by circular dependencies):");
        for hole in blocked {
            let _ = writeln!(out, "  - {}", hole.id);
        }
        out.push('\n');
    }

    if !analysis.critical_path.is_empty() {
        let _ = writeln!(out, "Critical Path:");
        for (i, hole) in analysis.critical_path.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} (Complexity: {})",
                i + 1,
                hole.hole_type,
                hole.complexity
            );
        }
        let _ = writeln!(
            out,
            "\nCritical Path Total Complexity: {}",
            analysis.critical_path_complexity()
        );
    }

    out
}
