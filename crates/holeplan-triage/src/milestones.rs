//! Grouping of the implementation order into delivery milestones.
//!
//! Holes are taken greedily in order. A milestone closes once its summed
//! complexity reaches `complexity_threshold` or it holds `max_holes` holes.
//! A hole that would push a non-empty milestone past the threshold opens
//! the next one instead, so only a single hole can exceed the threshold on
//! its own. Concatenating the milestones always gives back the input order.

use holeplan_core::EnhancedHole;
use holeplan_core::config::MilestoneConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contiguous slice of the implementation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub holes: Vec<EnhancedHole>,
    pub total_complexity: u64,
}

impl Milestone {
    fn push(&mut self, hole: EnhancedHole) {
        self.total_complexity += u64::from(hole.complexity);
        self.holes.push(hole);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }
}

/// Partition `order` into milestones.
///
/// A `max_holes` of zero is treated as one.
#[must_use]
pub fn group_into_milestones(order: &[EnhancedHole], config: &MilestoneConfig) -> Vec<Milestone> {
    let threshold = u64::from(config.complexity_threshold);
    let max_holes = config.max_holes.max(1);

    let mut milestones: Vec<Milestone> = Vec::new();
    let mut current = Milestone::default();

    for hole in order {
        let cost = u64::from(hole.complexity);
        if !current.is_empty() && current.total_complexity + cost > threshold {
            milestones.push(std::mem::take(&mut current));
        }

        current.push(hole.clone());

        if current.total_complexity >= threshold || current.len() >= max_holes {
            milestones.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        milestones.push(current);
    }

    debug!(holes = order.len(), milestones = milestones.len(), "grouped milestones");
    milestones
}
