use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Milestone, OnboardingState};
use crate::tour::TourId;

/// Partial update of an [`OnboardingState`].
///
/// Fields not named in the patch are left untouched when applied, so a tour
/// reset never disturbs other tours or milestones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPatch {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tours: BTreeMap<TourId, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub milestones: BTreeMap<Milestone, bool>,
}

impl OnboardingPatch {
    pub fn tour(tour: TourId, completed: bool) -> Self {
        Self::default().with_tour(tour, completed)
    }

    pub fn milestone(milestone: Milestone, reached: bool) -> Self {
        Self::default().with_milestone(milestone, reached)
    }

    pub fn with_tour(mut self, tour: TourId, completed: bool) -> Self {
        self.tours.insert(tour, completed);
        self
    }

    pub fn with_milestone(mut self, milestone: Milestone, reached: bool) -> Self {
        self.milestones.insert(milestone, reached);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty() && self.milestones.is_empty()
    }

    pub fn apply(&self, state: &mut OnboardingState) {
        for (tour, completed) in &self.tours {
            state.set_tour_completed(*tour, *completed);
        }
        for (milestone, reached) in &self.milestones {
            state.set_milestone(*milestone, *reached);
        }
    }

    /// Whether applying the patch would leave `state` unchanged.
    pub fn is_noop_for(&self, state: &OnboardingState) -> bool {
        self.tours
            .iter()
            .all(|(tour, completed)| state.is_tour_completed(*tour) == *completed)
            && self
                .milestones
                .iter()
                .all(|(milestone, reached)| state.has_milestone(*milestone) == *reached)
    }
}
