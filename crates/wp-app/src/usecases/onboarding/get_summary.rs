use std::sync::Arc;

use wp_core::ports::OnboardingStorePort;
use wp_core::{Milestone, OnboardingState, TourCatalog, UserId};

use super::{OnboardingSummaryDto, TourProgressDto};

/// Use case for summarising a user's onboarding progress.
pub struct GetOnboardingSummary {
    store: Arc<dyn OnboardingStorePort>,
    catalog: Arc<TourCatalog>,
}

impl GetOnboardingSummary {
    pub fn new(store: Arc<dyn OnboardingStorePort>, catalog: Arc<TourCatalog>) -> Self {
        Self { store, catalog }
    }

    pub fn from_ports(store: Arc<dyn OnboardingStorePort>, catalog: Arc<TourCatalog>) -> Self {
        Self::new(store, catalog)
    }

    pub async fn execute(&self, user: &UserId) -> anyhow::Result<OnboardingSummaryDto> {
        let state = self.store.get_or_create(user).await?;
        Ok(summarize(&self.catalog, &state))
    }
}

pub(crate) fn summarize(catalog: &TourCatalog, state: &OnboardingState) -> OnboardingSummaryDto {
    let tours = catalog
        .iter()
        .map(|definition| TourProgressDto {
            tour_id: definition.id,
            title: definition.title.clone(),
            step_count: definition.len(),
            completed: state.is_tour_completed(definition.id),
        })
        .collect();

    OnboardingSummaryDto {
        completed_tours: state.completed_count(),
        total_tours: OnboardingState::total_tours(),
        tours,
        milestones: Milestone::ALL
            .iter()
            .map(|milestone| (*milestone, state.has_milestone(*milestone)))
            .collect(),
    }
}
