use std::sync::Arc;

use wp_core::ports::OnboardingStorePort;
use wp_core::{OnboardingPatch, TourId, UserId};

/// Use case for recording a tour as completed.
///
/// Always writes `completed[tour] = true`, even if the flag is already set.
/// Repeating the call repeats the identical write.
pub struct MarkTourCompleted {
    store: Arc<dyn OnboardingStorePort>,
}

impl MarkTourCompleted {
    pub fn new(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self { store }
    }

    pub fn from_ports(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self::new(store)
    }

    pub async fn execute(&self, user: &UserId, tour: TourId) -> anyhow::Result<()> {
        self.store
            .set_fields(user, &OnboardingPatch::tour(tour, true))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::test_support::{user, MockStore};

    #[tokio::test]
    async fn test_execute_writes_single_completion_flag() {
        let mut store = MockStore::new();
        store
            .expect_set_fields()
            .withf(|u, patch| {
                *u == user() && *patch == OnboardingPatch::tour(TourId::Campaign, true)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        MarkTourCompleted::new(Arc::new(store))
            .execute(&user(), TourId::Campaign)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_repeated_calls_issue_identical_writes() {
        let mut store = MockStore::new();
        store
            .expect_set_fields()
            .withf(|_, patch| *patch == OnboardingPatch::tour(TourId::Leads, true))
            .times(2)
            .returning(|_, _| Ok(()));

        let use_case = MarkTourCompleted::new(Arc::new(store));
        use_case.execute(&user(), TourId::Leads).await.unwrap();
        use_case.execute(&user(), TourId::Leads).await.unwrap();
    }
}
