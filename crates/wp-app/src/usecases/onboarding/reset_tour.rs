use std::sync::Arc;

use wp_core::ports::OnboardingStorePort;
use wp_core::{OnboardingPatch, TourId, UserId};

/// Use case for clearing one tour's completion flag.
///
/// Other tours and all milestones are left untouched.
pub struct ResetTour {
    store: Arc<dyn OnboardingStorePort>,
}

impl ResetTour {
    pub fn new(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self { store }
    }

    pub fn from_ports(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self::new(store)
    }

    pub async fn execute(&self, user: &UserId, tour: TourId) -> anyhow::Result<()> {
        self.store
            .set_fields(user, &OnboardingPatch::tour(tour, false))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::test_support::{user, MockStore};

    #[tokio::test]
    async fn test_execute_only_touches_requested_tour() {
        let mut store = MockStore::new();
        store
            .expect_set_fields()
            .withf(|_, patch| {
                patch.tours.len() == 1
                    && patch.tours.get(&TourId::Welcome) == Some(&false)
                    && patch.milestones.is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        ResetTour::new(Arc::new(store))
            .execute(&user(), TourId::Welcome)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_execute_propagates_write_failure() {
        let mut store = MockStore::new();
        store
            .expect_set_fields()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));

        let err = ResetTour::new(Arc::new(store))
            .execute(&user(), TourId::Welcome)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
    }
}
