use std::sync::Arc;

use tracing::debug;
use wp_core::ports::OnboardingStorePort;
use wp_core::{Milestone, OnboardingPatch, UserId};

/// Use case for recording a behavioural milestone.
///
/// Milestones are one-way: an already reached milestone is not written
/// again. Returns whether a write happened.
pub struct MarkMilestone {
    store: Arc<dyn OnboardingStorePort>,
}

impl MarkMilestone {
    pub fn new(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self { store }
    }

    pub fn from_ports(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self::new(store)
    }

    pub async fn execute(&self, user: &UserId, milestone: Milestone) -> anyhow::Result<bool> {
        let state = self.store.get_or_create(user).await?;
        if state.has_milestone(milestone) {
            debug!(%user, milestone = milestone.as_str(), "milestone already reached");
            return Ok(false);
        }
        self.store
            .set_fields(user, &OnboardingPatch::milestone(milestone, true))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::test_support::{user, MockStore};
    use wp_core::OnboardingState;

    #[tokio::test]
    async fn test_execute_writes_unreached_milestone() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(OnboardingState::default())));
        store
            .expect_set_fields()
            .withf(|_, patch| {
                *patch == OnboardingPatch::milestone(Milestone::FirstEmailSent, true)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let written = MarkMilestone::new(Arc::new(store))
            .execute(&user(), Milestone::FirstEmailSent)
            .await
            .unwrap();

        assert!(written);
    }

    #[tokio::test]
    async fn test_execute_skips_write_when_already_reached() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| {
            Ok(Some(OnboardingState {
                first_email_sent: true,
                ..Default::default()
            }))
        });
        store.expect_set_fields().never();

        let written = MarkMilestone::new(Arc::new(store))
            .execute(&user(), Milestone::FirstEmailSent)
            .await
            .unwrap();

        assert!(!written);
    }
}
