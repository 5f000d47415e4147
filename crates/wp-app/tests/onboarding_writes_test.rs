//! Store contract checks for controller writes.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use wp_core::ports::OnboardingStorePort;
use wp_core::{Milestone, OnboardingPatch, OnboardingState, TourId, UserId};

use common::{user, HarnessBuilder};

mock! {
    pub Store {}

    #[async_trait]
    impl OnboardingStorePort for Store {
        async fn get(&self, user: &UserId) -> anyhow::Result<Option<OnboardingState>>;
        async fn upsert_default(&self, user: &UserId) -> anyhow::Result<OnboardingState>;
        async fn set_fields(&self, user: &UserId, patch: &OnboardingPatch) -> anyhow::Result<()>;
    }
}

fn existing_record() -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_get()
        .with(eq(user()))
        .returning(|_| Ok(Some(OnboardingState::default())));
    store.expect_upsert_default().never();
    store
}

#[tokio::test]
async fn test_mark_tour_completed_twice_repeats_identical_write() {
    let mut store = existing_record();
    store
        .expect_set_fields()
        .with(eq(user()), eq(OnboardingPatch::tour(TourId::Campaign, true)))
        .times(2)
        .returning(|_, _| Ok(()));
    let h = HarnessBuilder::new().store(Arc::new(store)).login().await;

    h.controller.mark_tour_completed(TourId::Campaign).await.unwrap();
    h.controller.mark_tour_completed(TourId::Campaign).await.unwrap();

    assert!(h.controller.is_tour_completed(TourId::Campaign));
    assert_eq!(h.controller.completed_count(), 1);
}

#[tokio::test]
async fn test_finishing_tour_writes_only_its_flag() {
    let mut store = existing_record();
    store
        .expect_set_fields()
        .with(eq(user()), eq(OnboardingPatch::tour(TourId::Accounts, true)))
        .times(1)
        .returning(|_, _| Ok(()));
    let h = HarnessBuilder::new().store(Arc::new(store)).login().await;

    h.controller.start(TourId::Accounts).await.unwrap();
    for _ in 0..common::STEPS_PER_TOUR {
        h.controller.next().await.unwrap();
    }

    assert!(h.controller.state().is_idle());
}

#[tokio::test]
async fn test_reached_milestone_is_not_rewritten() {
    let mut store = existing_record();
    store
        .expect_set_fields()
        .with(
            eq(user()),
            eq(OnboardingPatch::milestone(Milestone::FirstReplyReceived, true)),
        )
        .times(1)
        .returning(|_, _| Ok(()));
    let h = HarnessBuilder::new().store(Arc::new(store)).login().await;

    assert!(h
        .controller
        .mark_milestone(Milestone::FirstReplyReceived)
        .await
        .unwrap());
    assert!(!h
        .controller
        .mark_milestone(Milestone::FirstReplyReceived)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_store_failure_on_login_falls_back_to_defaults() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Err(anyhow::anyhow!("connection refused")));
    let h = HarnessBuilder::new().store(Arc::new(store)).login().await;

    assert_eq!(h.controller.onboarding_state(), OnboardingState::default());
    assert_eq!(h.controller.completed_count(), 0);
}
