use serde::{Deserialize, Serialize};

use super::Milestone;
use crate::tour::TourId;

/// Persisted onboarding record, one per user.
///
/// An absent record means "all flags false", which is exactly `Default`.
/// Unknown or missing fields deserialize to `false` so older records keep
/// loading after new tours are added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingState {
    pub welcome_tour_completed: bool,
    pub dashboard_tour_completed: bool,
    pub campaign_tour_completed: bool,
    pub leads_tour_completed: bool,
    pub templates_tour_completed: bool,
    pub accounts_tour_completed: bool,
    pub autopilot_tour_completed: bool,
    pub first_campaign_created: bool,
    pub first_email_sent: bool,
    pub first_reply_received: bool,
}

impl OnboardingState {
    fn tour_flag_mut(&mut self, tour: TourId) -> &mut bool {
        match tour {
            TourId::Welcome => &mut self.welcome_tour_completed,
            TourId::Dashboard => &mut self.dashboard_tour_completed,
            TourId::Campaign => &mut self.campaign_tour_completed,
            TourId::Leads => &mut self.leads_tour_completed,
            TourId::Templates => &mut self.templates_tour_completed,
            TourId::Accounts => &mut self.accounts_tour_completed,
            TourId::Autopilot => &mut self.autopilot_tour_completed,
        }
    }

    fn milestone_flag_mut(&mut self, milestone: Milestone) -> &mut bool {
        match milestone {
            Milestone::FirstCampaignCreated => &mut self.first_campaign_created,
            Milestone::FirstEmailSent => &mut self.first_email_sent,
            Milestone::FirstReplyReceived => &mut self.first_reply_received,
        }
    }

    pub fn is_tour_completed(&self, tour: TourId) -> bool {
        match tour {
            TourId::Welcome => self.welcome_tour_completed,
            TourId::Dashboard => self.dashboard_tour_completed,
            TourId::Campaign => self.campaign_tour_completed,
            TourId::Leads => self.leads_tour_completed,
            TourId::Templates => self.templates_tour_completed,
            TourId::Accounts => self.accounts_tour_completed,
            TourId::Autopilot => self.autopilot_tour_completed,
        }
    }

    pub fn set_tour_completed(&mut self, tour: TourId, completed: bool) {
        *self.tour_flag_mut(tour) = completed;
    }

    pub fn has_milestone(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::FirstCampaignCreated => self.first_campaign_created,
            Milestone::FirstEmailSent => self.first_email_sent,
            Milestone::FirstReplyReceived => self.first_reply_received,
        }
    }

    pub fn set_milestone(&mut self, milestone: Milestone, reached: bool) {
        *self.milestone_flag_mut(milestone) = reached;
    }

    /// Number of tours flagged completed. Never exceeds [`Self::total_tours`].
    pub fn completed_count(&self) -> usize {
        TourId::ALL
            .into_iter()
            .filter(|tour| self.is_tour_completed(*tour))
            .count()
    }

    pub fn total_tours() -> usize {
        TourId::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_every_flag_false() {
        let state = OnboardingState::default();
        assert_eq!(state.completed_count(), 0);
        for tour in TourId::ALL {
            assert!(!state.is_tour_completed(tour));
        }
        for milestone in Milestone::ALL {
            assert!(!state.has_milestone(milestone));
        }
    }

    #[test]
    fn test_each_tour_owns_a_distinct_flag() {
        for tour in TourId::ALL {
            let mut state = OnboardingState::default();
            state.set_tour_completed(tour, true);
            assert_eq!(state.completed_count(), 1);
            for other in TourId::ALL.into_iter().filter(|t| *t != tour) {
                assert!(!state.is_tour_completed(other));
            }
        }
    }

    #[test]
    fn test_completed_count_never_exceeds_total() {
        let mut state = OnboardingState::default();
        for tour in TourId::ALL {
            state.set_tour_completed(tour, true);
            state.set_tour_completed(tour, true);
        }
        assert_eq!(state.completed_count(), OnboardingState::total_tours());
    }

    #[test]
    fn test_missing_fields_deserialize_as_false() {
        let state: OnboardingState =
            serde_json::from_str(r#"{"welcome_tour_completed":true}"#).unwrap();
        assert!(state.welcome_tour_completed);
        assert!(!state.first_email_sent);
    }
}
