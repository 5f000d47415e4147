use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a built-in tour.
///
/// Every variant owns exactly one completion flag in
/// [`OnboardingState`](crate::onboarding::OnboardingState); the mapping is an
/// exhaustive `match`, so adding a variant without a flag does not compile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TourId {
    Welcome,
    Dashboard,
    Campaign,
    Leads,
    Templates,
    Accounts,
    Autopilot,
}

impl TourId {
    pub const ALL: [TourId; 7] = [
        TourId::Welcome,
        TourId::Dashboard,
        TourId::Campaign,
        TourId::Leads,
        TourId::Templates,
        TourId::Accounts,
        TourId::Autopilot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TourId::Welcome => "welcome",
            TourId::Dashboard => "dashboard",
            TourId::Campaign => "campaign",
            TourId::Leads => "leads",
            TourId::Templates => "templates",
            TourId::Accounts => "accounts",
            TourId::Autopilot => "autopilot",
        }
    }
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tour: {0}")]
pub struct ParseTourIdError(pub String);

impl FromStr for TourId {
    type Err = ParseTourIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TourId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTourIdError(s.to_string()))
    }
}
