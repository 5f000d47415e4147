use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One-way behavioural flag used to gate onboarding prompts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    FirstCampaignCreated,
    FirstEmailSent,
    FirstReplyReceived,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [
        Milestone::FirstCampaignCreated,
        Milestone::FirstEmailSent,
        Milestone::FirstReplyReceived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::FirstCampaignCreated => "first_campaign_created",
            Milestone::FirstEmailSent => "first_email_sent",
            Milestone::FirstReplyReceived => "first_reply_received",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown milestone: {0}")]
pub struct ParseMilestoneError(pub String);

impl FromStr for Milestone {
    type Err = ParseMilestoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Milestone::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ParseMilestoneError(s.to_string()))
    }
}
