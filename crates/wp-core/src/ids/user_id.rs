use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Authenticated user identifier.
///
/// Onboarding records are keyed by this value; it is opaque to the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id!(UserId);
