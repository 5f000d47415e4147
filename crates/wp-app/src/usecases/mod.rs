//! Application use cases

pub mod onboarding;
pub mod tour;
