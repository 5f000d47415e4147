//! Identifier newtypes.

mod id_macro;
mod user_id;

pub use user_id::UserId;
