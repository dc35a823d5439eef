//! Typed calls against the backend tables.
//!
//! Each function performs one round trip (plus the lookups it needs) and
//! validates the records it gets back. None of them touch local state.

pub mod chirp;
pub mod followed_user;
pub mod saved_item;
pub mod user_profile;
