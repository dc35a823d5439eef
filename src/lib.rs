//! Client state for the Chirper social feed.
//!
//! [`store::Store`] owns the application state and keeps it in step with a
//! [`gateway::Gateway`] (the remote record store) and a
//! [`storage::LocalStorage`] (durable preferences and the signed-in user).

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use store::Store;
