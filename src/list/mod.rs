//! Paginated list controller shared by every resource screen.
//!
//! [`ListService`] owns the query and the published [`ListState`]. Screens
//! drive it through a cloneable [`ListClient`] and watch the state.

mod client;
mod service;
mod state;

pub use client::ListClient;
pub use service::ListService;
pub use state::ListState;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("List service unavailable: {0}")]
    ServiceUnavailable(String),
}
