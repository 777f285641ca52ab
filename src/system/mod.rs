//! System orchestration, startup, and shutdown logic.

pub mod admin_system;
pub mod error;
pub mod tracing;

pub use admin_system::*;
pub use error::*;
pub use self::tracing::*;
