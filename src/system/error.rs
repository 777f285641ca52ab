use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("Failed to build transport: {0}")]
    Transport(#[from] TransportError),
    #[error("Service task failed: {0}")]
    TaskFailed(String),
}
