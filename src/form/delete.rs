use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::clients::ResourceClient;
use crate::list::ListError;
use crate::resource::Resource;

/// Something a delete dialog can ask to refresh once it closes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reload: Send + Sync {
    /// Requests a fresh page and returns the sequence number of that fetch.
    async fn reload(&self) -> Result<u64, ListError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The dialog stays open showing this message.
    Failed(String),
}

/// Single confirmation step in front of a `DELETE`.
pub struct DeleteDialog<R: Resource> {
    client: ResourceClient<R>,
    id: String,
    origin: Box<dyn Reload>,
    open: bool,
    message: Option<String>,
}

impl<R: Resource> DeleteDialog<R> {
    pub fn new(client: ResourceClient<R>, id: impl Into<String>, origin: Box<dyn Reload>) -> Self {
        Self {
            client,
            id: id.into(),
            origin,
            open: true,
            message: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Message of the last failed attempt.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[instrument(skip(self), fields(resource = R::NAME, id = %self.id))]
    pub async fn confirm(&mut self) -> DeleteOutcome {
        match self.client.delete(&self.id).await {
            Ok(()) => {
                info!("Entity deleted");
                self.close().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!(error = %e, "Delete failed");
                let message = e.user_message();
                self.message = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Closes without deleting. The originating list is refreshed as well.
    #[instrument(skip(self), fields(resource = R::NAME, id = %self.id))]
    pub async fn cancel(&mut self) {
        self.close().await;
    }

    async fn close(&mut self) {
        self.open = false;
        self.message = None;
        if let Err(e) = self.origin.reload().await {
            warn!(error = %e, "Failed to reload the originating list");
        }
    }
}
