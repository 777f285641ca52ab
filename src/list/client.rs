use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use super::{ListError, ListState};
use crate::domain::{PageRequest, Sort};
use crate::form::Reload;
use crate::messages::ListRequest;
use crate::resource::Resource;

/// Generate fire-and-forget client methods for list requests with automatic tracing.
macro_rules! list_command {
    (fn $method:ident($($param:ident: $param_type:ty),*) => $variant:ident) => {
        #[instrument(skip(self))]
        pub async fn $method(&self, $($param: $param_type),*) -> Result<(), ListError> {
            debug!("Sending request");
            self.send(ListRequest::$variant { $($param,)* }).await
        }
    };
}

/// Handle to a running [`ListService`](super::ListService).
pub struct ListClient<R: Resource, V> {
    sender: mpsc::Sender<ListRequest<R::Filter, R::Sort>>,
    state: watch::Receiver<ListState<V>>,
}

impl<R: Resource, V> Clone for ListClient<R, V> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
        }
    }
}

impl<R: Resource, V: Clone> ListClient<R, V> {
    pub(crate) fn new(
        sender: mpsc::Sender<ListRequest<R::Filter, R::Sort>>,
        state: watch::Receiver<ListState<V>>,
    ) -> Self {
        Self { sender, state }
    }

    list_command!(fn set_filter(field: R::Filter, value: String) => SetFilter);
    list_command!(fn clear_filter() => ClearFilter);
    list_command!(fn set_sort(sort: Option<Sort<R::Sort>>) => SetSort);

    /// Moves to `page` right away and returns the fetch's sequence number.
    #[instrument(skip(self))]
    pub async fn set_page(&self, page: PageRequest) -> Result<u64, ListError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(ListRequest::SetPage { page, respond_to }).await?;
        response.await.map_err(|_| dropped())
    }

    /// Fetches the current page right away and returns the fetch's sequence number.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<u64, ListError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(ListRequest::Reload { respond_to }).await?;
        response.await.map_err(|_| dropped())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ListError> {
        debug!("Sending request");
        self.send(ListRequest::Shutdown).await
    }

    /// Latest published state.
    pub fn state(&self) -> ListState<V> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<V>> {
        self.state.clone()
    }

    /// Waits until the fetch numbered `seq` (or a newer one) has been applied.
    pub async fn wait_for(&self, seq: u64) -> Result<ListState<V>, ListError> {
        let mut state = self.state.clone();
        let current = state
            .wait_for(|current| current.applied >= seq)
            .await
            .map_err(|_| ListError::ServiceUnavailable("List service stopped".to_string()))?;
        Ok(current.clone())
    }

    async fn send(&self, request: ListRequest<R::Filter, R::Sort>) -> Result<(), ListError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| ListError::ServiceUnavailable("List service closed".to_string()))
    }
}

fn dropped() -> ListError {
    ListError::ServiceUnavailable("List service dropped the request".to_string())
}

#[async_trait]
impl<R, V> Reload for ListClient<R, V>
where
    R: Resource,
    V: Clone + Send + Sync + 'static,
{
    async fn reload(&self) -> Result<u64, ListError> {
        ListClient::reload(self).await
    }
}
