use std::marker::PhantomData;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument, warn, Instrument};

use super::{ListClient, ListState};
use crate::clients::ResourceClient;
use crate::config::{ClientConfig, ErrorPolicy};
use crate::domain::{Page, PageRequest};
use crate::error::ApiError;
use crate::form::Notice;
use crate::messages::ListRequest;
use crate::resource::{FilterField, QueryOf, Resource};

/// Result of one page fetch, tagged with its sequence number.
struct Completion<T> {
    seq: u64,
    result: Result<Page<T>, ApiError>,
}

/// Remote-backed, paginated, filterable list for one resource.
///
/// Filter and sort edits wait for a quiet period before fetching. Page moves
/// and reloads fetch at once. Every fetch gets a new sequence number and only
/// the newest one may change the published state.
pub struct ListService<R: Resource, V> {
    receiver: mpsc::Receiver<ListRequest<R::Filter, R::Sort>>,
    client: ResourceClient<R>,
    state: watch::Sender<ListState<V>>,
    query: QueryOf<R>,
    debounce: Duration,
    policy: ErrorPolicy,
    sequence: u64,
    deadline: Option<Instant>,
    completions_tx: mpsc::UnboundedSender<Completion<R::Item>>,
    completions: mpsc::UnboundedReceiver<Completion<R::Item>>,
    _rows: PhantomData<fn() -> V>,
}

impl<R, V> ListService<R, V>
where
    R: Resource,
    V: From<R::Item> + Clone + Send + Sync + 'static,
{
    pub fn new(client: ResourceClient<R>, config: &ClientConfig) -> (Self, ListClient<R, V>) {
        // `mpsc::channel` panics on a zero capacity.
        let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let page = PageRequest::first(config.page_size);
        let (state, state_rx) = watch::channel(ListState::new(page));
        let (completions_tx, completions) = mpsc::unbounded_channel();

        let service = Self {
            receiver,
            client,
            state,
            query: QueryOf::<R>::new(page),
            debounce: config.debounce,
            policy: config.error_policy,
            sequence: 0,
            deadline: None,
            completions_tx,
            completions,
            _rows: PhantomData,
        };
        (service, ListClient::new(sender, state_rx))
    }

    #[instrument(name = "list_service", skip(self), fields(resource = R::PATH))]
    pub async fn run(mut self) {
        info!("ListService starting");
        self.fetch();

        loop {
            let deadline = self.deadline;
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(request) => {
                        if !self.handle(request) {
                            break;
                        }
                    }
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.apply(completion),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    debug!("Debounce window elapsed");
                    self.fetch();
                }
            }
        }

        info!("ListService stopped");
    }

    /// Returns `false` once the service should stop.
    fn handle(&mut self, request: ListRequest<R::Filter, R::Sort>) -> bool {
        match request {
            ListRequest::SetFilter { field, value } => {
                debug!(field = field.param(), value = %value, "Filter changed");
                self.query.filter = Some((field, value));
                self.query.page.index = 0;
                self.schedule();
            }
            ListRequest::ClearFilter => {
                debug!("Filter cleared");
                self.query.filter = None;
                self.query.page.index = 0;
                self.schedule();
            }
            ListRequest::SetSort { sort } => {
                debug!(sort = ?sort, "Sort changed");
                self.query.sort = sort;
                self.schedule();
            }
            ListRequest::SetPage { page, respond_to } => {
                debug!(index = page.index, size = page.size, "Page changed");
                self.query.page = page;
                self.deadline = None;
                let seq = self.fetch();
                let _ = respond_to.send(seq);
            }
            ListRequest::Reload { respond_to } => {
                self.deadline = None;
                let seq = self.fetch();
                let _ = respond_to.send(seq);
            }
            ListRequest::Shutdown => {
                info!("ListService shutting down");
                return false;
            }
        }
        true
    }

    /// Restarts the quiet period.
    fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// Issues a fetch for the current query in the background.
    fn fetch(&mut self) -> u64 {
        self.sequence += 1;
        let seq = self.sequence;
        let page = self.query.page;
        self.state.send_modify(|state| {
            state.loading = true;
            state.requested = seq;
            state.page = page;
        });

        debug!(seq, params = ?self.query.to_params(), "Fetching page");
        let client = self.client.clone();
        let query = self.query.clone();
        let completions = self.completions_tx.clone();
        tokio::spawn(
            async move {
                let result = client.page(&query).await;
                let _ = completions.send(Completion { seq, result });
            }
            .in_current_span(),
        );
        seq
    }

    fn apply(&mut self, completion: Completion<R::Item>) {
        let Completion { seq, result } = completion;
        if seq != self.sequence {
            debug!(seq, latest = self.sequence, "Discarding stale response");
            return;
        }

        match result {
            Ok(page) => {
                debug!(seq, items = page.items.len(), total_items = page.total_items, "Page loaded");
                let page = page.map(V::from);
                self.state.send_modify(|state| {
                    state.rows = page.items;
                    state.total_items = page.total_items;
                    state.total_pages = page.total_pages;
                    state.loading = false;
                    state.notice = None;
                    state.applied = seq;
                });
            }
            Err(e) => {
                warn!(seq, error = %e, policy = %self.policy, "Failed to load page");
                let notice = match self.policy {
                    ErrorPolicy::Surface => Some(Notice::list_failure(&e)),
                    ErrorPolicy::Swallow => None,
                };
                self.state.send_modify(|state| {
                    state.rows.clear();
                    state.total_items = 0;
                    state.total_pages = 0;
                    state.loading = false;
                    state.notice = notice;
                    state.applied = seq;
                });
            }
        }
    }
}
