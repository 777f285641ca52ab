use crate::domain::PageRequest;
use crate::form::Notice;

/// Snapshot of a list screen, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<V> {
    pub rows: Vec<V>,
    pub total_items: u64,
    pub total_pages: u64,
    /// Page the rows belong to, or are being fetched for while `loading`.
    pub page: PageRequest,
    pub loading: bool,
    /// Transient message about the last failed fetch.
    pub notice: Option<Notice>,
    /// Sequence number of the newest fetch issued.
    pub requested: u64,
    /// Sequence number of the fetch the rows came from.
    pub applied: u64,
}

impl<V> ListState<V> {
    pub fn new(page: PageRequest) -> Self {
        Self {
            rows: Vec::new(),
            total_items: 0,
            total_pages: 0,
            page,
            loading: false,
            notice: None,
            requested: 0,
            applied: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<V> Default for ListState<V> {
    fn default() -> Self {
        Self::new(PageRequest::default())
    }
}
