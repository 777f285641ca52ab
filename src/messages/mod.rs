use tokio::sync::oneshot;

use crate::domain::{PageRequest, Sort};

/// Response channel for requests that answer.
pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Typed messages a list service accepts. The immediate fetches (`SetPage`,
/// `Reload`) answer with the sequence number of the fetch they issued.
#[derive(Debug)]
pub enum ListRequest<F, S> {
    /// Debounced. Also moves back to the first page.
    SetFilter {
        field: F,
        value: String,
    },
    ClearFilter,
    /// Debounced.
    SetSort {
        sort: Option<Sort<S>>,
    },
    /// Fetches immediately.
    SetPage {
        page: PageRequest,
        respond_to: ServiceResponse<u64>,
    },
    Reload {
        respond_to: ServiceResponse<u64>,
    },
    Shutdown,
}
