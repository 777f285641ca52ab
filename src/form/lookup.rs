use tracing::instrument;

use crate::clients::ResourceClient;
use crate::error::ApiError;
use crate::resource::Resource;

/// Autocomplete source: searches one column and returns the first page of
/// matches.
pub struct Lookup<R: Resource> {
    client: ResourceClient<R>,
    field: R::Filter,
}

impl<R: Resource> Clone for Lookup<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            field: self.field,
        }
    }
}

impl<R: Resource> Lookup<R> {
    pub fn new(client: ResourceClient<R>, field: R::Filter) -> Self {
        Self { client, field }
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn find(&self, text: &str) -> Result<Vec<R::Item>, ApiError> {
        self.client.search(self.field, text).await
    }
}
