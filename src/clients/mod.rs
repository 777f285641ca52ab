//! REST clients for the `/api/...` collections.
//!
//! [`ResourceClient`] is the generic CRUD client every controller talks to.
//! The named clients (`CustomersClient`, `OrdersClient`, ...) are thin
//! macro-generated wrappers with resource-specific method names.

#[macro_use]
mod macros;
mod customer_client;
mod discount_client;
mod order_client;
mod product_client;

pub use customer_client::CustomersClient;
pub use discount_client::DiscountsClient;
pub use order_client::OrdersClient;
pub use product_client::ProductsClient;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::{Page, PageRequest};
use crate::error::ApiError;
use crate::resource::{PageQuery, QueryOf, Resource};
use crate::transport::{ApiRequest, HttpTransport};

/// Page size used by autocomplete lookups.
pub const LOOKUP_PAGE_SIZE: u32 = 100;

/// Generic CRUD client for one collection.
pub struct ResourceClient<R: Resource> {
    transport: Arc<dyn HttpTransport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.transport.clone())
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn page(&self, query: &QueryOf<R>) -> Result<Page<R::Item>, ApiError> {
        let request = ApiRequest::get(R::PATH).with_query(query.to_params());
        self.send(request).await
    }

    /// First page of matches for an autocomplete lookup.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn search(&self, field: R::Filter, text: &str) -> Result<Vec<R::Item>, ApiError> {
        let query = PageQuery::new(PageRequest::first(LOOKUP_PAGE_SIZE)).with_filter(field, text);
        Ok(self.page(&query).await?.items)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get(&self, id: &str) -> Result<R::Item, ApiError> {
        self.send(ApiRequest::get(R::item_path(id))).await
    }

    #[instrument(skip(self, payload), fields(resource = R::PATH))]
    pub async fn create(&self, payload: &R::Payload) -> Result<R::Item, ApiError> {
        let body = to_body(payload)?;
        self.send(ApiRequest::post(R::PATH, body)).await
    }

    #[instrument(skip(self, payload), fields(resource = R::PATH))]
    pub async fn update(&self, id: &str, payload: &R::Payload) -> Result<R::Item, ApiError> {
        let body = to_body(payload)?;
        self.send(ApiRequest::put(R::item_path(id), body)).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(R::item_path(id))).await?;
        Ok(())
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let body = self.execute(request).await?.unwrap_or(Value::Null);
        Ok(serde_json::from_value(body)?)
    }

    /// Sends the request and turns any non-2xx response into an [`ApiError`].
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        debug!(request = %request, "Sending request");
        let response = self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, "Request did not reach the server");
            ApiError::from(e)
        })?;

        if response.is_success() {
            Ok(response.body)
        } else {
            let error = ApiError::from_response(response.status, response.body);
            debug!(status = response.status, error = %error, "Request failed");
            Err(error)
        }
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductPayload};
    use crate::mock_framework::{create_mock_transport, expect_request};
    use crate::resources::{ProductField, Products};
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_uses_lookup_page() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = ResourceClient::<Products>::new(transport);

        let task = tokio::spawn(async move { client.search(ProductField::Name, "cas").await });

        let call = expect_request(&mut calls).await.expect("Expected GET");
        assert_eq!(call.request.to_string(), "GET /api/products?page=0&size=100&name=cas");
        call.reply_ok(json!({"items": [{"id": "p1", "name": "Castle", "price": 300}], "totalItems": 1, "totalPages": 1}));

        let items = task.await.unwrap().unwrap();
        assert_eq!(items, vec![Product::new("p1", "Castle", 300.0)]);
    }

    #[tokio::test]
    async fn test_create_posts_payload_and_decodes_item() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = ResourceClient::<Products>::new(transport);

        let task = tokio::spawn(async move {
            let payload = ProductPayload { name: "Castle".to_string(), price: 300.0 };
            client.create(&payload).await
        });

        let call = expect_request(&mut calls).await.expect("Expected POST");
        assert_eq!(call.request.method, Method::Post);
        assert_eq!(call.request.body, Some(json!({"name": "Castle", "price": 300.0})));
        call.reply_ok(json!({"id": "p9", "name": "Castle", "price": 300}));

        assert_eq!(task.await.unwrap().unwrap().id, "p9");
    }

    #[tokio::test]
    async fn test_problem_body_becomes_api_error() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = ResourceClient::<Products>::new(transport);

        let task = tokio::spawn(async move { client.get("missing").await });

        let call = expect_request(&mut calls).await.expect("Expected GET");
        assert_eq!(call.request.path, "/api/products/missing");
        call.reply_problem(404, "product-not-found", "product not found");

        let error = task.await.unwrap().unwrap_err();
        assert!(matches!(error, ApiError::NotFound(_)));
        assert_eq!(error.user_message(), "product not found");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = ResourceClient::<Products>::new(transport);

        let task = tokio::spawn(async move { client.delete("p1").await });

        let call = expect_request(&mut calls).await.expect("Expected DELETE");
        assert_eq!(call.request.to_string(), "DELETE /api/products/p1");
        call.reply_no_content();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = ResourceClient::<Products>::new(transport);

        let task = tokio::spawn(async move { client.get("p1").await });

        expect_request(&mut calls).await.expect("Expected GET").fail("connection refused");

        assert_eq!(
            task.await.unwrap(),
            Err(ApiError::Network("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_named_client_gets_by_id() {
        let (transport, mut calls) = create_mock_transport(4);
        let client = CustomersClient::from_transport(transport);

        let task = tokio::spawn(async move { client.get_customer("c1").await });

        let call = expect_request(&mut calls).await.expect("Expected GET");
        assert_eq!(call.request.to_string(), "GET /api/customers/c1");
        call.reply_ok(json!({"id": "c1", "name": "Ana", "phones": null}));

        let customer = task.await.unwrap().unwrap();
        assert_eq!(customer.name, "Ana");
        assert!(customer.phones.is_empty());
    }
}
