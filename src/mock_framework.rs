//! # Mock Framework
//!
//! Utilities for testing controllers without a server.
//!
//! Use [`create_mock_transport`] to get a transport and a receiver.
//! Then use [`expect_request`] to take each outgoing request and answer it
//! with one of the `reply_*` helpers on [`TransportCall`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// One request captured by the mock, waiting for its response.
#[derive(Debug)]
pub struct TransportCall {
    pub request: ApiRequest,
    pub respond_to: oneshot::Sender<Result<ApiResponse, TransportError>>,
}

impl TransportCall {
    pub fn reply(self, status: u16, body: Option<Value>) {
        let _ = self.respond_to.send(Ok(ApiResponse::new(status, body)));
    }

    pub fn reply_ok(self, body: Value) {
        self.reply(200, Some(body));
    }

    pub fn reply_no_content(self) {
        self.reply(204, None);
    }

    pub fn reply_problem(self, status: u16, kind: &str, message: &str) {
        self.reply(
            status,
            Some(json!({"type": kind, "message": message, "status": status})),
        );
    }

    /// Fails the request before any HTTP response, as a dropped connection would.
    pub fn fail(self, message: &str) {
        let _ = self.respond_to.send(Err(TransportError(message.to_string())));
    }
}

/// Transport that forwards every request to a channel the test controls.
///
/// # Testing Strategy
/// Instead of a server we hand the controllers this transport. Each request
/// lands on `receiver`, where the test asserts it and decides the response.
/// Success, failure and response ordering are all deterministic.
pub struct MockTransport {
    sender: mpsc::Sender<TransportCall>,
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TransportCall { request, respond_to })
            .await
            .map_err(|_| TransportError("mock transport closed".to_string()))?;
        response
            .await
            .map_err(|_| TransportError("mock transport dropped the request".to_string()))?
    }
}

pub fn create_mock_transport(
    buffer_size: usize,
) -> (Arc<dyn HttpTransport>, mpsc::Receiver<TransportCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MockTransport { sender }), receiver)
}

/// Waits for the next outgoing request.
pub async fn expect_request(receiver: &mut mpsc::Receiver<TransportCall>) -> Option<TransportCall> {
    receiver.recv().await
}

/// Page envelope in the shape the API returns.
pub fn page_body(items: Value, total_items: u64, total_pages: u64) -> Value {
    json!({"items": items, "totalItems": total_items, "totalPages": total_pages})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(10);

        let send_task = tokio::spawn(async move { transport.send(ApiRequest::get("/api/products/p1")).await });

        let call = expect_request(&mut receiver).await.expect("Expected request");
        assert_eq!(call.request.path, "/api/products/p1");
        call.reply_ok(json!({"id": "p1"}));

        let response = send_task.await.unwrap().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"id": "p1"})));
    }

    #[tokio::test]
    async fn test_dropped_call_is_transport_error() {
        let (transport, mut receiver) = create_mock_transport(10);

        let send_task = tokio::spawn(async move { transport.send(ApiRequest::get("/api/orders")).await });

        drop(expect_request(&mut receiver).await);
        assert!(send_task.await.unwrap().is_err());
    }
}
