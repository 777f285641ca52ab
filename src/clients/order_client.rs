use tracing::{debug, info, instrument};

use crate::clients::ResourceClient;
use crate::domain::{CustomerPayload, OrderCustomerDraft, OrderQuote, OrderQuoteResponse};
use crate::error::ApiError;
use crate::resources::{Customers, Orders};
use crate::transport::ApiRequest;

pub const QUOTE_PATH: &str = "/api/orders/quote";

impl_resource_client!(OrdersClient, Orders, order);

impl OrdersClient {
    /// Asks the server to price a set of product lines. Discounts are applied
    /// server side, so the result is the order's `totalPrice`.
    #[instrument(skip(self, quote), fields(lines = quote.products.len()))]
    pub async fn quote(&self, quote: &OrderQuote) -> Result<f64, ApiError> {
        debug!("Sending request");
        let body = serde_json::to_value(quote)?;
        let response: OrderQuoteResponse = self.inner.send(ApiRequest::post(QUOTE_PATH, body)).await?;
        Ok(response.total_price)
    }

    /// Returns the id of the order's customer, creating the customer first when
    /// it has none.
    #[instrument(skip(self, customer), fields(customer_name = %customer.name))]
    pub async fn ensure_customer(&self, customer: &OrderCustomerDraft) -> Result<String, ApiError> {
        if !customer.is_new() {
            return Ok(customer.id.trim().to_string());
        }

        debug!("Creating customer before saving order");
        let customers = ResourceClient::<Customers>::new(self.inner.transport().clone());
        let created = customers.create(&CustomerPayload::from(customer)).await?;
        info!(customer_id = %created.id, "Customer created");
        Ok(created.id)
    }
}
