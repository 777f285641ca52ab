use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{DetailController, EntityRef, LoadOutcome, Lookup, Notice, SaveOutcome};
use crate::clients::{OrdersClient, ResourceClient};
use crate::domain::{Customer, OrderCustomerDraft, OrderDraft, OrderLineDraft, Product};
use crate::error::ApiError;
use crate::resources::{CustomerField, Customers, Orders, ProductField, Products};
use crate::transport::HttpTransport;

/// The order form: a [`DetailController`] plus product and customer pickers
/// and server-side quoting.
pub struct OrderDetail {
    detail: DetailController<Orders>,
    orders: OrdersClient,
    products: Lookup<Products>,
    customers: Lookup<Customers>,
}

impl OrderDetail {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        let orders = OrdersClient::from_transport(transport.clone());
        Self {
            detail: DetailController::new(orders.resource().clone()),
            orders,
            products: Lookup::new(ResourceClient::new(transport.clone()), ProductField::Name),
            customers: Lookup::new(ResourceClient::new(transport), CustomerField::Name),
        }
    }

    pub fn detail(&self) -> &DetailController<Orders> {
        &self.detail
    }

    pub fn draft(&self) -> &OrderDraft {
        self.detail.draft()
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        self.detail.draft_mut()
    }

    pub async fn load(&mut self, entity: EntityRef) -> LoadOutcome {
        self.detail.load(entity).await
    }

    pub async fn find_products(&self, name: &str) -> Result<Vec<Product>, ApiError> {
        self.products.find(name).await
    }

    pub async fn find_customers(&self, name: &str) -> Result<Vec<Customer>, ApiError> {
        self.customers.find(name).await
    }

    /// Fills the customer section from an existing customer.
    pub fn select_customer(&mut self, customer: &Customer) {
        debug!(customer_id = %customer.id, "Customer selected");
        self.draft_mut().customer = OrderCustomerDraft::from(customer);
    }

    pub fn add_product(&mut self, product: &Product, quantity: u32) {
        let mut line = OrderLineDraft::from(product);
        line.quantity = Some(quantity);
        self.draft_mut().products.push(line);
    }

    /// Drops a product line and prices the order again.
    pub async fn remove_product(&mut self, index: usize) -> Result<f64, Notice> {
        if index >= self.draft().products.len() {
            return Ok(self.draft().total_price);
        }
        self.draft_mut().products.remove(index);
        self.quote().await
    }

    /// Prices the current product lines, then recomputes the final price.
    #[instrument(skip(self), fields(lines = self.draft().products.len()))]
    pub async fn quote(&mut self) -> Result<f64, Notice> {
        let request = self.draft().quote_request();
        match self.orders.quote(&request).await {
            Ok(total_price) => {
                let draft = self.draft_mut();
                draft.total_price = total_price;
                draft.update_final_price();
                debug!(total_price, final_price = draft.final_price, "Order quoted");
                Ok(total_price)
            }
            Err(e) => {
                warn!(error = %e, "Quote failed");
                Err(Notice::unexpected(&e))
            }
        }
    }

    pub fn update_final_price(&mut self) {
        self.draft_mut().update_final_price();
    }

    /// Validates, creates the customer when it is new, then saves the order.
    #[instrument(skip(self), fields(id = ?self.detail.entity().id()))]
    pub async fn save(&mut self) -> SaveOutcome {
        if self.detail.is_not_found() {
            return SaveOutcome::NotFound;
        }
        if let Err(errors) = self.detail.validate() {
            debug!(errors = %errors, "Order draft is invalid");
            return SaveOutcome::Invalid(errors);
        }

        match self.orders.ensure_customer(&self.detail.draft().customer).await {
            Ok(customer_id) => {
                info!(customer_id = %customer_id, "Order customer resolved");
                self.detail.draft_mut().customer.id = customer_id;
            }
            Err(e) => return self.detail.failure(e),
        }

        self.detail.submit().await
    }
}
