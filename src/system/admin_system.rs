use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::SystemError;
use crate::clients::{CustomersClient, DiscountsClient, OrdersClient, ProductsClient, ResourceClient};
use crate::config::ClientConfig;
use crate::form::{DeleteDialog, DetailController, Editable, Lookup, OrderDetail};
use crate::list::{ListClient, ListService};
use crate::resource::Resource;
use crate::resources::{
    CustomerRow, Customers, DiscountRow, Discounts, OrderRow, Orders, ProductField, ProductRow,
    Products,
};
use crate::transport::{HttpTransport, ReqwestTransport};

/// The console's controllers, wired to one transport.
///
/// Responsible for starting the list services, handing out clients and form
/// controllers, and shutting the services down.
pub struct AdminSystem {
    pub customers: CustomersClient,
    pub products: ProductsClient,
    pub discounts: DiscountsClient,
    pub orders: OrdersClient,
    pub customer_list: ListClient<Customers, CustomerRow>,
    pub product_list: ListClient<Products, ProductRow>,
    pub discount_list: ListClient<Discounts, DiscountRow>,
    pub order_list: ListClient<Orders, OrderRow>,
    transport: Arc<dyn HttpTransport>,
    handles: Vec<JoinHandle<()>>,
}

impl AdminSystem {
    /// Starts one list service per resource. Each fetches its first page
    /// straight away.
    pub fn start(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Self {
        info!(api_url = %config.api_url, "Starting admin system");
        let mut handles = Vec::with_capacity(4);

        let customer_list = spawn_list(&transport, config, &mut handles);
        let product_list = spawn_list(&transport, config, &mut handles);
        let discount_list = spawn_list(&transport, config, &mut handles);
        let order_list = spawn_list(&transport, config, &mut handles);

        Self {
            customers: CustomersClient::from_transport(transport.clone()),
            products: ProductsClient::from_transport(transport.clone()),
            discounts: DiscountsClient::from_transport(transport.clone()),
            orders: OrdersClient::from_transport(transport.clone()),
            customer_list,
            product_list,
            discount_list,
            order_list,
            transport,
            handles,
        }
    }

    /// Builds a `reqwest` transport from `config` and starts the system on it.
    pub fn connect(config: &ClientConfig) -> Result<Self, SystemError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(config)?);
        Ok(Self::start(transport, config))
    }

    pub fn customer_detail(&self) -> DetailController<Customers> {
        self.detail()
    }

    pub fn product_detail(&self) -> DetailController<Products> {
        self.detail()
    }

    pub fn discount_detail(&self) -> DetailController<Discounts> {
        self.detail()
    }

    pub fn order_detail(&self) -> OrderDetail {
        OrderDetail::new(self.transport.clone())
    }

    /// Product picker used by the discount form.
    pub fn product_lookup(&self) -> Lookup<Products> {
        Lookup::new(ResourceClient::new(self.transport.clone()), ProductField::Name)
    }

    pub fn delete_customer(&self, id: &str) -> DeleteDialog<Customers> {
        self.delete_dialog(id, &self.customer_list)
    }

    pub fn delete_product(&self, id: &str) -> DeleteDialog<Products> {
        self.delete_dialog(id, &self.product_list)
    }

    pub fn delete_discount(&self, id: &str) -> DeleteDialog<Discounts> {
        self.delete_dialog(id, &self.discount_list)
    }

    pub fn delete_order(&self, id: &str) -> DeleteDialog<Orders> {
        self.delete_dialog(id, &self.order_list)
    }

    fn detail<R: Editable>(&self) -> DetailController<R> {
        DetailController::new(ResourceClient::new(self.transport.clone()))
    }

    fn delete_dialog<R, V>(&self, id: &str, origin: &ListClient<R, V>) -> DeleteDialog<R>
    where
        R: Resource,
        V: Clone + Send + Sync + 'static,
    {
        DeleteDialog::new(ResourceClient::new(self.transport.clone()), id, Box::new(origin.clone()))
    }

    /// Stops every list service and waits for all of them, even after one
    /// has failed. The first task failure is returned.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        let results = [
            self.customer_list.shutdown().await,
            self.product_list.shutdown().await,
            self.discount_list.shutdown().await,
            self.order_list.shutdown().await,
        ];
        for result in results {
            if let Err(e) = result {
                warn!(error = %e, "List service already stopped");
            }
        }

        let mut first_error = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                first_error.get_or_insert(SystemError::TaskFailed(e.to_string()));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}

fn spawn_list<R, V>(
    transport: &Arc<dyn HttpTransport>,
    config: &ClientConfig,
    handles: &mut Vec<JoinHandle<()>>,
) -> ListClient<R, V>
where
    R: Resource,
    V: From<R::Item> + Clone + Send + Sync + 'static,
{
    let (service, client) = ListService::<R, V>::new(ResourceClient::new(transport.clone()), config);
    handles.push(tokio::spawn(service.run()));
    client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_transport, expect_request, page_body};
    use serde_json::json;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_start_fetches_every_list_and_shuts_down() {
        let (transport, mut calls) = create_mock_transport(16);
        let system = AdminSystem::start(transport, &ClientConfig::default());

        let mut paths = BTreeSet::new();
        for _ in 0..4 {
            let call = expect_request(&mut calls).await.expect("Expected initial GET");
            paths.insert(call.request.path.clone());
            call.reply_ok(page_body(json!([]), 0, 0));
        }
        assert_eq!(
            paths.into_iter().collect::<Vec<_>>(),
            vec!["/api/customers", "/api/discounts", "/api/orders", "/api/products"]
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_awaits_every_handle_after_a_failure() {
        let (transport, _calls) = create_mock_transport(16);
        let mut system = AdminSystem::start(transport, &ClientConfig::default());

        let orders = system.order_list.clone();
        system.handles.insert(0, tokio::spawn(async { panic!("list service crashed") }));

        let result = system.shutdown().await;
        assert!(matches!(result, Err(SystemError::TaskFailed(_))));
        // Every list service behind the failed task was still awaited.
        assert!(orders.reload().await.is_err());
    }
}
