use crate::resources::Customers;

impl_resource_client!(CustomersClient, Customers, customer);
