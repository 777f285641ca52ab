use crate::resources::Products;

impl_resource_client!(ProductsClient, Products, product);
