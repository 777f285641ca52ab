/// Generates a named client around [`ResourceClient`](crate::clients::ResourceClient)
/// with a resource-specific `get_*` method. Everything else goes through
/// `resource()` or the form controllers.
macro_rules! impl_resource_client {
    ($client_name:ident, $resource:ty, $entity_name_snake:ident) => {
        #[derive(Clone)]
        pub struct $client_name {
            inner: $crate::clients::ResourceClient<$resource>,
        }

        paste::paste! {
            impl $client_name {
                pub fn from_transport(
                    transport: std::sync::Arc<dyn $crate::transport::HttpTransport>,
                ) -> Self {
                    Self {
                        inner: $crate::clients::ResourceClient::new(transport),
                    }
                }

                pub fn resource(&self) -> &$crate::clients::ResourceClient<$resource> {
                    &self.inner
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: &str,
                ) -> Result<<$resource as $crate::resource::Resource>::Item, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await
                }
            }
        }
    };
}
