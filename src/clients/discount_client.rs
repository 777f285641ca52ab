use crate::resources::Discounts;

impl_resource_client!(DiscountsClient, Discounts, discount);
