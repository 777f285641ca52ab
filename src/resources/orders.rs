use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Order, OrderDraft, OrderPayload, ProblemDetails};
use crate::form::{problem_suffix, AfterSave, Editable, FieldError, FieldErrors};
use crate::resource::{FilterField, Resource, SortKey};

use super::UnknownColumn;

pub struct Orders;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Name,
    Address,
    CustomerName,
    CustomerPhone,
}

impl FilterField for OrderField {
    fn param(self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Address => "address",
            OrderField::CustomerName => "customerName",
            OrderField::CustomerPhone => "customerPhone",
        }
    }
}

impl FromStr for OrderField {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(OrderField::Name),
            "address" => Ok(OrderField::Address),
            "customerName" | "customer-name" => Ok(OrderField::CustomerName),
            "customerPhone" | "customer-phone" => Ok(OrderField::CustomerPhone),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    Id,
    DeliveryAt,
}

impl SortKey for OrderSort {
    fn param(self) -> &'static str {
        match self {
            OrderSort::Id => "id",
            OrderSort::DeliveryAt => "deliveryAt",
        }
    }
}

impl FromStr for OrderSort {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(OrderSort::Id),
            "deliveryAt" | "delivery-at" => Ok(OrderSort::DeliveryAt),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub customer_name: String,
    pub delivery_at: DateTime<Utc>,
    pub pick_up_at: DateTime<Utc>,
    pub final_price: f64,
}

impl From<Order> for OrderRow {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_name: order.customer.name,
            delivery_at: order.delivery_at,
            pick_up_at: order.pick_up_at,
            final_price: order.final_price,
        }
    }
}

impl Resource for Orders {
    const NAME: &'static str = "order";
    const PATH: &'static str = "/api/orders";

    type Item = Order;
    type Payload = OrderPayload;
    type Filter = OrderField;
    type Sort = OrderSort;

    fn id(item: &Order) -> &str {
        &item.id
    }
}

impl Editable for Orders {
    type Draft = OrderDraft;

    const AFTER_SAVE: AfterSave = AfterSave::Navigate("/orders");

    fn draft_from(item: &Order) -> OrderDraft {
        OrderDraft::from(item)
    }

    fn payload_from(draft: &OrderDraft) -> OrderPayload {
        OrderPayload::from(draft)
    }

    fn problem_errors(problem: &ProblemDetails, draft: &OrderDraft) -> Option<FieldErrors> {
        let errors = match problem_suffix::<Self>(problem)? {
            "address-is-empty" => FieldErrors::single("address", FieldError::Required),
            "address-is-too-large" => FieldErrors::single("address", FieldError::MaxLength(1000)),
            "delivery-at-is-invalid" => FieldErrors::single("delivery_at", FieldError::InvalidDate)
                .with("pick_up_at", FieldError::InvalidDate),
            "total-price-at-is-invalid" => FieldErrors::single("total_price", FieldError::Min(0.0)),
            "discount-is-invalid" => FieldErrors::single("discount", FieldError::Min(0.0)),
            "final-price-at-is-invalid" => FieldErrors::single("final_price", FieldError::Min(0.0)),
            "payment-value-is-invalid" => FieldErrors::each(
                "payments",
                draft.payments.len(),
                Some("amount"),
                FieldError::Min(0.0),
            ),
            "customer-not-found" => FieldErrors::single("customer", FieldError::NotFound),
            "product-not-found" => FieldErrors::single("products", FieldError::NotFound),
            _ => return None,
        };
        Some(errors)
    }
}
