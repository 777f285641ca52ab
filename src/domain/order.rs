use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::customer::{non_blank, Customer, CustomerPayload};
use super::product::Product;
use super::null_as_default;
use crate::form::rules::{required_text, valid_phones};

/// Represents a customer order (reservation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub delivery_at: DateTime<Utc>,
    pub pick_up_at: DateTime<Utc>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub final_price: f64,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<OrderProduct>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<OrderPayment>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Pix,
    BankTransfer,
    Cash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayment {
    #[serde(alias = "value")]
    pub amount: f64,
    pub at: DateTime<Utc>,
    pub method: PaymentMethod,
    #[serde(default)]
    pub info: Option<String>,
}

/// Body of `POST /api/orders` and `PUT /api/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub address: String,
    pub comment: Option<String>,
    pub delivery_at: Option<DateTime<Utc>>,
    pub pick_up_at: Option<DateTime<Utc>>,
    pub total_price: f64,
    pub discount: f64,
    pub final_price: f64,
    pub customer_id: String,
    pub customer: OrderCustomer,
    pub products: Vec<OrderProduct>,
    pub payments: Vec<OrderPayment>,
}

/// Body of `POST /api/orders/quote`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderQuote {
    pub products: Vec<OrderProduct>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuoteResponse {
    pub total_price: f64,
}

/// Editable order form.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OrderDraft {
    #[validate(custom(function = "required_text"), length(max = 1000))]
    pub address: String,
    pub comment: String,
    #[validate(required)]
    pub delivery_at: Option<DateTime<Utc>>,
    #[validate(required)]
    pub pick_up_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
    #[validate(range(min = 0.0))]
    pub discount: f64,
    #[validate(range(min = 0.0))]
    pub final_price: f64,
    #[validate(nested)]
    pub customer: OrderCustomerDraft,
    #[validate(nested)]
    pub products: Vec<OrderLineDraft>,
    #[validate(nested)]
    pub payments: Vec<PaymentDraft>,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// The customer section of an order form. An empty id means the customer does
/// not exist yet and is created before the order is saved.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OrderCustomerDraft {
    pub id: String,
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(custom(function = "valid_phones"))]
    pub phones: Vec<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OrderLineDraft {
    #[validate(custom(function = "required_text"))]
    pub id: String,
    pub name: String,
    #[validate(required, range(min = 1))]
    pub quantity: Option<u32>,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PaymentDraft {
    #[validate(required, range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(required)]
    pub at: Option<DateTime<Utc>>,
    #[validate(required)]
    pub method: Option<PaymentMethod>,
    pub info: String,
}

impl OrderDraft {
    /// `final = total - discount`, as shown beside the quote.
    pub fn update_final_price(&mut self) {
        self.final_price = self.total_price - self.discount;
    }

    pub fn quote_request(&self) -> OrderQuote {
        OrderQuote {
            products: self.products.iter().map(OrderProduct::from).collect(),
        }
    }
}

impl OrderCustomerDraft {
    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl From<&OrderCustomer> for OrderCustomerDraft {
    fn from(customer: &OrderCustomer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phones: customer.phones.clone(),
            comment: customer.comment.clone().unwrap_or_default(),
        }
    }
}

impl From<&OrderCustomerDraft> for OrderCustomer {
    fn from(draft: &OrderCustomerDraft) -> Self {
        Self {
            id: draft.id.clone(),
            name: draft.name.trim().to_string(),
            comment: non_blank(&draft.comment),
            phones: draft.phones.clone(),
        }
    }
}

/// Payload used to create a customer straight from the order form.
impl From<&OrderCustomerDraft> for CustomerPayload {
    fn from(draft: &OrderCustomerDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            comment: non_blank(&draft.comment),
            phones: draft.phones.iter().map(|p| p.trim().to_string()).collect(),
            pix: None,
        }
    }
}

impl From<&Customer> for OrderCustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phones: customer.phones.clone(),
            comment: customer.comment.clone().unwrap_or_default(),
        }
    }
}

/// A freshly picked product line, priced from the catalogue.
impl From<&Product> for OrderLineDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            quantity: None,
            price: product.price,
        }
    }
}

impl From<&OrderProduct> for OrderLineDraft {
    fn from(product: &OrderProduct) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            quantity: Some(product.quantity),
            price: product.price,
        }
    }
}

impl From<&OrderLineDraft> for OrderProduct {
    fn from(line: &OrderLineDraft) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            quantity: line.quantity.unwrap_or_default(),
            price: line.price,
        }
    }
}

impl From<&OrderPayment> for PaymentDraft {
    fn from(payment: &OrderPayment) -> Self {
        Self {
            amount: Some(payment.amount),
            at: Some(payment.at),
            method: Some(payment.method),
            info: payment.info.clone().unwrap_or_default(),
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            address: order.address.clone(),
            comment: order.comment.clone().unwrap_or_default(),
            delivery_at: Some(order.delivery_at),
            pick_up_at: Some(order.pick_up_at),
            total_price: order.total_price,
            discount: order.discount,
            final_price: order.final_price,
            customer: OrderCustomerDraft::from(&order.customer),
            products: order.products.iter().map(OrderLineDraft::from).collect(),
            payments: order.payments.iter().map(PaymentDraft::from).collect(),
            create_at: order.create_at,
            update_at: order.update_at,
        }
    }
}

impl From<&OrderDraft> for OrderPayload {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            address: draft.address.trim().to_string(),
            comment: non_blank(&draft.comment),
            delivery_at: draft.delivery_at,
            pick_up_at: draft.pick_up_at,
            total_price: draft.total_price,
            discount: draft.discount,
            final_price: draft.final_price,
            customer_id: draft.customer.id.clone(),
            customer: OrderCustomer::from(&draft.customer),
            products: draft.products.iter().map(OrderProduct::from).collect(),
            // Only complete payments reach the payload; validation rejects the rest first.
            payments: draft
                .payments
                .iter()
                .filter_map(|p| {
                    Some(OrderPayment {
                        amount: p.amount?,
                        at: p.at?,
                        method: p.method?,
                        info: non_blank(&p.info),
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldError, FieldErrors};

    #[test]
    fn test_order_decodes_payment_methods() {
        let json = r#"{
            "id": "o1",
            "address": "Rua A, 10",
            "comment": null,
            "deliveryAt": "2024-05-10T09:00:00Z",
            "pickUpAt": "2024-05-11T18:00:00Z",
            "totalPrice": 300,
            "discount": 20,
            "finalPrice": 280,
            "customer": {"id": "c1", "name": "Ana", "phones": ["11999990000"]},
            "products": [{"id": "p1", "name": "Castle", "quantity": 1, "price": 300}],
            "payments": [{"amount": 100, "at": "2024-05-01T12:00:00Z", "method": "bank-transfer", "info": null}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.customer.name, "Ana");
        assert_eq!(order.payments[0].method, PaymentMethod::BankTransfer);
        assert_eq!(order.final_price, 280.0);
    }

    #[test]
    fn test_order_draft_nested_errors() {
        let draft = OrderDraft {
            address: "Rua A".to_string(),
            customer: OrderCustomerDraft {
                phones: vec!["123".to_string()],
                ..OrderCustomerDraft::default()
            },
            products: vec![OrderLineDraft {
                id: "p1".to_string(),
                quantity: Some(0),
                ..OrderLineDraft::default()
            }],
            payments: vec![PaymentDraft {
                amount: Some(-5.0),
                ..PaymentDraft::default()
            }],
            ..OrderDraft::default()
        };
        let errors = FieldErrors::from(draft.validate().unwrap_err());

        assert!(errors.has("delivery_at", &FieldError::Required));
        assert!(errors.has("pick_up_at", &FieldError::Required));
        assert!(errors.has("customer.name", &FieldError::Required));
        assert!(errors.has("customer.phones[0]", &FieldError::MinLength(8)));
        assert!(errors.has("products[0].quantity", &FieldError::Min(1.0)));
        assert!(errors.has("payments[0].amount", &FieldError::Min(0.0)));
        assert!(errors.has("payments[0].method", &FieldError::Required));
    }

    #[test]
    fn test_update_final_price() {
        let mut draft = OrderDraft {
            total_price: 300.0,
            discount: 45.5,
            ..OrderDraft::default()
        };
        draft.update_final_price();
        assert_eq!(draft.final_price, 254.5);
    }
}
