use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::null_as_default;
use super::product::Product;
use crate::form::rules::required_text;

/// A bundle price applied when every product line is present in an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<DiscountProduct>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountPayload {
    pub name: String,
    pub price: f64,
    pub products: Vec<DiscountProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DiscountDraft {
    #[validate(custom(function = "required_text"), length(max = 255))]
    pub name: String,
    #[validate(required, range(min = 1.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1), nested)]
    pub products: Vec<DiscountLineDraft>,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// One product line of a discount. The id and name come from the product
/// lookup and are not editable; only the quantity is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct DiscountLineDraft {
    #[validate(custom(function = "required_text"))]
    pub id: String,
    pub name: String,
    #[validate(required, range(min = 1))]
    pub quantity: Option<u32>,
}

impl DiscountDraft {
    pub fn add_product(&mut self, line: DiscountLineDraft) {
        self.products.push(line);
    }

    pub fn remove_product(&mut self, index: usize) -> Option<DiscountLineDraft> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }
}

impl From<&Product> for DiscountLineDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            quantity: None,
        }
    }
}

impl From<&Discount> for DiscountDraft {
    fn from(discount: &Discount) -> Self {
        Self {
            name: discount.name.clone(),
            price: Some(discount.price),
            products: discount
                .products
                .iter()
                .map(|p| DiscountLineDraft {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    quantity: Some(p.quantity),
                })
                .collect(),
            create_at: discount.create_at,
            update_at: discount.update_at,
        }
    }
}

impl From<&DiscountDraft> for DiscountPayload {
    fn from(draft: &DiscountDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            price: draft.price.unwrap_or_default(),
            products: draft
                .products
                .iter()
                .map(|line| DiscountProduct {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity.unwrap_or_default(),
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
    fn test_discount_requires_lines_with_quantity() {
        let mut draft = DiscountDraft {
            name: "Party combo".to_string(),
            price: Some(0.5),
            ..DiscountDraft::default()
        };
        let errors = FieldErrors::from(draft.validate().unwrap_err());
        assert!(errors.has("price", &FieldError::Min(1.0)));
        assert!(errors.has("products", &FieldError::MinLength(1)));

        draft.price = Some(120.0);
        draft.add_product(DiscountLineDraft {
            id: "p1".to_string(),
            name: "Castle".to_string(),
            quantity: Some(0),
        });
        let errors = FieldErrors::from(draft.validate().unwrap_err());
        assert!(errors.has("products[0].quantity", &FieldError::Min(1.0)));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_discount_round_trips_into_draft() {
        let discount = Discount {
            id: "d1".to_string(),
            name: "Combo".to_string(),
            price: 99.0,
            products: vec![DiscountProduct {
                id: "p1".to_string(),
                name: "Castle".to_string(),
                quantity: 2,
            }],
            ..Discount::default()
        };
        let payload = DiscountPayload::from(&DiscountDraft::from(&discount));
        assert_eq!(payload.products, discount.products);
        assert_eq!(payload.price, 99.0);
    }
}
