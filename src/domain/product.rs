use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::form::rules::required_text;

/// Represents a product in the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
}

/// Editable product form.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductDraft {
    #[validate(custom(function = "required_text"), length(max = 255))]
    pub name: String,
    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: Some(product.price),
            create_at: product.create_at,
            update_at: product.update_at,
        }
    }
}

impl From<&ProductDraft> for ProductPayload {
    fn from(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            price: draft.price.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldError, FieldErrors};

    #[test]
    fn test_empty_product_draft_is_invalid() {
        let errors = FieldErrors::from(ProductDraft::default().validate().unwrap_err());
        assert!(errors.has("name", &FieldError::Required));
        assert!(errors.has("price", &FieldError::Required));
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let draft = ProductDraft {
            name: "Cake".to_string(),
            price: Some(-1.0),
            ..ProductDraft::default()
        };
        let errors = FieldErrors::from(draft.validate().unwrap_err());
        assert!(errors.has("price", &FieldError::Min(0.0)));
        assert!(errors.get("name").is_empty());
    }
}
