use std::str::FromStr;

use serde::Serialize;

use crate::domain::{ProblemDetails, Product, ProductDraft, ProductPayload};
use crate::form::{problem_suffix, AfterSave, Editable, FieldError, FieldErrors};
use crate::resource::{FilterField, Resource, SortKey};

use super::UnknownColumn;

pub struct Products;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
}

impl FilterField for ProductField {
    fn param(self) -> &'static str {
        match self {
            ProductField::Name => "name",
        }
    }
}

impl FromStr for ProductField {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ProductField::Name),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Id,
    Name,
    Price,
}

impl SortKey for ProductSort {
    fn param(self) -> &'static str {
        match self {
            ProductSort::Id => "id",
            ProductSort::Name => "name",
            ProductSort::Price => "price",
        }
    }
}

impl FromStr for ProductSort {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ProductSort::Id),
            "name" => Ok(ProductSort::Name),
            "price" => Ok(ProductSort::Price),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

impl Resource for Products {
    const NAME: &'static str = "product";
    const PATH: &'static str = "/api/products";

    type Item = Product;
    type Payload = ProductPayload;
    type Filter = ProductField;
    type Sort = ProductSort;

    fn id(item: &Product) -> &str {
        &item.id
    }
}

impl Editable for Products {
    type Draft = ProductDraft;

    const AFTER_SAVE: AfterSave = AfterSave::Navigate("/products");

    fn draft_from(item: &Product) -> ProductDraft {
        ProductDraft::from(item)
    }

    fn payload_from(draft: &ProductDraft) -> ProductPayload {
        ProductPayload::from(draft)
    }

    fn problem_errors(problem: &ProblemDetails, _draft: &ProductDraft) -> Option<FieldErrors> {
        let errors = match problem_suffix::<Self>(problem)? {
            "name-is-empty" => FieldErrors::single("name", FieldError::Required),
            "name-is-too-large" => FieldErrors::single("name", FieldError::MaxLength(255)),
            "price-is-invalid" => FieldErrors::single("price", FieldError::Required)
                .with("price", FieldError::Min(0.0)),
            _ => return None,
        };
        Some(errors)
    }
}
