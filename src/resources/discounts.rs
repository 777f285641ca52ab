use std::str::FromStr;

use serde::Serialize;

use crate::domain::{Discount, DiscountDraft, DiscountPayload, ProblemDetails};
use crate::form::{problem_suffix, AfterSave, Editable, FieldError, FieldErrors};
use crate::resource::{FilterField, Resource, SortKey};

use super::UnknownColumn;

pub struct Discounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountField {
    Name,
}

impl FilterField for DiscountField {
    fn param(self) -> &'static str {
        match self {
            DiscountField::Name => "name",
        }
    }
}

impl FromStr for DiscountField {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(DiscountField::Name),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountSort {
    Id,
    Name,
    Price,
}

impl SortKey for DiscountSort {
    fn param(self) -> &'static str {
        match self {
            DiscountSort::Id => "id",
            DiscountSort::Name => "name",
            DiscountSort::Price => "price",
        }
    }
}

impl FromStr for DiscountSort {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(DiscountSort::Id),
            "name" => Ok(DiscountSort::Name),
            "price" => Ok(DiscountSort::Price),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountRow {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl From<Discount> for DiscountRow {
    fn from(discount: Discount) -> Self {
        Self {
            id: discount.id,
            name: discount.name,
            price: discount.price,
        }
    }
}

impl Resource for Discounts {
    const NAME: &'static str = "discount";
    const PATH: &'static str = "/api/discounts";

    type Item = Discount;
    type Payload = DiscountPayload;
    type Filter = DiscountField;
    type Sort = DiscountSort;

    fn id(item: &Discount) -> &str {
        &item.id
    }
}

impl Editable for Discounts {
    type Draft = DiscountDraft;

    const AFTER_SAVE: AfterSave = AfterSave::Stay;

    fn draft_from(item: &Discount) -> DiscountDraft {
        DiscountDraft::from(item)
    }

    fn payload_from(draft: &DiscountDraft) -> DiscountPayload {
        DiscountPayload::from(draft)
    }

    fn problem_errors(problem: &ProblemDetails, _draft: &DiscountDraft) -> Option<FieldErrors> {
        let errors = match problem_suffix::<Self>(problem)? {
            "name-is-empty" => FieldErrors::single("name", FieldError::Required),
            "name-is-too-large" => FieldErrors::single("name", FieldError::MaxLength(255)),
            "price-is-invalid" => FieldErrors::single("price", FieldError::Min(1.0)),
            "products-is-missing" => FieldErrors::single("products", FieldError::Required),
            "product-not-found" => FieldErrors::single("products", FieldError::NotFound),
            _ => return None,
        };
        Some(errors)
    }
}
