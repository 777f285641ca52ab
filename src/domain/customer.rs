use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::null_as_default;
use crate::form::rules::{required_text, valid_phones};

/// A customer as returned by `/api/customers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phones: Vec<String>,
    #[serde(default)]
    pub pix: Option<String>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_phones(mut self, phones: &[&str]) -> Self {
        self.phones = phones.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Body of `POST /api/customers` and `PUT /api/customers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    pub comment: Option<String>,
    pub phones: Vec<String>,
    pub pix: Option<String>,
}

/// Editable customer form.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CustomerDraft {
    #[validate(custom(function = "required_text"), length(max = 255))]
    pub name: String,
    pub comment: String,
    #[validate(custom(function = "valid_phones"))]
    pub phones: Vec<String>,
    #[validate(length(max = 255))]
    pub pix: String,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

impl CustomerDraft {
    pub fn add_phone(&mut self, phone: impl Into<String>) {
        self.phones.push(phone.into());
    }

    pub fn remove_phone(&mut self, index: usize) -> Option<String> {
        (index < self.phones.len()).then(|| self.phones.remove(index))
    }
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            comment: customer.comment.clone().unwrap_or_default(),
            phones: customer.phones.clone(),
            pix: customer.pix.clone().unwrap_or_default(),
            create_at: customer.create_at,
            update_at: customer.update_at,
        }
    }
}

impl From<&CustomerDraft> for CustomerPayload {
    fn from(draft: &CustomerDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            comment: non_blank(&draft.comment),
            phones: draft.phones.iter().map(|p| p.trim().to_string()).collect(),
            pix: non_blank(&draft.pix),
        }
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldError, FieldErrors};

    #[test]
    fn test_customer_decodes_null_phones() {
        let json = r#"{"id":"c1","name":"Ana","comment":null,"phones":null,"createAt":"2024-03-01T10:00:00Z"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert!(customer.phones.is_empty());
        assert!(customer.create_at.is_some());
    }

    #[test]
    fn test_customer_draft_validation() {
        let mut draft = CustomerDraft {
            name: " ".to_string(),
            pix: "x".repeat(256),
            ..CustomerDraft::default()
        };
        draft.add_phone("11999990000");
        draft.add_phone("abc");

        let errors = FieldErrors::from(draft.validate().unwrap_err());
        assert!(errors.has("name", &FieldError::Required));
        assert!(errors.has("pix", &FieldError::MaxLength(255)));
        assert!(errors.has("phones[1]", &FieldError::Pattern));
    }

    #[test]
    fn test_payload_drops_blank_optionals() {
        let draft = CustomerDraft {
            name: " Ana ".to_string(),
            comment: "  ".to_string(),
            ..CustomerDraft::default()
        };
        let payload = CustomerPayload::from(&draft);
        assert_eq!(payload.name, "Ana");
        assert_eq!(payload.comment, None);
        assert_eq!(payload.pix, None);
    }
}
