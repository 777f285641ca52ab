use std::str::FromStr;

use serde::Serialize;

use crate::domain::{Customer, CustomerDraft, CustomerPayload, ProblemDetails};
use crate::form::{problem_suffix, AfterSave, Editable, FieldError, FieldErrors};
use crate::resource::{FilterField, Resource, SortKey};

use super::UnknownColumn;

pub struct Customers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Phone,
    Comment,
}

impl FilterField for CustomerField {
    fn param(self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Phone => "phone",
            CustomerField::Comment => "comment",
        }
    }
}

impl FromStr for CustomerField {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CustomerField::Name),
            "phone" => Ok(CustomerField::Phone),
            "comment" => Ok(CustomerField::Comment),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSort {
    Id,
    Name,
    Comment,
}

impl SortKey for CustomerSort {
    fn param(self) -> &'static str {
        match self {
            CustomerSort::Id => "id",
            CustomerSort::Name => "name",
            CustomerSort::Comment => "comment",
        }
    }
}

impl FromStr for CustomerSort {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CustomerSort::Id),
            "name" => Ok(CustomerSort::Name),
            "comment" => Ok(CustomerSort::Comment),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

/// One line of the customers table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub comment: String,
    /// All phones joined by `", "`.
    pub phones: String,
    pub pix: String,
}

impl From<Customer> for CustomerRow {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            comment: customer.comment.unwrap_or_default(),
            phones: customer.phones.join(", "),
            pix: customer.pix.unwrap_or_default(),
        }
    }
}

impl Resource for Customers {
    const NAME: &'static str = "customer";
    const PATH: &'static str = "/api/customers";

    type Item = Customer;
    type Payload = CustomerPayload;
    type Filter = CustomerField;
    type Sort = CustomerSort;

    fn id(item: &Customer) -> &str {
        &item.id
    }
}

impl Editable for Customers {
    type Draft = CustomerDraft;

    const AFTER_SAVE: AfterSave = AfterSave::Stay;

    fn draft_from(item: &Customer) -> CustomerDraft {
        CustomerDraft::from(item)
    }

    fn payload_from(draft: &CustomerDraft) -> CustomerPayload {
        CustomerPayload::from(draft)
    }

    fn problem_errors(problem: &ProblemDetails, draft: &CustomerDraft) -> Option<FieldErrors> {
        let errors = match problem_suffix::<Self>(problem)? {
            "name-is-empty" => FieldErrors::single("name", FieldError::Required),
            "name-is-too-large" => FieldErrors::single("name", FieldError::MaxLength(255)),
            "pix-is-too-large" => FieldErrors::single("pix", FieldError::MaxLength(255)),
            "phone-number-is-invalid" => {
                FieldErrors::each("phones", draft.phones.len(), None, FieldError::Pattern)
            }
            _ => return None,
        };
        Some(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_joins_phones() {
        let customer = Customer::new("c1", "Ana").with_phones(&["11999990000", "1133334444"]);
        let row = CustomerRow::from(customer);
        assert_eq!(row.phones, "11999990000, 1133334444");
        assert_eq!(row.comment, "");
    }

    #[test]
    fn test_problem_table() {
        let draft = CustomerDraft::default();
        let too_large = ProblemDetails::new("customer-name-is-too-large", "", 400);
        assert_eq!(
            Customers::problem_errors(&too_large, &draft),
            Some(FieldErrors::single("name", FieldError::MaxLength(255)))
        );

        let phones = ProblemDetails::new("customer-phone-number-is-invalid", "", 400);
        assert_eq!(
            Customers::problem_errors(&phones, &draft),
            Some(FieldErrors::single("phones", FieldError::Pattern))
        );

        let foreign = ProblemDetails::new("product-name-is-empty", "", 400);
        assert_eq!(Customers::problem_errors(&foreign, &draft), None);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("phone".parse::<CustomerField>(), Ok(CustomerField::Phone));
        assert!("pix".parse::<CustomerField>().is_err());
    }
}
