use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single inline error attached to a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Pattern,
    InvalidDate,
    /// The referenced entity (customer, product) no longer exists.
    NotFound,
    Other(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "is required"),
            FieldError::MinLength(min) => write!(f, "must have at least {min} characters"),
            FieldError::MaxLength(max) => write!(f, "must have at most {max} characters"),
            FieldError::Min(min) => write!(f, "must be at least {min}"),
            FieldError::Max(max) => write!(f, "must be at most {max}"),
            FieldError::Pattern => write!(f, "has an invalid format"),
            FieldError::InvalidDate => write!(f, "is not a valid date"),
            FieldError::NotFound => write!(f, "does not exist"),
            FieldError::Other(code) => write!(f, "is invalid ({code})"),
        }
    }
}

impl From<&ValidationError> for FieldError {
    fn from(error: &ValidationError) -> Self {
        let params = &error.params;
        FieldError::from_code(&error.code, number(params.get("min")), number(params.get("max")))
    }
}

impl FieldError {
    fn from_code(code: &str, min: Option<f64>, max: Option<f64>) -> Self {
        match code {
            "required" => FieldError::Required,
            "pattern" | "regex" => FieldError::Pattern,
            "minlength" => FieldError::MinLength(min.unwrap_or_default() as usize),
            "maxlength" => FieldError::MaxLength(max.unwrap_or_default() as usize),
            "length" => match (min, max) {
                (Some(min), None) => FieldError::MinLength(min as usize),
                (None, Some(max)) => FieldError::MaxLength(max as usize),
                _ => FieldError::Other("length".to_string()),
            },
            "range" => match (min, max) {
                (Some(min), None) => FieldError::Min(min),
                (None, Some(max)) => FieldError::Max(max),
                _ => FieldError::Other("range".to_string()),
            },
            other => FieldError::Other(other.to_string()),
        }
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Inline errors keyed by field path (`name`, `customer.phones[0]`,
/// `payments[1].amount`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldError>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.insert(field, error);
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, error: FieldError) {
        let entry = self.0.entry(field.into()).or_default();
        if !entry.contains(&error) {
            entry.push(error);
        }
    }

    pub fn with(mut self, field: impl Into<String>, error: FieldError) -> Self {
        self.insert(field, error);
        self
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, errors) in other.0 {
            for error in errors {
                self.insert(field.clone(), error);
            }
        }
    }

    /// The same error on every element of a list field (`phones[0]`,
    /// `payments[1].amount`, ...). An empty list gets it on the list itself.
    pub fn each(list: &str, len: usize, field: Option<&str>, error: FieldError) -> Self {
        if len == 0 {
            return Self::single(list, error);
        }
        let mut errors = Self::new();
        for index in 0..len {
            let path = match field {
                Some(field) => format!("{list}[{index}].{field}"),
                None => format!("{list}[{index}]"),
            };
            errors.insert(path, error.clone());
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> &[FieldError] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, field: &str, error: &FieldError) -> bool {
        self.get(field).contains(error)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.0.iter().map(|(field, errors)| (field.as_str(), errors.as_slice()))
    }

    fn collect(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        // Rules over a list of scalars point at each offending element.
                        match error.params.get("failures").and_then(Value::as_array) {
                            Some(failures) => self.collect_failures(&path, failures),
                            None => self.insert(path.clone(), FieldError::from(error)),
                        }
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }

    fn collect_failures(&mut self, path: &str, failures: &[Value]) {
        for failure in failures {
            let (Some(index), Some(code)) = (
                failure.get("index").and_then(Value::as_u64),
                failure.get("code").and_then(Value::as_str),
            ) else {
                continue;
            };
            let min = number(failure.get("min"));
            let max = number(failure.get("max"));
            self.insert(format!("{path}[{index}]"), FieldError::from_code(code, min, max));
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        out.collect("", errors);
        out
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        FieldErrors::from(&errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in &self.0 {
            for error in errors {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field} {error}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Line {
        #[validate(range(min = 1))]
        quantity: u32,
    }

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(max = 3))]
        name: String,
        #[validate(required)]
        price: Option<f64>,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    #[test]
    fn test_validation_errors_become_field_paths() {
        let sample = Sample {
            name: "long name".to_string(),
            price: None,
            lines: vec![Line { quantity: 1 }, Line { quantity: 0 }],
        };
        let errors = FieldErrors::from(sample.validate().unwrap_err());

        assert!(errors.has("name", &FieldError::MaxLength(3)));
        assert!(errors.has("price", &FieldError::Required));
        assert!(errors.has("lines[1].quantity", &FieldError::Min(1.0)));
        assert!(errors.get("lines[0].quantity").is_empty());
    }

    #[test]
    fn test_insert_ignores_duplicates_and_displays() {
        let errors = FieldErrors::single("name", FieldError::Required)
            .with("name", FieldError::Required)
            .with("pix", FieldError::MaxLength(255));
        assert_eq!(errors.get("name").len(), 1);
        assert_eq!(
            errors.to_string(),
            "name is required; pix must have at most 255 characters"
        );
    }
}
