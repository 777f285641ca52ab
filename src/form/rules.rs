//! Custom `validator` rules shared by the draft types.

use std::borrow::Cow;

use serde_json::{json, Value};
use validator::ValidationError;

pub const PHONE_MIN_LENGTH: usize = 8;
pub const PHONE_MAX_LENGTH: usize = 11;

/// Text field that must contain something other than whitespace.
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Every phone is required, 8 to 11 characters and matches `[- +()0-9]+`.
///
/// All failing phones are reported. The error carries the first failure's
/// code and a `failures` param with one `{index, code}` entry per bad phone.
pub fn valid_phones(phones: &[String]) -> Result<(), ValidationError> {
    let failures: Vec<(usize, &'static str)> = phones
        .iter()
        .enumerate()
        .filter_map(|(index, phone)| phone_failure(phone).map(|code| (index, code)))
        .collect();

    let Some(&(_, first)) = failures.first() else {
        return Ok(());
    };

    let entries: Vec<Value> = failures
        .iter()
        .map(|&(index, code)| {
            let mut entry = json!({"index": index, "code": code});
            if matches!(code, "minlength" | "maxlength") {
                entry["min"] = json!(PHONE_MIN_LENGTH);
                entry["max"] = json!(PHONE_MAX_LENGTH);
            }
            entry
        })
        .collect();

    let mut error = ValidationError::new(first);
    error.add_param(Cow::from("failures"), &entries);
    Err(error)
}

fn phone_failure(phone: &str) -> Option<&'static str> {
    if phone.is_empty() {
        return Some("required");
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '+' | '(' | ')'))
    {
        return Some("pattern");
    }
    let length = phone.chars().count();
    if length < PHONE_MIN_LENGTH {
        return Some("minlength");
    }
    if length > PHONE_MAX_LENGTH {
        return Some("maxlength");
    }
    None
}
