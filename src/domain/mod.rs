//! Wire records exchanged with the happy day REST API.
//!
//! These are plain data structures with no controller concerns. Each resource
//! also has a `*Draft` type (the editable, validated shape behind a detail
//! form) and a `*Payload` type (the body sent on create/update).

pub mod customer;
pub mod discount;
pub mod order;
pub mod page;
pub mod problem;
pub mod product;

pub use customer::*;
pub use discount::*;
pub use order::*;
pub use page::*;
pub use problem::*;
pub use product::*;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
