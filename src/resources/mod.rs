//! The four collections of the console, each with its filter columns, sort
//! keys, table row and problem-code table.

mod customers;
mod discounts;
mod orders;
mod products;

pub use customers::*;
pub use discounts::*;
pub use orders::*;
pub use products::*;

use thiserror::Error;

/// A filter or sort column name that the resource does not have.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);
