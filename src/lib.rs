//! Client-side core of the happy day admin console.
//!
//! The console manages customers, products, discounts and orders through a
//! REST API. This crate holds the controllers behind its screens: paginated
//! lists with debounced filtering, detail forms with local validation and
//! problem-code mapping, delete confirmations and the order pricing flow.
//! [`system::AdminSystem`] wires them to one HTTP transport.

pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod list;
pub mod messages;
pub mod resource;
pub mod resources;
pub mod system;
pub mod transport;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
