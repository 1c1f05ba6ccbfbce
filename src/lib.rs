//! Tillroll
//!
//! Client-side order construction for the tillroll point-of-sale backend:
//! cart aggregation, percentage discount pricing, pre-submission stock
//! validation, and order submission over REST with bearer-token auth.

pub mod api;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod stock;
