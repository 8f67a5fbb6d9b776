//! Typed client for the customer REST API.

pub mod client;

pub use client::{ClientError, Created, Customer, CustomerClient, Order};
