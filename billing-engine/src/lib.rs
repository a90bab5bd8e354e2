//! Billing engine for hospital administration.
//!
//! Provides the billing computation core:
//! - Line-item aggregation for a bill-in-progress
//! - Monetary breakdown derivation (subtotal, discount, tax, insurance,
//!   patient balance)
//! - Invoice finalization and numbering
//! - Payment recording against stored invoices
//! - Service catalog and patient directory collaborators
//! - Role/capability checks for billing operations

pub mod capability;
pub mod catalog;
pub mod directory;
pub mod engine;
pub mod error;
pub mod models;
pub mod numbering;
pub mod store;

pub use engine::BillingEngine;
pub use error::{BillingError, BillingResult};
