//! Finalized invoice model.

use crate::models::{BillingBreakdown, LineItem};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    PartiallyPaid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            "partially_paid" => InvoiceStatus::PartiallyPaid,
            "overdue" => InvoiceStatus::Overdue,
            _ => InvoiceStatus::Draft,
        }
    }
}

/// Immutable snapshot produced from a bill at finalization.
///
/// Holds deep copies of the line items and the full computed breakdown;
/// later mutation of the source bill never changes an invoice already
/// produced from it. Payment-status transitions are driven through the
/// invoice store, not the billing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub line_items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(flatten)]
    pub breakdown: BillingBreakdown,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance_due: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}
