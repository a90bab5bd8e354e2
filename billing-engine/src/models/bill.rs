//! Bill-in-progress model.

use crate::models::{LineItem, Patient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a bill-in-progress.
///
/// A bill whose last line item is removed returns to `Empty`, which is a
/// valid, mutable state. Finalization produces an [`crate::models::Invoice`]
/// and is terminal for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillState {
    Empty,
    InProgress,
}

/// A bill being assembled for a patient.
///
/// Owns its line items exclusively; at most one line item exists per
/// distinct service (repeated adds increment quantity instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub line_items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub patient: Option<Patient>,
    pub notes: String,
}

impl Bill {
    /// Create an empty bill with the jurisdiction tax rate.
    pub fn new(tax_rate: Decimal) -> Self {
        Self {
            line_items: Vec::new(),
            discount_rate: Decimal::ZERO,
            tax_rate,
            patient: None,
            notes: String::new(),
        }
    }

    pub fn state(&self) -> BillState {
        if self.line_items.is_empty() {
            BillState::Empty
        } else {
            BillState::InProgress
        }
    }

}
