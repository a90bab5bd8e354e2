//! Computed monetary breakdown of a bill.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived monetary breakdown of a bill-in-progress.
///
/// Pure function of the bill contents; amounts serialize as decimal
/// strings so the interface carries no float-precision ambiguity.
///
/// Published identities:
/// - `total_amount == subtotal - discount_amount + tax_amount`
/// - `patient_amount == total_amount - insurance_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub insurance_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub patient_amount: Decimal,
}

impl BillingBreakdown {
    /// Breakdown of a bill with no line items.
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            insurance_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            patient_amount: Decimal::ZERO,
        }
    }
}
