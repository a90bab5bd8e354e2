//! Payment record model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Insurance,
    Upi,
    Online,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Insurance => "insurance",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Online => "online",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

/// A payment applied against a stored invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(invoice_id: Uuid, amount: Decimal, method: PaymentMethod) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_id,
            amount,
            method,
            transaction_id: None,
            paid_at: Utc::now(),
            notes: None,
        }
    }
}
