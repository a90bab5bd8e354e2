//! Invoice number generation.

use chrono::{Datelike, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique invoice numbers.
pub trait InvoiceNumberGenerator: Send + Sync {
    fn next_number(&self) -> String;
}

/// Sequential generator producing numbers like `INV-2026-0001`.
#[derive(Debug)]
pub struct SequentialInvoiceNumbers {
    counter: AtomicU64,
}

impl SequentialInvoiceNumbers {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Resume a sequence, e.g. after reloading a persisted store.
    pub fn starting_at(next: u64) -> Self {
        Self {
            counter: AtomicU64::new(next),
        }
    }
}

impl Default for SequentialInvoiceNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceNumberGenerator for SequentialInvoiceNumbers {
    fn next_number(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("INV-{}-{:04}", Utc::now().year(), seq)
    }
}
