//! Invoice persistence collaborator.

use crate::error::{BillingError, BillingResult};
use crate::models::{Invoice, InvoiceStatus, Payment};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// Storage for finalized invoices and the payment records applied to
/// them.
///
/// Payment-status transitions live here, outside the billing engine:
/// the engine produces immutable invoices and the store owns their
/// downstream lifecycle.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Persist a finalized invoice. Fails with `Conflict` if an invoice
    /// with the same invoice number already exists.
    async fn save(&self, invoice: Invoice) -> BillingResult<Uuid>;

    /// Fetch an invoice by id.
    async fn get(&self, id: Uuid) -> BillingResult<Invoice>;

    /// All stored invoices, newest first.
    async fn list(&self) -> BillingResult<Vec<Invoice>>;

    /// Apply a payment to a stored invoice, updating its paid amount,
    /// balance due, and status. Returns the updated invoice.
    async fn record_payment(&self, payment: Payment) -> BillingResult<Invoice>;
}

/// Apply a payment to an invoice record.
///
/// Rejects non-positive amounts and amounts exceeding the balance due.
/// Transitions status to `paid` when the balance reaches zero and
/// `partially_paid` otherwise.
pub fn apply_payment(invoice: &mut Invoice, payment: &Payment) -> BillingResult<()> {
    if payment.amount <= Decimal::ZERO {
        return Err(BillingError::InvalidArgument(
            "payment amount must be positive".to_string(),
        ));
    }
    if payment.amount > invoice.balance_due {
        return Err(BillingError::InvalidArgument(format!(
            "payment {} exceeds balance due {}",
            payment.amount, invoice.balance_due
        )));
    }

    invoice.amount_paid += payment.amount;
    invoice.balance_due -= payment.amount;
    invoice.status = if invoice.balance_due.is_zero() {
        InvoiceStatus::Paid
    } else {
        InvoiceStatus::PartiallyPaid
    };
    Ok(())
}

/// In-memory invoice store backing the demo deployment and tests.
pub struct InMemoryInvoiceStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    invoices: HashMap<Uuid, Invoice>,
    // Invoice numbers must stay unique across the store.
    numbers: HashMap<String, Uuid>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
        }
    }
}

impl Default for InMemoryInvoiceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    #[instrument(skip(self, invoice), fields(invoice_number = %invoice.invoice_number))]
    async fn save(&self, invoice: Invoice) -> BillingResult<Uuid> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        if inner.numbers.contains_key(&invoice.invoice_number) {
            return Err(BillingError::Conflict(format!(
                "invoice number {} already exists",
                invoice.invoice_number
            )));
        }

        let id = invoice.id;
        inner.numbers.insert(invoice.invoice_number.clone(), id);
        inner.invoices.insert(id, invoice);
        info!(invoice_id = %id, "Invoice stored");
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> BillingResult<Invoice> {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .invoices
            .get(&id)
            .cloned()
            .ok_or_else(|| BillingError::NotFound(format!("invoice {id} not found")))
    }

    async fn list(&self) -> BillingResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .inner
            .lock()
            .expect("store lock poisoned")
            .invoices
            .values()
            .cloned()
            .collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    #[instrument(skip(self, payment), fields(invoice_id = %payment.invoice_id, amount = %payment.amount))]
    async fn record_payment(&self, payment: Payment) -> BillingResult<Invoice> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let invoice = inner
            .invoices
            .get_mut(&payment.invoice_id)
            .ok_or_else(|| {
                BillingError::NotFound(format!("invoice {} not found", payment.invoice_id))
            })?;

        apply_payment(invoice, &payment)?;
        info!(status = invoice.status.as_str(), "Payment recorded");
        Ok(invoice.clone())
    }
}
