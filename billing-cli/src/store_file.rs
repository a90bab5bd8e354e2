//! JSON-file invoice store for the CLI.

use async_trait::async_trait;
use billing_engine::models::{Invoice, Payment};
use billing_engine::store::{apply_payment, InvoiceStore};
use billing_engine::{BillingError, BillingResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Invoice store persisted as a JSON array on disk.
///
/// Each operation reloads and rewrites the whole file; the CLI is
/// single-session so there is no concurrent writer to guard against.
pub struct JsonInvoiceStore {
    path: PathBuf,
}

impl JsonInvoiceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> BillingResult<Vec<Invoice>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| BillingError::Storage(format!("cannot read invoice store: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| BillingError::Storage(format!("invoice store is corrupt: {e}")))
    }

    fn write_all(&self, invoices: &[Invoice]) -> BillingResult<()> {
        let raw = serde_json::to_string_pretty(invoices)
            .map_err(|e| BillingError::Storage(format!("cannot encode invoice store: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| BillingError::Storage(format!("cannot write invoice store: {e}")))
    }

    /// Number of stored invoices, used to resume the invoice sequence.
    pub fn count(&self) -> BillingResult<u64> {
        Ok(self.read_all()?.len() as u64)
    }
}

#[async_trait]
impl InvoiceStore for JsonInvoiceStore {
    async fn save(&self, invoice: Invoice) -> BillingResult<Uuid> {
        let mut invoices = self.read_all()?;
        if invoices
            .iter()
            .any(|existing| existing.invoice_number == invoice.invoice_number)
        {
            return Err(BillingError::Conflict(format!(
                "invoice number {} already exists",
                invoice.invoice_number
            )));
        }

        let id = invoice.id;
        invoices.push(invoice);
        self.write_all(&invoices)?;
        info!(invoice_id = %id, "Invoice stored");
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> BillingResult<Invoice> {
        self.read_all()?
            .into_iter()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| BillingError::NotFound(format!("invoice {id} not found")))
    }

    async fn list(&self) -> BillingResult<Vec<Invoice>> {
        let mut invoices = self.read_all()?;
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    async fn record_payment(&self, payment: Payment) -> BillingResult<Invoice> {
        let mut invoices = self.read_all()?;
        let invoice = invoices
            .iter_mut()
            .find(|invoice| invoice.id == payment.invoice_id)
            .ok_or_else(|| {
                BillingError::NotFound(format!("invoice {} not found", payment.invoice_id))
            })?;

        apply_payment(invoice, &payment)?;
        let updated = invoice.clone();
        self.write_all(&invoices)?;
        Ok(updated)
    }
}
