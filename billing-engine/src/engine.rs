//! Billing computation engine.
//!
//! Maintains the line-item collection for one bill and derives the
//! monetary breakdown deterministically from current state. Every
//! operation is synchronous and transactional over the in-memory bill:
//! a failed mutation leaves the bill unchanged.

use crate::error::{BillingError, BillingResult};
use crate::models::{
    Bill, BillState, BillingBreakdown, Invoice, InvoiceStatus, LineItem, Patient, Service,
};
use crate::numbering::InvoiceNumberGenerator;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};
use uuid::Uuid;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Round a derived monetary amount to currency-minor-unit precision.
fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Engine owning one bill-in-progress.
///
/// Scope one engine to one session; concurrent mutation of the same bill
/// by two actors must be prevented by the hosting application.
#[derive(Debug, Clone)]
pub struct BillingEngine {
    bill: Bill,
}

impl BillingEngine {
    /// Create an engine over a new, empty bill.
    pub fn new(tax_rate: Decimal) -> Self {
        Self {
            bill: Bill::new(tax_rate),
        }
    }

    /// Resume an engine over a previously assembled bill.
    pub fn from_bill(bill: Bill) -> Self {
        Self { bill }
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn state(&self) -> BillState {
        self.bill.state()
    }

    /// Attach the patient whose insurance terms apply to this bill.
    ///
    /// Coverage outside [0, 100] is rejected; the previously attached
    /// patient, if any, stays in place.
    pub fn attach_patient(&mut self, patient: Patient) -> BillingResult<()> {
        patient.validate_insurance()?;
        debug!(patient_id = %patient.id, "Patient attached to bill");
        self.bill.patient = Some(patient);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.bill.notes = notes.into();
    }

    /// Add one unit of a service to the bill.
    ///
    /// If a line item for the same service already exists its quantity is
    /// incremented; otherwise a new line item is appended with the
    /// service's current name and price snapshotted. Returns the id of
    /// the affected line item.
    pub fn add_item(&mut self, service: &Service) -> Uuid {
        if let Some(item) = self
            .bill
            .line_items
            .iter_mut()
            .find(|item| item.service_id == service.id)
        {
            item.increment();
            debug!(line_item_id = %item.id, quantity = item.quantity, "Line item incremented");
            return item.id;
        }

        let item = LineItem::from_service(service, 1);
        let id = item.id;
        debug!(line_item_id = %id, service = %service.name, "Line item added");
        self.bill.line_items.push(item);
        id
    }

    /// Add a service with an explicit initial quantity.
    pub fn add_item_with_quantity(
        &mut self,
        service: &Service,
        quantity: u32,
    ) -> BillingResult<Uuid> {
        if quantity == 0 {
            return Err(BillingError::InvalidArgument(
                "initial quantity must be positive".to_string(),
            ));
        }

        if let Some(item) = self
            .bill
            .line_items
            .iter_mut()
            .find(|item| item.service_id == service.id)
        {
            let merged = item.quantity.checked_add(quantity).ok_or_else(|| {
                BillingError::InvalidArgument(format!(
                    "quantity overflow on line item {}",
                    item.id
                ))
            })?;
            item.set_quantity(merged);
            return Ok(item.id);
        }

        let item = LineItem::from_service(service, quantity);
        let id = item.id;
        self.bill.line_items.push(item);
        Ok(id)
    }

    /// Set the quantity of an existing line item.
    ///
    /// A quantity of zero removes the item entirely. An unknown line-item
    /// id is surfaced as `NotFound` rather than silently ignored.
    pub fn update_quantity(&mut self, line_item_id: Uuid, new_quantity: u32) -> BillingResult<()> {
        if new_quantity == 0 {
            let before = self.bill.line_items.len();
            self.bill.line_items.retain(|item| item.id != line_item_id);
            if self.bill.line_items.len() == before {
                return Err(BillingError::NotFound(format!(
                    "line item {line_item_id} not found"
                )));
            }
            return Ok(());
        }

        let item = self
            .bill
            .line_items
            .iter_mut()
            .find(|item| item.id == line_item_id)
            .ok_or_else(|| BillingError::NotFound(format!("line item {line_item_id} not found")))?;

        item.set_quantity(new_quantity);
        Ok(())
    }

    /// Remove a line item. Removing an absent item is a no-op.
    pub fn remove_item(&mut self, line_item_id: Uuid) {
        self.bill.line_items.retain(|item| item.id != line_item_id);
    }

    /// Set the bill-wide discount rate, a percentage within [0, 100].
    pub fn set_discount_rate(&mut self, rate: Decimal) -> BillingResult<()> {
        if rate < Decimal::ZERO || rate > PERCENT {
            return Err(BillingError::InvalidArgument(format!(
                "discount rate must be within [0, 100], got {rate}"
            )));
        }
        self.bill.discount_rate = rate;
        Ok(())
    }

    /// Derive the monetary breakdown of the current bill.
    ///
    /// Tax applies to the post-discount amount. Insurance coverage is
    /// also computed against the discounted pre-tax amount; the two are
    /// independent percentages of the same base.
    pub fn compute_breakdown(&self) -> BillingBreakdown {
        if self.bill.line_items.is_empty() {
            return BillingBreakdown::zero();
        }

        let subtotal: Decimal = self
            .bill
            .line_items
            .iter()
            .map(|item| item.total_price)
            .sum();

        let discount_amount = round_money(subtotal * self.bill.discount_rate / PERCENT);
        let discounted = subtotal - discount_amount;
        let tax_amount = round_money(discounted * self.bill.tax_rate / PERCENT);
        let total_amount = discounted + tax_amount;

        let coverage = self
            .bill
            .patient
            .as_ref()
            .map(|p| p.coverage_percent())
            .unwrap_or(Decimal::ZERO);
        let insurance_amount = round_money(discounted * coverage / PERCENT);
        let patient_amount = total_amount - insurance_amount;

        BillingBreakdown {
            subtotal,
            discount_amount,
            tax_amount,
            insurance_amount,
            total_amount,
            patient_amount,
        }
    }

    /// Finalize the bill into an immutable invoice with status `draft`.
    ///
    /// The invoice deep-copies the line items and breakdown; mutating the
    /// bill afterward does not affect it. The engine itself stays usable.
    pub fn finalize(&self, numbers: &dyn InvoiceNumberGenerator) -> BillingResult<Invoice> {
        if self.bill.line_items.is_empty() {
            return Err(BillingError::EmptyBill);
        }
        let patient = self.bill.patient.as_ref().ok_or(BillingError::NoPatient)?;

        let breakdown = self.compute_breakdown();
        let invoice_number = numbers.next_number();

        info!(
            invoice_number = %invoice_number,
            patient_id = %patient.id,
            total = %breakdown.total_amount,
            "Bill finalized into invoice"
        );

        Ok(Invoice {
            id: Uuid::new_v4(),
            invoice_number,
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            line_items: self.bill.line_items.clone(),
            discount_rate: self.bill.discount_rate,
            tax_rate: self.bill.tax_rate,
            balance_due: breakdown.patient_amount,
            breakdown,
            amount_paid: Decimal::ZERO,
            status: InvoiceStatus::Draft,
            created_at: chrono::Utc::now(),
            due_date: None,
            notes: self.bill.notes.clone(),
        })
    }
}
