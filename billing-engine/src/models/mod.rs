//! Domain models for the billing engine.

mod bill;
mod breakdown;
mod invoice;
mod line_item;
mod patient;
mod payment;
mod service;

pub use bill::{Bill, BillState};
pub use breakdown::BillingBreakdown;
pub use invoice::{Invoice, InvoiceStatus};
pub use line_item::LineItem;
pub use patient::{AdmissionType, Gender, InsuranceInfo, Patient, PatientStatus};
pub use payment::{Payment, PaymentMethod};
pub use service::{Service, ServiceCategory};
