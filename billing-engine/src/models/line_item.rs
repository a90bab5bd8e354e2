//! Line item model: one row of a bill-in-progress.

use crate::models::Service;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of a bill-in-progress.
///
/// `service_name` and `unit_price` are snapshots taken when the item was
/// added; renaming or repricing the catalog entry afterward does not
/// change the bill. `total_price` always equals `quantity * unit_price`;
/// mutate quantity only through [`LineItem::set_quantity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
}

impl LineItem {
    /// Create a line item from a catalog service with the given quantity.
    pub fn from_service(service: &Service, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id: service.id,
            service_name: service.name.clone(),
            quantity,
            unit_price: service.unit_price,
            total_price: Decimal::from(quantity) * service.unit_price,
        }
    }

    /// Set the quantity, recomputing the derived total.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = Decimal::from(quantity) * self.unit_price;
    }

    /// Increment the quantity by one, recomputing the derived total.
    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn increment(&mut self) {
        self.set_quantity(self.quantity.saturating_add(1));
    }
}
