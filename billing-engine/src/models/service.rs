//! Service catalog entry model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Consultation,
    LabTest,
    Medication,
    Surgery,
    WardCharges,
    Imaging,
    Equipment,
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Consultation => "consultation",
            ServiceCategory::LabTest => "lab_test",
            ServiceCategory::Medication => "medication",
            ServiceCategory::Surgery => "surgery",
            ServiceCategory::WardCharges => "ward_charges",
            ServiceCategory::Imaging => "imaging",
            ServiceCategory::Equipment => "equipment",
            ServiceCategory::Other => "other",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "consultation" => ServiceCategory::Consultation,
            "lab_test" => ServiceCategory::LabTest,
            "medication" => ServiceCategory::Medication,
            "surgery" => ServiceCategory::Surgery,
            "ward_charges" => ServiceCategory::WardCharges,
            "imaging" => ServiceCategory::Imaging,
            "equipment" => ServiceCategory::Equipment,
            _ => ServiceCategory::Other,
        }
    }
}

/// Catalog entry for a billable hospital service.
///
/// Line items snapshot `name` and `unit_price` at add-time, so catalog
/// edits never retroactively alter an existing bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub category: ServiceCategory,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub description: Option<String>,
    pub department: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>, category: ServiceCategory, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            unit_price,
            description: None,
            department: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
