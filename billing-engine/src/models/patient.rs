//! Patient and insurance models.

use crate::error::{BillingError, BillingResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionType {
    Inpatient,
    Outpatient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Discharged,
    Transferred,
}

/// Insurance terms attached to a patient record.
///
/// `coverage_percent` is the share of the discounted pre-tax bill amount
/// covered by the insurer, 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceInfo {
    pub provider: String,
    pub policy_number: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub coverage_percent: Decimal,
}

impl InsuranceInfo {
    /// Check that the coverage percentage is within [0, 100].
    ///
    /// Coverage outside that range would drive the patient share of a
    /// bill negative, leaving the resulting invoice unsettleable.
    pub fn validate(&self) -> BillingResult<()> {
        if self.coverage_percent < Decimal::ZERO || self.coverage_percent > Decimal::ONE_HUNDRED {
            return Err(BillingError::InvalidArgument(format!(
                "insurance coverage must be within [0, 100], got {}",
                self.coverage_percent
            )));
        }
        Ok(())
    }
}

/// Patient registration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub emergency_contact: String,
    pub insurance: Option<InsuranceInfo>,
    pub admission_type: AdmissionType,
    pub admission_date: NaiveDate,
    pub assigned_doctor: String,
    pub status: PatientStatus,
}

impl Patient {
    /// Insurance coverage percentage, zero when the patient is uninsured.
    pub fn coverage_percent(&self) -> Decimal {
        self.insurance
            .as_ref()
            .map(|info| info.coverage_percent)
            .unwrap_or(Decimal::ZERO)
    }

    /// Validate the insurance terms, if any. Uninsured patients pass.
    pub fn validate_insurance(&self) -> BillingResult<()> {
        match &self.insurance {
            Some(info) => info.validate(),
            None => Ok(()),
        }
    }
}
