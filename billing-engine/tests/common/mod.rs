//! Shared fixtures for billing-engine tests.
#![allow(dead_code)]

use billing_engine::models::{
    AdmissionType, Gender, InsuranceInfo, Patient, PatientStatus, Service, ServiceCategory,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Standard jurisdiction tax rate used across tests.
pub const TAX_RATE: Decimal = dec!(18);

// Each call mints a distinct catalog entry with a fresh id; bind the
// service once when a test exercises repeated adds of the same service.
pub fn consultation() -> Service {
    Service::new(
        "General Consultation",
        ServiceCategory::Consultation,
        dec!(500),
    )
}

pub fn blood_test() -> Service {
    Service::new(
        "Blood Test - Complete Panel",
        ServiceCategory::LabTest,
        dec!(1200),
    )
}

pub fn patient(insurance: Option<InsuranceInfo>) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        name: "John Smith".to_string(),
        phone: "+1-555-0123".to_string(),
        email: None,
        address: "12 Elm Street".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1978, 3, 14).unwrap(),
        gender: Gender::Male,
        emergency_contact: "+1-555-0199".to_string(),
        insurance,
        admission_type: AdmissionType::Outpatient,
        admission_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        assigned_doctor: "Dr. Johnson".to_string(),
        status: PatientStatus::Active,
    }
}

pub fn uninsured_patient() -> Patient {
    patient(None)
}

pub fn insured_patient(coverage_percent: Decimal) -> Patient {
    patient(Some(InsuranceInfo {
        provider: "HealthCare Plus".to_string(),
        policy_number: "HC123456789".to_string(),
        coverage_percent,
    }))
}
