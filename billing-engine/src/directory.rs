//! Patient directory collaborator.

use crate::error::{BillingError, BillingResult};
use crate::models::{AdmissionType, Gender, InsuranceInfo, Patient, PatientStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// Lookup and registration of patient records.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Fetch a patient by id.
    async fn get(&self, id: Uuid) -> BillingResult<Patient>;

    /// Register a new patient. Rejects insurance coverage outside [0, 100].
    async fn register(&self, patient: Patient) -> BillingResult<Uuid>;

    /// Case-insensitive search over patient name and phone.
    async fn search(&self, query: &str) -> BillingResult<Vec<Patient>>;
}

/// In-memory directory backing the demo deployment and tests.
pub struct InMemoryDirectory {
    patients: Mutex<HashMap<Uuid, Patient>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            patients: Mutex::new(HashMap::new()),
        }
    }

    /// Directory pre-populated with the standard demo patients.
    ///
    /// Seed ids are fixed so CLI sessions can reference them across
    /// invocations.
    pub fn with_seed_data() -> Self {
        let directory = Self::new();

        let insured = Patient {
            id: Uuid::from_u128(0x1001),
            name: "John Smith".to_string(),
            phone: "+1-555-0123".to_string(),
            email: None,
            address: "12 Elm Street".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1978, 3, 14).expect("valid date"),
            gender: Gender::Male,
            emergency_contact: "+1-555-0199".to_string(),
            insurance: Some(InsuranceInfo {
                provider: "HealthCare Plus".to_string(),
                policy_number: "HC123456789".to_string(),
                coverage_percent: Decimal::from(80),
            }),
            admission_type: AdmissionType::Outpatient,
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
            assigned_doctor: "Dr. Johnson".to_string(),
            status: PatientStatus::Active,
        };

        let uninsured = Patient {
            id: Uuid::from_u128(0x1002),
            name: "Sarah Wilson".to_string(),
            phone: "+1-555-0125".to_string(),
            email: None,
            address: "44 Oak Avenue".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1991, 9, 2).expect("valid date"),
            gender: Gender::Female,
            emergency_contact: "+1-555-0188".to_string(),
            insurance: None,
            admission_type: AdmissionType::Inpatient,
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 18).expect("valid date"),
            assigned_doctor: "Dr. Chen".to_string(),
            status: PatientStatus::Active,
        };

        let mut patients = directory.patients.lock().expect("directory lock poisoned");
        patients.insert(insured.id, insured);
        patients.insert(uninsured.id, uninsured);
        drop(patients);

        directory
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientDirectory for InMemoryDirectory {
    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> BillingResult<Patient> {
        self.patients
            .lock()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| BillingError::NotFound(format!("patient {id} not found")))
    }

    #[instrument(skip(self, patient), fields(patient_name = %patient.name))]
    async fn register(&self, patient: Patient) -> BillingResult<Uuid> {
        patient.validate_insurance()?;
        let id = patient.id;
        self.patients
            .lock()
            .expect("directory lock poisoned")
            .insert(id, patient);
        info!(patient_id = %id, "Patient registered");
        Ok(id)
    }

    async fn search(&self, query: &str) -> BillingResult<Vec<Patient>> {
        let needle = query.to_lowercase();
        let mut matches: Vec<Patient> = self
            .patients
            .lock()
            .expect("directory lock poisoned")
            .values()
            .filter(|patient| {
                patient.name.to_lowercase().contains(&needle) || patient.phone.contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }
}
