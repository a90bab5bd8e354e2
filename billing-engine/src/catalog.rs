//! Service catalog collaborator.

use crate::error::{BillingError, BillingResult};
use crate::models::{Service, ServiceCategory};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

/// Lookup and search over the billable service catalog.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Fetch a service by id.
    async fn get(&self, id: Uuid) -> BillingResult<Service>;

    /// Case-insensitive search over service name and category.
    async fn find(&self, query: &str) -> BillingResult<Vec<Service>>;

    /// Add a catalog entry.
    async fn add(&self, service: Service) -> BillingResult<()>;

    /// All catalog entries, ordered by name.
    async fn list(&self) -> BillingResult<Vec<Service>>;
}

/// In-memory catalog backing the demo deployment and tests.
pub struct InMemoryCatalog {
    services: Mutex<HashMap<Uuid, Service>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            services: Mutex::new(HashMap::new()),
        }
    }

    /// Catalog pre-populated with the standard demo services.
    ///
    /// Seed ids are fixed so CLI sessions can reference them across
    /// invocations.
    pub fn with_seed_data() -> Self {
        let catalog = Self::new();
        let seed = [
            (
                "General Consultation",
                ServiceCategory::Consultation,
                500,
                "General physician consultation",
            ),
            (
                "Blood Test - Complete Panel",
                ServiceCategory::LabTest,
                1200,
                "Complete blood count and chemistry panel",
            ),
            (
                "Chest X-Ray",
                ServiceCategory::Imaging,
                800,
                "Digital chest X-ray examination",
            ),
            (
                "Paracetamol 500mg",
                ServiceCategory::Medication,
                50,
                "Pain relief medication",
            ),
            (
                "Private Room (per day)",
                ServiceCategory::WardCharges,
                2000,
                "Private room accommodation",
            ),
            (
                "Cardiology Consultation",
                ServiceCategory::Consultation,
                1000,
                "Specialist cardiology consultation",
            ),
        ];

        let mut services = catalog.services.lock().expect("catalog lock poisoned");
        for (n, (name, category, price, description)) in seed.into_iter().enumerate() {
            let mut service = Service::new(name, category, Decimal::from(price))
                .with_description(description);
            service.id = Uuid::from_u128(n as u128 + 1);
            services.insert(service.id, service);
        }
        drop(services);

        catalog
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> BillingResult<Service> {
        self.services
            .lock()
            .expect("catalog lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| BillingError::NotFound(format!("service {id} not found")))
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &str) -> BillingResult<Vec<Service>> {
        let needle = query.to_lowercase();
        let mut matches: Vec<Service> = self
            .services
            .lock()
            .expect("catalog lock poisoned")
            .values()
            .filter(|service| {
                service.name.to_lowercase().contains(&needle)
                    || service.category.as_str().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn add(&self, service: Service) -> BillingResult<()> {
        self.services
            .lock()
            .expect("catalog lock poisoned")
            .insert(service.id, service);
        Ok(())
    }

    async fn list(&self) -> BillingResult<Vec<Service>> {
        let mut services: Vec<Service> = self
            .services
            .lock()
            .expect("catalog lock poisoned")
            .values()
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }
}
