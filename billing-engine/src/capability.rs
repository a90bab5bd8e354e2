//! Roles and capability checks for billing operations.
//!
//! Navigation and mutation entry points are gated by an explicit
//! capability predicate per role instead of ad hoc role-string lists.

use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Receptionist,
    BillingClerk,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Receptionist => "receptionist",
            Role::BillingClerk => "billing_clerk",
            Role::Doctor => "doctor",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "receptionist" => Some(Role::Receptionist),
            "billing_clerk" => Some(Role::BillingClerk),
            "doctor" => Some(Role::Doctor),
            _ => None,
        }
    }
}

/// A navigable or mutating operation gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewDashboard,
    ViewPatients,
    RegisterPatient,
    CreateBill,
    ViewInvoices,
    RecordPayments,
    ManageServices,
    ViewReports,
    Search,
}

impl Role {
    /// Whether this role may perform the given operation.
    pub fn allows(&self, capability: Capability) -> bool {
        use Capability::*;
        use Role::*;

        match capability {
            ViewDashboard | Search => true,
            ViewPatients => matches!(self, Admin | Receptionist | Doctor),
            RegisterPatient => matches!(self, Admin | Receptionist),
            CreateBill | ViewInvoices => matches!(self, Admin | Receptionist | BillingClerk),
            RecordPayments | ViewReports => matches!(self, Admin | BillingClerk),
            ManageServices => matches!(self, Admin),
        }
    }
}
