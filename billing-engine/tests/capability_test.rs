//! Role/capability matrix tests.

use billing_engine::capability::{Capability, Role};

#[test]
fn every_role_can_view_dashboard_and_search() {
    for role in [
        Role::Admin,
        Role::Receptionist,
        Role::BillingClerk,
        Role::Doctor,
    ] {
        assert!(role.allows(Capability::ViewDashboard));
        assert!(role.allows(Capability::Search));
    }
}

#[test]
fn admin_has_every_capability() {
    for capability in [
        Capability::ViewDashboard,
        Capability::ViewPatients,
        Capability::RegisterPatient,
        Capability::CreateBill,
        Capability::ViewInvoices,
        Capability::RecordPayments,
        Capability::ManageServices,
        Capability::ViewReports,
        Capability::Search,
    ] {
        assert!(Role::Admin.allows(capability));
    }
}

#[test]
fn receptionist_handles_patients_and_bills_but_not_payments() {
    assert!(Role::Receptionist.allows(Capability::ViewPatients));
    assert!(Role::Receptionist.allows(Capability::RegisterPatient));
    assert!(Role::Receptionist.allows(Capability::CreateBill));
    assert!(Role::Receptionist.allows(Capability::ViewInvoices));
    assert!(!Role::Receptionist.allows(Capability::RecordPayments));
    assert!(!Role::Receptionist.allows(Capability::ManageServices));
    assert!(!Role::Receptionist.allows(Capability::ViewReports));
}

#[test]
fn billing_clerk_handles_money_but_not_patients() {
    assert!(Role::BillingClerk.allows(Capability::CreateBill));
    assert!(Role::BillingClerk.allows(Capability::ViewInvoices));
    assert!(Role::BillingClerk.allows(Capability::RecordPayments));
    assert!(Role::BillingClerk.allows(Capability::ViewReports));
    assert!(!Role::BillingClerk.allows(Capability::ViewPatients));
    assert!(!Role::BillingClerk.allows(Capability::RegisterPatient));
    assert!(!Role::BillingClerk.allows(Capability::ManageServices));
}

#[test]
fn doctor_is_read_mostly() {
    assert!(Role::Doctor.allows(Capability::ViewPatients));
    assert!(!Role::Doctor.allows(Capability::RegisterPatient));
    assert!(!Role::Doctor.allows(Capability::CreateBill));
    assert!(!Role::Doctor.allows(Capability::ViewInvoices));
    assert!(!Role::Doctor.allows(Capability::RecordPayments));
    assert!(!Role::Doctor.allows(Capability::ManageServices));
}

#[test]
fn role_strings_round_trip() {
    for role in [
        Role::Admin,
        Role::Receptionist,
        Role::BillingClerk,
        Role::Doctor,
    ] {
        assert_eq!(Role::from_string(role.as_str()), Some(role));
    }
    assert_eq!(Role::from_string("janitor"), None);
}
