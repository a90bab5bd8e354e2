//! Billing engine behavior tests: line-item aggregation, breakdown
//! derivation, and finalization.

mod common;

use billing_engine::models::{BillState, BillingBreakdown};
use billing_engine::numbering::SequentialInvoiceNumbers;
use billing_engine::{BillingEngine, BillingError};
use common::{blood_test, consultation, insured_patient, uninsured_patient, TAX_RATE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn check_line_item_invariants(engine: &BillingEngine) {
    let mut subtotal = Decimal::ZERO;
    for item in &engine.bill().line_items {
        assert!(item.quantity >= 1);
        assert_eq!(
            item.total_price,
            Decimal::from(item.quantity) * item.unit_price
        );
        subtotal += item.total_price;
    }
    assert_eq!(engine.compute_breakdown().subtotal, subtotal);
}

#[test]
fn repeated_adds_merge_into_one_line_item() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let service = consultation();

    for _ in 0..5 {
        engine.add_item(&service);
    }

    assert_eq!(engine.bill().line_items.len(), 1);
    assert_eq!(engine.bill().line_items[0].quantity, 5);
    assert_eq!(engine.bill().line_items[0].total_price, dec!(2500));
    check_line_item_invariants(&engine);
}

#[test]
fn distinct_services_get_distinct_rows() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let consult = consultation();
    engine.add_item(&consult);
    engine.add_item(&blood_test());
    engine.add_item(&consult);

    assert_eq!(engine.bill().line_items.len(), 2);
    assert_eq!(engine.compute_breakdown().subtotal, dec!(2200));
    check_line_item_invariants(&engine);
}

#[test]
fn update_quantity_recomputes_total() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let id = engine.add_item(&consultation());

    engine.update_quantity(id, 4).unwrap();

    assert_eq!(engine.bill().line_items[0].quantity, 4);
    assert_eq!(engine.bill().line_items[0].total_price, dec!(2000));
    check_line_item_invariants(&engine);
}

#[test]
fn zero_quantity_removes_like_remove_item() {
    let service = consultation();

    let mut via_update = BillingEngine::new(TAX_RATE);
    let id = via_update.add_item(&service);
    via_update.update_quantity(id, 0).unwrap();

    let mut via_remove = BillingEngine::new(TAX_RATE);
    let id = via_remove.add_item(&service);
    via_remove.remove_item(id);

    assert!(via_update.bill().line_items.is_empty());
    assert!(via_remove.bill().line_items.is_empty());
    assert_eq!(via_update.state(), BillState::Empty);
    assert_eq!(via_remove.state(), BillState::Empty);
}

#[test]
fn unknown_line_item_is_surfaced() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());

    let unknown = uuid::Uuid::new_v4();
    assert!(matches!(
        engine.update_quantity(unknown, 3),
        Err(BillingError::NotFound(_))
    ));
    assert!(matches!(
        engine.update_quantity(unknown, 0),
        Err(BillingError::NotFound(_))
    ));

    // Failed mutations leave the bill untouched
    assert_eq!(engine.bill().line_items.len(), 1);
    assert_eq!(engine.bill().line_items[0].quantity, 1);
}

#[test]
fn remove_absent_item_is_a_noop() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.remove_item(uuid::Uuid::new_v4());
    assert_eq!(engine.bill().line_items.len(), 1);
}

#[test]
fn add_with_zero_quantity_is_rejected() {
    let mut engine = BillingEngine::new(TAX_RATE);
    assert!(matches!(
        engine.add_item_with_quantity(&consultation(), 0),
        Err(BillingError::InvalidArgument(_))
    ));
    assert!(engine.bill().line_items.is_empty());
}

#[test]
fn add_with_quantity_merges_with_existing_row() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let service = consultation();
    engine.add_item(&service);
    engine.add_item_with_quantity(&service, 3).unwrap();

    assert_eq!(engine.bill().line_items.len(), 1);
    assert_eq!(engine.bill().line_items[0].quantity, 4);
}

#[test]
fn discount_rate_bounds() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());

    assert!(matches!(
        engine.set_discount_rate(dec!(-1)),
        Err(BillingError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.set_discount_rate(dec!(101)),
        Err(BillingError::InvalidArgument(_))
    ));
    // Rejected rates leave the previous rate in place
    assert_eq!(engine.bill().discount_rate, Decimal::ZERO);

    engine.set_discount_rate(dec!(0)).unwrap();
    engine.set_discount_rate(dec!(100)).unwrap();
    assert_eq!(engine.compute_breakdown().total_amount, Decimal::ZERO);
}

#[test]
fn increasing_discount_never_increases_total() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&blood_test());
    engine.add_item_with_quantity(&consultation(), 3).unwrap();

    let mut previous = None;
    for rate in 0..=100 {
        engine.set_discount_rate(Decimal::from(rate)).unwrap();
        let total = engine.compute_breakdown().total_amount;
        if let Some(prev) = previous {
            assert!(total <= prev, "total increased at discount {rate}%");
        }
        previous = Some(total);
    }
}

#[test]
fn breakdown_without_discount_or_insurance() {
    // One item at 500, 18% tax, no patient
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());

    let breakdown = engine.compute_breakdown();
    assert_eq!(breakdown.subtotal, dec!(500));
    assert_eq!(breakdown.discount_amount, Decimal::ZERO);
    assert_eq!(breakdown.tax_amount, dec!(90));
    assert_eq!(breakdown.total_amount, dec!(590));
    assert_eq!(breakdown.insurance_amount, Decimal::ZERO);
    assert_eq!(breakdown.patient_amount, dec!(590));
}

#[test]
fn breakdown_with_discount() {
    // Tax applies to the post-discount amount
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.set_discount_rate(dec!(10)).unwrap();

    let breakdown = engine.compute_breakdown();
    assert_eq!(breakdown.discount_amount, dec!(50));
    assert_eq!(breakdown.tax_amount, dec!(81));
    assert_eq!(breakdown.total_amount, dec!(531));
    assert_eq!(breakdown.patient_amount, dec!(531));
}

#[test]
fn breakdown_with_discount_and_insurance() {
    // Insurance covers 80% of the discounted pre-tax amount
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.set_discount_rate(dec!(10)).unwrap();
    engine.attach_patient(insured_patient(dec!(80))).unwrap();

    let breakdown = engine.compute_breakdown();
    assert_eq!(breakdown.insurance_amount, dec!(360));
    assert_eq!(breakdown.total_amount, dec!(531));
    assert_eq!(breakdown.patient_amount, dec!(171));
}

#[test]
fn out_of_range_coverage_is_rejected() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());

    assert!(matches!(
        engine.attach_patient(insured_patient(dec!(150))),
        Err(BillingError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.attach_patient(insured_patient(dec!(-5))),
        Err(BillingError::InvalidArgument(_))
    ));

    // Rejected coverage never reaches the breakdown, so the patient
    // share cannot go negative
    assert!(engine.bill().patient.is_none());
    assert_eq!(engine.compute_breakdown().patient_amount, dec!(590));

    // Full coverage is the inclusive upper bound
    engine.attach_patient(insured_patient(dec!(100))).unwrap();
    assert_eq!(engine.compute_breakdown().patient_amount, dec!(90));
}

#[test]
fn quantity_merge_overflow_is_rejected() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let service = consultation();
    let id = engine.add_item_with_quantity(&service, u32::MAX).unwrap();

    assert!(matches!(
        engine.add_item_with_quantity(&service, 1),
        Err(BillingError::InvalidArgument(_))
    ));
    assert_eq!(engine.bill().line_items[0].quantity, u32::MAX);

    // Single-unit adds saturate instead of wrapping
    assert_eq!(engine.add_item(&service), id);
    assert_eq!(engine.bill().line_items[0].quantity, u32::MAX);
    check_line_item_invariants(&engine);
}

#[test]
fn emptying_the_bill_zeroes_the_breakdown() {
    let mut engine = BillingEngine::new(TAX_RATE);
    let service = consultation();
    engine.add_item(&service);
    let id = engine.add_item(&service);
    engine.update_quantity(id, 0).unwrap();

    assert!(engine.bill().line_items.is_empty());
    assert_eq!(engine.compute_breakdown(), BillingBreakdown::zero());
}

#[test]
fn finalize_requires_line_items_and_patient() {
    let numbers = SequentialInvoiceNumbers::new();

    let empty = BillingEngine::new(TAX_RATE);
    assert!(matches!(
        empty.finalize(&numbers),
        Err(BillingError::EmptyBill)
    ));

    let mut no_patient = BillingEngine::new(TAX_RATE);
    no_patient.add_item(&consultation());
    assert!(matches!(
        no_patient.finalize(&numbers),
        Err(BillingError::NoPatient)
    ));
}

#[test]
fn finalize_snapshots_the_breakdown() {
    let numbers = SequentialInvoiceNumbers::new();
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.set_discount_rate(dec!(10)).unwrap();
    engine.attach_patient(insured_patient(dec!(80))).unwrap();
    engine.set_notes("Follow-up in two weeks");

    let expected = engine.compute_breakdown();
    let invoice = engine.finalize(&numbers).unwrap();

    assert_eq!(invoice.breakdown, expected);
    assert_eq!(invoice.balance_due, expected.patient_amount);
    assert_eq!(invoice.amount_paid, Decimal::ZERO);
    assert_eq!(invoice.status.as_str(), "draft");
    assert!(invoice.invoice_number.starts_with("INV-"));
    assert_eq!(invoice.notes, "Follow-up in two weeks");

    // Mutating the source bill afterward does not touch the invoice
    engine.add_item(&blood_test());
    engine.set_discount_rate(dec!(50)).unwrap();
    assert_eq!(invoice.breakdown, expected);
    assert_eq!(invoice.line_items.len(), 1);
}

#[test]
fn finalized_engine_remains_usable() {
    let numbers = SequentialInvoiceNumbers::new();
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.attach_patient(uninsured_patient()).unwrap();

    let first = engine.finalize(&numbers).unwrap();
    engine.add_item(&blood_test());
    let second = engine.finalize(&numbers).unwrap();

    assert_ne!(first.invoice_number, second.invoice_number);
    assert!(second.breakdown.subtotal > first.breakdown.subtotal);
}

#[test]
fn breakdown_serializes_with_decimal_strings() {
    let mut engine = BillingEngine::new(TAX_RATE);
    engine.add_item(&consultation());
    engine.set_discount_rate(dec!(10)).unwrap();

    let json = serde_json::to_value(engine.compute_breakdown()).unwrap();
    let field = |name: &str| -> Decimal {
        json[name]
            .as_str()
            .unwrap_or_else(|| panic!("{name} must be a decimal string"))
            .parse()
            .unwrap()
    };
    assert_eq!(field("subtotal"), dec!(500));
    assert_eq!(field("discountAmount"), dec!(50));
    assert_eq!(field("taxAmount"), dec!(81));
    assert_eq!(field("insuranceAmount"), dec!(0));
    assert_eq!(field("totalAmount"), dec!(531));
    assert_eq!(field("patientAmount"), dec!(531));
}
