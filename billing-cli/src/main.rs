//! hospbill: headless billing CLI.
//!
//! Drives one bill-in-progress per session file through the billing
//! engine and prints the computed breakdown as JSON after every
//! mutation, with all amounts as decimal strings.

mod session;
mod store_file;

use anyhow::{bail, Context};
use billing_engine::catalog::{InMemoryCatalog, ServiceCatalog};
use billing_engine::directory::{InMemoryDirectory, PatientDirectory};
use billing_engine::models::{Payment, PaymentMethod};
use billing_engine::numbering::SequentialInvoiceNumbers;
use billing_engine::store::InvoiceStore;
use billing_engine::BillingEngine;
use clap::{Parser, Subcommand};
use hospital_core::config::Config;
use hospital_core::observability::init_tracing;
use rust_decimal::Decimal;
use session::Session;
use store_file::JsonInvoiceStore;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hospbill", version, about = "Hospital billing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Work on the bill-in-progress
    Bill {
        #[command(subcommand)]
        action: BillAction,
    },
    /// Browse the service catalog
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },
    /// Browse the patient directory
    Patients {
        #[command(subcommand)]
        action: PatientsAction,
    },
    /// Work with stored invoices
    Invoices {
        #[command(subcommand)]
        action: InvoicesAction,
    },
}

#[derive(Subcommand)]
enum BillAction {
    /// Start a new bill, discarding any bill in progress
    New {
        /// Patient to bill; insurance terms come from the directory
        #[arg(long)]
        patient: Option<Uuid>,
    },
    /// Add one or more units of a service
    AddItem {
        service_id: Uuid,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line item; zero removes it
    SetQuantity { line_item_id: Uuid, quantity: u32 },
    /// Set the bill-wide discount percentage
    SetDiscount { percent: Decimal },
    /// Remove a line item
    RemoveItem { line_item_id: Uuid },
    /// Attach or replace the patient on the bill
    SetPatient { patient_id: Uuid },
    /// Attach free-text notes to the bill
    SetNotes { notes: String },
    /// Print the current breakdown
    Show,
    /// Finalize into a stored invoice and clear the session
    Finalize,
}

#[derive(Subcommand)]
enum ServicesAction {
    /// List all catalog entries
    List,
    /// Search by name or category
    Search { query: String },
}

#[derive(Subcommand)]
enum PatientsAction {
    /// List all registered patients
    List,
    /// Search by name or phone
    Search { query: String },
}

#[derive(Subcommand)]
enum InvoicesAction {
    /// List stored invoices, newest first
    List,
    /// Record a payment against a stored invoice
    Pay {
        invoice_id: Uuid,
        amount: Decimal,
        #[arg(long, default_value = "cash")]
        method: String,
    },
}

fn parse_method(s: &str) -> anyhow::Result<PaymentMethod> {
    Ok(match s {
        "cash" => PaymentMethod::Cash,
        "card" => PaymentMethod::Card,
        "insurance" => PaymentMethod::Insurance,
        "upi" => PaymentMethod::Upi,
        "online" => PaymentMethod::Online,
        "bank_transfer" => PaymentMethod::BankTransfer,
        other => bail!("unknown payment method: {other}"),
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let session = Session::new(&config.session_path);
    let store = JsonInvoiceStore::new(&config.store_path);
    let catalog = InMemoryCatalog::with_seed_data();
    let directory = InMemoryDirectory::with_seed_data();

    match cli.command {
        Command::Bill { action } => match action {
            BillAction::New { patient } => {
                let mut engine = BillingEngine::new(config.tax_rate_percent);
                if let Some(patient_id) = patient {
                    let patient = directory
                        .get(patient_id)
                        .await
                        .context("cannot start bill")?;
                    engine.attach_patient(patient)?;
                }
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::AddItem {
                service_id,
                quantity,
            } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                let service = catalog.get(service_id).await.context("cannot add item")?;
                engine.add_item_with_quantity(&service, quantity)?;
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::SetQuantity {
                line_item_id,
                quantity,
            } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                engine.update_quantity(line_item_id, quantity)?;
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::SetDiscount { percent } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                engine.set_discount_rate(percent)?;
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::RemoveItem { line_item_id } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                engine.remove_item(line_item_id);
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::SetPatient { patient_id } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                let patient = directory
                    .get(patient_id)
                    .await
                    .context("cannot attach patient")?;
                engine.attach_patient(patient)?;
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::SetNotes { notes } => {
                let mut engine = BillingEngine::from_bill(session.load_required()?);
                engine.set_notes(notes);
                session.save(engine.bill())?;
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::Show => {
                let engine = BillingEngine::from_bill(session.load_required()?);
                print_json(&engine.compute_breakdown())?;
            }
            BillAction::Finalize => {
                let engine = BillingEngine::from_bill(session.load_required()?);
                let numbers = SequentialInvoiceNumbers::starting_at(store.count()? + 1);
                let invoice = engine.finalize(&numbers)?;
                store.save(invoice.clone()).await?;
                session.clear()?;
                print_json(&invoice)?;
            }
        },
        Command::Services { action } => match action {
            ServicesAction::List => print_json(&catalog.list().await?)?,
            ServicesAction::Search { query } => print_json(&catalog.find(&query).await?)?,
        },
        Command::Patients { action } => match action {
            PatientsAction::List => print_json(&directory.search("").await?)?,
            PatientsAction::Search { query } => print_json(&directory.search(&query).await?)?,
        },
        Command::Invoices { action } => match action {
            InvoicesAction::List => print_json(&store.list().await?)?,
            InvoicesAction::Pay {
                invoice_id,
                amount,
                method,
            } => {
                let payment = Payment::new(invoice_id, amount, parse_method(&method)?);
                let updated = store.record_payment(payment).await?;
                print_json(&updated)?;
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;
    init_tracing("hospbill", &config.log_level);

    run(cli, config).await
}
