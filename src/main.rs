use chrono::Utc;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use washkart::application::context::CallContext;
use washkart::application::engine::LedgerEngine;
use washkart::domain::order::Amount;
use washkart::domain::ports::TreasuryBox;
use washkart::infrastructure::in_memory::{
    InMemoryAdminStore, InMemoryCustomerStore, InMemoryOrderStore, RecordingTreasury,
};
use washkart::interfaces::csv::report_writer::OrderReportWriter;
use washkart::interfaces::jsonl::op_reader::{OpReader, OpRecord};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations journal (JSON lines)
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// The ledger's owning identity: holds the escrow and registers admins.
    #[arg(long, default_value = "washkart.near")]
    owner: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let treasury: TreasuryBox = Box::new(RecordingTreasury::new());

    let engine = match cli.db_path {
        Some(db_path) => {
            // Use persistent storage (RocksDB); one handle serves all three
            // store ports.
            #[cfg(feature = "storage-rocksdb")]
            let engine = {
                let store = washkart::infrastructure::rocksdb::RocksDbStore::open(db_path)
                    .into_diagnostic()?;
                LedgerEngine::new(
                    cli.owner,
                    Box::new(store.clone()),
                    Box::new(store.clone()),
                    Box::new(store),
                    treasury,
                )
            };
            #[cfg(not(feature = "storage-rocksdb"))]
            let engine = {
                let _ = db_path;
                return Err(miette::miette!(
                    "--db-path requires a build with the storage-rocksdb feature"
                ))
            };
            engine
        }
        None => LedgerEngine::new(
            cli.owner,
            Box::new(InMemoryAdminStore::new()),
            Box::new(InMemoryCustomerStore::new()),
            Box::new(InMemoryOrderStore::new()),
            treasury,
        ),
    };

    // Replay the journal. Rejected operations are reported and skipped so
    // one bad record never aborts the run.
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OpReader::new(file);
    for op_result in reader.ops() {
        match op_result {
            Ok(op) => {
                if let Err(e) = apply(&engine, op).await {
                    warn!(error = %e, "operation rejected");
                }
            }
            Err(e) => {
                warn!(error = %e, "malformed journal line");
            }
        }
    }

    // Output the final order ledger.
    let orders = engine.into_report().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = OrderReportWriter::new(stdout.lock());
    writer.write_orders(orders).into_diagnostic()?;

    Ok(())
}

async fn apply(engine: &LedgerEngine, op: OpRecord) -> washkart::error::Result<()> {
    let now = Utc::now().timestamp_millis() as u64;
    match op {
        OpRecord::RegisterAdmin { caller, admin_id } => {
            engine
                .register_admin(&CallContext::new(caller, now), &admin_id)
                .await
        }
        OpRecord::RegisterCustomer { caller, profile } => {
            engine
                .register_customer(&CallContext::new(caller, now), profile)
                .await
        }
        OpRecord::UpdateCustomer { caller, profile } => {
            engine
                .update_customer(&CallContext::new(caller, now), profile)
                .await
        }
        OpRecord::CreateOrder {
            caller,
            id,
            description,
            weight_in_grams,
            attached,
        } => {
            let ctx = CallContext::new(caller, now).with_attached(Amount::new(attached)?);
            engine
                .create_order(&ctx, &id, &description, weight_in_grams)
                .await
        }
        OpRecord::UpdateOrderStatus {
            caller,
            order_id,
            status,
        } => {
            engine
                .update_order_status(&CallContext::new(caller, now), &order_id, status)
                .await
        }
        OpRecord::SubmitFeedback {
            caller,
            order_id,
            rating,
            comment,
        } => {
            engine
                .submit_feedback(&CallContext::new(caller, now), &order_id, rating, &comment)
                .await
        }
    }
}
