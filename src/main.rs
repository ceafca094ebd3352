use clap::Parser;
use feeledger::application::engine::FeeEngine;
use feeledger::domain::ledger::BalanceFilter;
use feeledger::domain::ports::PaymentStoreBox;
use feeledger::domain::student::{ClassId, StudentId};
use feeledger::infrastructure::in_memory::{
    InMemoryFeeSchedule, InMemoryPaymentStore, InMemoryStudentDirectory,
};
use feeledger::interfaces::csv::balance_writer::BalanceWriter;
use feeledger::interfaces::csv::journal::JournalSession;
use feeledger::interfaces::csv::journal_reader::JournalReader;
use feeledger::interfaces::csv::roster_reader::{read_fee_schedule, read_students};
use feeledger::settings::Settings;
use feeledger::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Journal CSV of payment submissions and review decisions
    journal: PathBuf,

    /// Students CSV (id, name, class, level, curriculum, academic_year, guardians)
    #[arg(long)]
    students: PathBuf,

    /// Fee schedule CSV (level, curriculum, academic_year, total_fee)
    #[arg(long)]
    fees: PathBuf,

    /// Path to persistent payment database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Settings file (TOML). Defaults to ./feeledger.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only report this student
    #[arg(long)]
    student: Option<String>,

    /// Only report students of this class
    #[arg(long)]
    class: Option<String>,

    /// Print the cohort rollup instead of per-student balances
    #[arg(long)]
    rollup: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    telemetry::init(&settings.log_filter);

    let students = InMemoryStudentDirectory::new();
    for student in read_students(File::open(&cli.students).into_diagnostic()?)? {
        students.insert(student).await?;
    }

    let fees = InMemoryFeeSchedule::new();
    for entry in read_fee_schedule(File::open(&cli.fees).into_diagnostic()?)? {
        fees.insert(entry).await?;
    }

    let db_path = cli.db_path.or(settings.db_path);
    let payments = payment_store(db_path.as_deref())?;
    let engine = FeeEngine::new(payments, Box::new(students), Box::new(fees));

    // Replay the journal
    let file = File::open(&cli.journal).into_diagnostic()?;
    let mut session = JournalSession::new();
    for entry in JournalReader::new(file).entries() {
        match entry {
            Ok(entry) => {
                if let Err(e) = session.apply(&engine, entry).await {
                    error!("Error processing journal entry: {}", e);
                }
            }
            Err(e) => {
                error!("Error reading journal entry: {}", e);
            }
        }
    }

    let filter = BalanceFilter {
        student: cli.student.map(StudentId),
        class: cli.class.map(ClassId),
    };
    let report = engine.compute_balances(&filter).await?;
    info!(
        students = report.rollup.students,
        outstanding = %report.rollup.total_outstanding.value(),
        "ledger computed"
    );

    let stdout = io::stdout();
    let mut writer = BalanceWriter::new(stdout.lock());
    if cli.rollup {
        writer.write_rollup(&report.rollup)?;
    } else {
        writer.write_snapshots(&report.snapshots)?;
    }

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn payment_store(db_path: Option<&Path>) -> Result<PaymentStoreBox> {
    use feeledger::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "using RocksDB payment store");
            Ok(Box::new(RocksDBStore::open(path)?))
        }
        None => Ok(Box::new(InMemoryPaymentStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn payment_store(db_path: Option<&Path>) -> Result<PaymentStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Box::new(InMemoryPaymentStore::new()))
}
