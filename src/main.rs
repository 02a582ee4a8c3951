use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paystats::application::query::PaymentQueryService;
use paystats::config::{AppConfig, LogLevel};
use paystats::domain::payment::{Payment, PaymentType};
use paystats::domain::pipeline::SortOrder;
use paystats::domain::ports::PaymentRepositoryBox;
use paystats::domain::statistics::aggregate;
use paystats::infrastructure::file::FileRepository;
use paystats::infrastructure::latency::DelayedRepository;
use paystats::interfaces::csv::payment_writer::PaymentWriter;
use paystats::interfaces::format::{render_payment, render_statistics};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Text,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payments file (CSV, or JSON when the extension is .json)
    input: PathBuf,

    /// Only include payments of this type (card, bank, cash, gift)
    #[arg(long = "type", value_name = "TYPE")]
    payment_type: Option<PaymentType>,

    /// Sort order (date-desc, date-asc, amount-desc, amount-asc)
    #[arg(long, default_value_t = SortOrder::DateDesc)]
    sort: SortOrder,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Print statistics instead of the payments
    #[arg(long)]
    summary: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Path to persistent database (optional). If provided, the input is imported into RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(feature = "storage-rocksdb")]
async fn open_repository(cli: &Cli, config: &AppConfig) -> Result<PaymentRepositoryBox> {
    use paystats::domain::ports::PaymentRepository;
    use paystats::infrastructure::rocksdb::RocksDBPaymentRepository;

    let file = FileRepository::new(&cli.input, config.unknown_type);
    match &cli.db_path {
        Some(db_path) => {
            let store = RocksDBPaymentRepository::open(db_path).into_diagnostic()?;
            let payments = file.fetch_all().await.into_diagnostic()?;
            store.import(&payments).into_diagnostic()?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(file)),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
async fn open_repository(cli: &Cli, config: &AppConfig) -> Result<PaymentRepositoryBox> {
    if cli.db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to file storage."
        );
    }
    Ok(Box::new(FileRepository::new(&cli.input, config.unknown_type)))
}

fn write_output(cli: &Cli, payments: &[Payment]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (cli.format, cli.summary) {
        (OutputFormat::Csv, false) => PaymentWriter::new(out).write_payments(payments).into_diagnostic(),
        (OutputFormat::Csv, true) => PaymentWriter::new(out)
            .write_statistics(&aggregate(payments))
            .into_diagnostic(),
        (OutputFormat::Json, false) => {
            serde_json::to_writer_pretty(&mut out, payments).into_diagnostic()?;
            writeln!(out).into_diagnostic()
        }
        (OutputFormat::Json, true) => {
            serde_json::to_writer_pretty(&mut out, &aggregate(payments)).into_diagnostic()?;
            writeln!(out).into_diagnostic()
        }
        (OutputFormat::Text, false) => {
            for payment in payments {
                writeln!(out, "{}", render_payment(payment)).into_diagnostic()?;
            }
            Ok(())
        }
        (OutputFormat::Text, true) => {
            writeln!(out, "{}", render_statistics(&aggregate(payments))).into_diagnostic()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path).into_diagnostic()?,
        None => AppConfig::default(),
    };
    init_tracing(cli.log_level.unwrap_or(config.log_level).as_filter_str());

    let repository = open_repository(&cli, &config).await?;
    let repository: PaymentRepositoryBox = match config.latency() {
        Some(delay) => Box::new(DelayedRepository::new(repository, delay)),
        None => repository,
    };

    let service = PaymentQueryService::new(repository, config.fee_policy().into_diagnostic()?);
    let payments = service
        .get_payments(cli.payment_type, cli.sort)
        .await
        .into_diagnostic()?;
    tracing::info!(count = payments.len(), "query complete");

    write_output(&cli, &payments)
}
