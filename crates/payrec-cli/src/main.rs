//! CLI for invoice text extraction and payment-register reconciliation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{extract, reconcile};

/// Extract structured invoices from OCR text and reconcile them against a
/// payment register
#[derive(Parser)]
#[command(name = "payrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract invoice fields from OCR text files
    Extract(extract::ExtractArgs),

    /// Reconcile extracted invoices against a payment register
    Reconcile(reconcile::ReconcileArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Reconcile(args) => reconcile::run(args),
    }
}
