//! Reconcile command - match extracted invoices against a payment register.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use payrec_core::{normalize_amount, reconcile, Invoice, PaymentRecord, Reconciliation};

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Invoices file (JSON array, as produced by `payrec extract`)
    #[arg(required = true)]
    invoices: PathBuf,

    /// Payment register file (CSV or JSON)
    #[arg(short, long, required = true)]
    register: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full report as JSON
    Json,
    /// Per-invoice results as CSV
    Csv,
}

/// Full report written by the JSON format.
#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    #[serde(flatten)]
    reconciliation: &'a Reconciliation,
}

pub fn run(args: ReconcileArgs) -> anyhow::Result<()> {
    let invoices = load_invoices(&args.invoices)?;
    let register = load_register(&args.register)?;

    info!(
        "Reconciling {} invoices against {} register records",
        invoices.len(),
        register.len()
    );

    let outcome = reconcile(&invoices, &register)
        .with_context(|| format!("Failed to reconcile {}", args.invoices.display()))?;

    let output = match args.format {
        OutputFormat::Json => {
            let report = Report {
                generated_at: chrono::Utc::now().to_rfc3339(),
                reconciliation: &outcome,
            };
            if args.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            }
        }
        OutputFormat::Csv => format_csv(&outcome)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let summary = &outcome.summary;
    eprintln!(
        "{} {} matched, {} mismatched, {} missing, {} duplicate ({} register records unclaimed)",
        style("ℹ").blue(),
        summary.matched,
        summary.mismatched,
        summary.missing_invoices,
        summary.duplicate,
        summary.missing_records,
    );

    Ok(())
}

fn load_invoices(path: &Path) -> anyhow::Result<Vec<Invoice>> {
    if !path.exists() {
        anyhow::bail!("Invoices file not found: {}", path.display());
    }
    let text = fs::read_to_string(path)?;
    let invoices: Vec<Invoice> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse invoices from {}", path.display()))?;
    debug!("Loaded {} invoices", invoices.len());
    Ok(invoices)
}

fn load_register(path: &Path) -> anyhow::Result<Vec<PaymentRecord>> {
    if !path.exists() {
        anyhow::bail!("Register file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut records = match extension.as_str() {
        "json" => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse register from {}", path.display()))?
        }
        "csv" => read_register_csv(path)?,
        _ => anyhow::bail!("Unsupported register format: {}", extension),
    };

    // Rows arriving without an id get a stable positional one so results
    // can refer back to them.
    for (position, record) in records.iter_mut().enumerate() {
        if record.id.trim().is_empty() {
            record.id = format!("reg-{}", position + 1);
        }
    }

    debug!("Loaded {} register records", records.len());
    Ok(records)
}

/// Column aliases accepted for each register field, checked in order.
const ID_COLUMNS: &[&str] = &["id", "record_id"];
const VENDOR_COLUMNS: &[&str] = &["vendor_name", "vendor", "company", "name"];
const AMOUNT_COLUMNS: &[&str] = &["expected_amount", "amount", "total"];
const DUE_DATE_COLUMNS: &[&str] = &["due_date", "due", "date"];
const REFERENCE_COLUMNS: &[&str] = &["reference_number", "reference", "ref", "invoice_number", "invoice_no"];
const STATUS_COLUMNS: &[&str] = &["status"];

fn read_register_csv(path: &Path) -> anyhow::Result<Vec<PaymentRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open register {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    let column = |aliases: &[&str]| -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| headers.iter().position(|header| header == alias))
    };

    let vendor_column = column(VENDOR_COLUMNS).ok_or_else(|| {
        anyhow::anyhow!(
            "Register {} has no vendor column (expected one of: {})",
            path.display(),
            VENDOR_COLUMNS.join(", ")
        )
    })?;
    let id_column = column(ID_COLUMNS);
    let amount_column = column(AMOUNT_COLUMNS);
    let due_date_column = column(DUE_DATE_COLUMNS);
    let reference_column = column(REFERENCE_COLUMNS);
    let status_column = column(STATUS_COLUMNS);

    let field = |row: &csv::StringRecord, index: Option<usize>| -> Option<String> {
        index
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(PaymentRecord {
            id: field(&row, id_column).unwrap_or_default(),
            vendor_name: field(&row, Some(vendor_column)).unwrap_or_default(),
            expected_amount: normalize_amount(field(&row, amount_column).as_deref()),
            due_date: field(&row, due_date_column),
            reference_number: field(&row, reference_column),
            status: field(&row, status_column).unwrap_or_else(|| "unpaid".to_string()),
        });
    }

    Ok(records)
}

fn format_csv(outcome: &Reconciliation) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_id",
        "record_id",
        "match_status",
        "discrepancy",
        "flag_reason",
        "confidence_score",
    ])?;

    for result in &outcome.results {
        wtr.write_record([
            result.invoice_id.as_str(),
            result.record_id.as_deref().unwrap_or(""),
            result.match_status.as_str(),
            &result.discrepancy.to_string(),
            result.flag_reason.as_deref().unwrap_or(""),
            &result.confidence_score.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
