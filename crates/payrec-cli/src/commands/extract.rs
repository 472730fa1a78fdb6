//! Extract command - pull invoice fields out of OCR text files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use payrec_core::{DraftExtractor, Invoice};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input OCR text files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let extractor = DraftExtractor::new();
    let mut invoices = Vec::with_capacity(args.inputs.len());

    for (position, input) in args.inputs.iter().enumerate() {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }

        info!("Extracting from {}", input.display());
        let text = fs::read_to_string(input)?;
        let draft = extractor.extract(&text);
        debug!(
            "{}: invoice {} at confidence {}",
            input.display(),
            draft.invoice_number,
            draft.confidence
        );

        invoices.push(Invoice::from_draft(format!("inv-{}", position + 1), draft));
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&invoices)?
    } else {
        serde_json::to_string(&invoices)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Extracted {} invoices to {}",
            style("✓").green(),
            invoices.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
