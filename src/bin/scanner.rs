//! Boleto scanner - CLI tool for scraping boleto fields out of free-form
//! text, e.g. the output of a PDF text extractor.

use boletokit::{format_typeable_line, parse, scan_text, Result};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "boleto_scan")]
#[command(about = "Scan free-form text for boleto fields and cross-check any code found", long_about = None)]
struct Cli {
    /// Text file to scan (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut text = String::new();
    match &cli.input {
        Some(path) => {
            File::open(path)?.read_to_string(&mut text)?;
        }
        None => {
            io::stdin().read_to_string(&mut text)?;
        }
    }

    let fields = scan_text(&text);

    report("typeable line", fields.typeable_line.as_deref().map(format_typeable_line));
    report("barcode", fields.barcode.clone());
    report("amount", fields.amount.map(|a| a.to_string()));
    report("due date", fields.due_date.map(|d| d.to_string()));
    report("beneficiary", fields.beneficiary.clone());
    report("payer", fields.payer.clone());
    report("document no.", fields.document_number.clone());

    // The scanner only matches shapes; run the candidate through the real
    // validator before trusting it.
    let candidate = fields.typeable_line.or(fields.barcode);
    match candidate {
        Some(code) => match parse(&code) {
            Ok(boleto) => {
                println!("validated:     yes");
                println!(
                    "bank:          {}",
                    boleto.bank.as_deref().unwrap_or("-")
                );
            }
            Err(e) => println!("validated:     no ({})", e),
        },
        None => println!("validated:     no code found"),
    }

    Ok(())
}

fn report(label: &str, value: Option<String>) {
    println!("{:<14} {}", format!("{label}:"), value.as_deref().unwrap_or("-"));
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
