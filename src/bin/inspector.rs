//! Boleto inspector - CLI tool for validating boleto codes and printing the
//! data they encode.

use boletokit::{format_typeable_line, parse_with_directory, BankDirectory, Result};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "boleto_inspect")]
#[command(about = "Validate boleto barcodes / typeable lines and show their fields", long_about = None)]
struct Cli {
    /// Boleto code (44-digit barcode or 47-digit typeable line);
    /// reads one code per line from stdin or --input when omitted
    code: Option<String>,

    /// Input file with one code per line (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Additional bank directory CSV (code,name) merged over the built-in table
    #[arg(long)]
    banks: Option<String>,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(all_valid) => {
            if !all_valid {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let banks = load_banks(cli.banks.as_deref())?;

    let input = match (&cli.code, &cli.input) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => {
            let mut buf = String::new();
            File::open(path)?.read_to_string(&mut buf)?;
            buf
        }
        (None, None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut all_valid = true;
    for code in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !inspect(code, &banks) {
            all_valid = false;
        }
    }
    Ok(all_valid)
}

fn load_banks(path: Option<&str>) -> Result<BankDirectory> {
    let mut banks = BankDirectory::default();
    if let Some(path) = path {
        let mut file = File::open(path)?;
        banks.extend_from_read(&mut file)?;
    }
    Ok(banks)
}

fn inspect(code: &str, banks: &BankDirectory) -> bool {
    match parse_with_directory(code, banks) {
        Ok(boleto) => {
            println!("barcode:       {}", boleto.barcode);
            println!(
                "typeable line: {}",
                format_typeable_line(&boleto.typeable_line)
            );
            println!("bank:          {}", boleto.bank.as_deref().unwrap_or("-"));
            match boleto.amount {
                Some(amount) => println!("amount:        {}", amount),
                None => println!("amount:        -"),
            }
            match boleto.due_date {
                Some(date) => println!("due date:      {}", date),
                None => println!("due date:      -"),
            }
            println!();
            true
        }
        Err(e) => {
            println!("invalid: {} ({})", code, e);
            println!();
            false
        }
    }
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
