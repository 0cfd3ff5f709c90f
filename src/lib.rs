//! Boleto code parsing and validation library.
//!
//! A boleto is a Brazilian payment slip identified by a 44-digit barcode or
//! by the equivalent 47-digit typeable line printed above it. This library
//! validates either form, converts between them, and extracts the structured
//! data they encode.
//!
//! # Supported representations
//!
//! - **Barcode** (44 digits): the field-packed form behind the scannable
//!   bars, protected by one modulo-11 check digit.
//! - **Typeable line** (47 digits): the same data reorganized into three
//!   fields for manual entry, each protected by a modulo-10 check digit.
//!
//! # Features
//!
//! - Validate both representations, including the check digit conventions
//! - Convert between them (exact round-trip for every valid code)
//! - Extract issuing bank, amount, and due date
//! - Scrape candidate fields out of PDF-extracted text
//!
//! # Examples
//!
//! ## Parsing a typeable line
//!
//! ```
//! let boleto = boletokit::parse("10491.21203 41000.100044 00000.042499 1 12400000058333")?;
//!
//! assert_eq!(boleto.barcode, "10491124000000583331212041000100040000004249");
//! assert_eq!(boleto.bank.as_deref(), Some("Caixa Econômica Federal"));
//! assert_eq!(boleto.amount.unwrap().to_string(), "583.33");
//! # Ok::<(), boletokit::Error>(())
//! ```
//!
//! ## Handling invalid input
//!
//! ```
//! use boletokit::Error;
//!
//! match boletokit::parse("not a boleto") {
//!     Err(Error::InvalidLength(0)) => {} // offer manual entry instead
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod banks;
pub mod barcode_format;
pub mod checksum;
pub mod conversion;
pub mod error;
pub mod line_format;
pub mod text_scan;
pub mod types;

use std::sync::LazyLock;

// Re-export commonly used types
pub use banks::BankDirectory;
pub use barcode_format::{Barcode, BARCODE_LENGTH};
pub use error::{Error, Result};
pub use line_format::{format_typeable_line, TypeableLine, LINE_LENGTH};
pub use text_scan::{scan_text, ExtractedFields};
pub use types::Boleto;

static DEFAULT_BANKS: LazyLock<BankDirectory> = LazyLock::new(BankDirectory::default);

/// The two textual representations of a boleto code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    /// 44-digit barcode form.
    Barcode,
    /// 47-digit typeable line form.
    TypeableLine,
}

impl CodeFormat {
    /// Which representation a normalized digit count corresponds to.
    pub fn from_digit_count(count: usize) -> Option<Self> {
        match count {
            BARCODE_LENGTH => Some(CodeFormat::Barcode),
            LINE_LENGTH => Some(CodeFormat::TypeableLine),
            _ => None,
        }
    }

    /// Digit count of this representation.
    pub fn digit_count(&self) -> usize {
        match self {
            CodeFormat::Barcode => BARCODE_LENGTH,
            CodeFormat::TypeableLine => LINE_LENGTH,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            CodeFormat::Barcode => "barcode",
            CodeFormat::TypeableLine => "typeable line",
        }
    }
}

/// Parse a boleto code in either representation, using the built-in bank
/// directory.
///
/// Accepts arbitrary punctuation; only the digits matter. Dispatches on the
/// normalized digit count (44 or 47), validates all check digits, derives the
/// other representation, and extracts the encoded fields. Malformed input is
/// reported through [`Error`], never a panic.
pub fn parse(raw: &str) -> Result<Boleto> {
    parse_with_directory(raw, &DEFAULT_BANKS)
}

/// Parse a boleto code resolving bank names against a caller-supplied
/// directory.
pub fn parse_with_directory(raw: &str, banks: &BankDirectory) -> Result<Boleto> {
    let digits = types::strip_non_digits(raw);

    match CodeFormat::from_digit_count(digits.len()) {
        Some(CodeFormat::TypeableLine) => {
            let line = TypeableLine::parse(&digits)?;
            // The line's field checks do not cover its copy of the overall
            // check digit; deriving the barcode re-validates end to end.
            let barcode = Barcode::try_from(&line)?;
            Ok(assemble(barcode, line, banks))
        }
        Some(CodeFormat::Barcode) => {
            let barcode = Barcode::parse(&digits)?;
            let line = TypeableLine::from(&barcode);
            Ok(assemble(barcode, line, banks))
        }
        None => Err(Error::InvalidLength(digits.len())),
    }
}

fn assemble(barcode: Barcode, line: TypeableLine, banks: &BankDirectory) -> Boleto {
    Boleto {
        bank: banks.lookup(barcode.bank_code()).map(str::to_string),
        amount: barcode.amount(),
        due_date: barcode.due_date(),
        barcode: barcode.into_string(),
        typeable_line: line.into_string(),
    }
}
