//! Error types for the boletokit library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while validating and converting boleto codes.
///
/// All code-validation variants are recoverable: callers are expected to fall
/// back to manual entry rather than attempt to repair the input.
#[derive(Debug, Error)]
pub enum Error {
    /// Normalized digit count is neither 44 (barcode) nor 47 (typeable line).
    #[error("code has {0} digits after cleanup; expected 44 (barcode) or 47 (typeable line)")]
    InvalidLength(usize),

    /// One of the three typeable-line block check digits did not verify.
    #[error("typeable line field {field} check digit mismatch: computed {computed}, found {found}")]
    InvalidTypeableLineChecksum {
        /// Which of the three fields mismatched (1-based).
        field: u8,
        /// Check digit computed over the field contents.
        computed: u32,
        /// Check digit present in the input.
        found: u32,
    },

    /// The barcode's overall modulo-11 check digit did not verify.
    #[error("barcode check digit mismatch: computed {computed}, found {found}")]
    InvalidBarcodeChecksum {
        /// Check digit computed over the 43 payload digits.
        computed: u32,
        /// Check digit present at position 4 of the input.
        found: u32,
    },

    /// A typeable line verified its own block check digits, but the barcode
    /// derived from it fails the modulo-11 check. Signals a malformed or
    /// foreign-format input slipping past partial validation.
    #[error("typeable line fields verify but the derived barcode check digit does not")]
    InconsistentDerivedBarcode,

    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading a bank directory CSV.
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// Whether this error came from code validation (as opposed to I/O or
    /// configuration loading) and manual entry is a sensible fallback.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidLength(_)
                | Error::InvalidTypeableLineChecksum { .. }
                | Error::InvalidBarcodeChecksum { .. }
                | Error::InconsistentDerivedBarcode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_flagged() {
        assert!(Error::InvalidLength(12).is_validation());
        assert!(Error::InconsistentDerivedBarcode.is_validation());
        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone")).is_validation());
    }

    #[test]
    fn test_invalid_length_message_carries_count() {
        let msg = Error::InvalidLength(46).to_string();
        assert!(msg.contains("46"));
        assert!(msg.contains("44"));
        assert!(msg.contains("47"));
    }
}
