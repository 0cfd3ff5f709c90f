//! Conversion between the barcode and typeable line representations.
//!
//! Both forms carry the same 43 information-bearing digits; conversion is a
//! pure reorganization plus check digit derivation. Round-tripping a valid
//! barcode through the typeable line reproduces it exactly.

use crate::barcode_format::Barcode;
use crate::checksum;
use crate::error::{Error, Result};
use crate::line_format::TypeableLine;
use tracing::debug;

/// Derive the typeable line from a validated barcode.
///
/// Infallible: the three field check digits are computed here, and the
/// overall check digit was already verified on the barcode.
impl From<&Barcode> for TypeableLine {
    fn from(barcode: &Barcode) -> Self {
        let b = barcode.as_str();

        // Field 1: bank + currency + first 5 free-field digits.
        let field1 = format!("{}{}", &b[0..4], &b[19..24]);
        // Fields 2 and 3: remaining free-field digits, 10 each.
        let field2 = &b[24..34];
        let field3 = &b[34..44];

        let digits = format!(
            "{field1}{}{field2}{}{field3}{}{}{}",
            checksum::modulo_10(&field1),
            checksum::modulo_10(field2),
            checksum::modulo_10(field3),
            &b[4..5],
            &b[5..19],
        );

        TypeableLine::from_derived_digits(digits)
    }
}

/// Derive the barcode from a validated typeable line.
///
/// The line's own field check digits say nothing about the overall modulo-11
/// digit it carries, so the derived barcode is re-validated; a mismatch there
/// is reported as the distinct [`Error::InconsistentDerivedBarcode`]. Whether
/// every real-world line passes this extra check is an open question; it is
/// kept strict so foreign or malformed formats do not slip through.
impl TryFrom<&TypeableLine> for Barcode {
    type Error = Error;

    fn try_from(line: &TypeableLine) -> Result<Self> {
        let l = line.as_str();

        // Reassemble: bank + currency, overall check digit, factor + amount,
        // then the three free-field parts with their check digits dropped.
        let digits = format!(
            "{}{}{}{}{}{}",
            &l[0..4],
            &l[32..33],
            &l[33..47],
            &l[4..9],
            &l[10..20],
            &l[21..31],
        );

        Barcode::from_digits(digits).map_err(|err| match err {
            Error::InvalidBarcodeChecksum { computed, found } => {
                debug!(computed, found, "typeable line derived an inconsistent barcode");
                Error::InconsistentDerivedBarcode
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REAL_BARCODE: &str = "10491124000000583331212041000100040000004249";
    const REAL_LINE: &str = "10491212034100010004400000042499112400000058333";

    #[test]
    fn test_barcode_to_line() {
        let barcode = Barcode::parse(REAL_BARCODE).unwrap();
        let line = TypeableLine::from(&barcode);
        assert_eq!(line.as_str(), REAL_LINE);
    }

    #[test]
    fn test_line_to_barcode() {
        let line = TypeableLine::parse(REAL_LINE).unwrap();
        let barcode = Barcode::try_from(&line).unwrap();
        assert_eq!(barcode.as_str(), REAL_BARCODE);
    }

    #[test]
    fn test_round_trip_barcode_line_barcode() {
        for digits in [
            REAL_BARCODE,
            "00197100000001234561234567890123456789012345",
            "23797000000000000001234567890123456789012345",
        ] {
            let barcode = Barcode::parse(digits).unwrap();
            let line = TypeableLine::from(&barcode);
            let back = Barcode::try_from(&line).unwrap();
            assert_eq!(back.as_str(), digits);
        }
    }

    #[test]
    fn test_round_trip_line_barcode_line() {
        let line = TypeableLine::parse(REAL_LINE).unwrap();
        let barcode = Barcode::try_from(&line).unwrap();
        let back = TypeableLine::from(&barcode);
        assert_eq!(back.as_str(), REAL_LINE);
    }

    #[test]
    fn test_tampered_overall_digit_is_inconsistent() {
        // Position 32 is outside all three checked fields, so the line still
        // verifies on its own; only the derived barcode exposes the tamper.
        let mut digits: Vec<u8> = REAL_LINE.bytes().collect();
        digits[32] = b'9';
        let tampered = String::from_utf8(digits).unwrap();

        let line = TypeableLine::parse(&tampered).unwrap();
        assert!(matches!(
            Barcode::try_from(&line),
            Err(Error::InconsistentDerivedBarcode)
        ));
    }
}
