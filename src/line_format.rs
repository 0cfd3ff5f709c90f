//! The 47-digit typeable line representation of a boleto.
//!
//! The typeable line carries the same 43 information-bearing digits as the
//! barcode, reorganized into three fields a person can key in, each closed by
//! its own modulo-10 check digit:
//!
//! | Field | Positions | Meaning |
//! |---|---|---|
//! | Field 1 | 0..9 + digit at 9 | bank + currency + free field part 1 |
//! | Field 2 | 10..20 + digit at 20 | free field part 2 |
//! | Field 3 | 21..31 + digit at 31 | free field part 3 |
//! | Overall check digit | 32..33 | copy of the barcode's modulo-11 digit |
//! | Factor + amount | 33..47 | same semantics as barcode positions 5..19 |

use crate::checksum;
use crate::error::{Error, Result};
use crate::types::strip_non_digits;
use std::fmt;
use tracing::debug;

/// Digit count of the typeable line representation.
pub const LINE_LENGTH: usize = 47;

/// Positions of the three checked fields: (start, end, check digit index).
const FIELDS: [(usize, usize, usize); 3] = [(0, 9, 9), (10, 20, 20), (21, 31, 31)];

/// A validated 47-digit typeable line.
///
/// Every value of this type has verified modulo-10 check digits on all three
/// fields. Note this does not by itself guarantee the overall modulo-11 digit
/// is consistent; that is checked when deriving the [`crate::Barcode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeableLine {
    digits: String,
}

impl TypeableLine {
    /// Parse and validate a typeable line from arbitrary text.
    ///
    /// Non-digit characters are stripped first, so the canonical punctuated
    /// rendering is accepted as-is. Fails with [`Error::InvalidLength`] for
    /// any digit count other than 47 and with
    /// [`Error::InvalidTypeableLineChecksum`] on the first field whose
    /// modulo-10 digit does not verify.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = strip_non_digits(input);
        if digits.len() != LINE_LENGTH {
            return Err(Error::InvalidLength(digits.len()));
        }
        Self::from_digits(digits)
    }

    /// Validate an already-normalized 47-digit string.
    pub(crate) fn from_digits(digits: String) -> Result<Self> {
        debug_assert_eq!(digits.len(), LINE_LENGTH);

        for (index, (start, end, check)) in FIELDS.iter().enumerate() {
            let field = &digits[*start..*end];
            let found = u32::from(digits.as_bytes()[*check].wrapping_sub(b'0'));
            let computed = checksum::modulo_10(field);
            if found != computed {
                debug!(field = index + 1, computed, found, "typeable line check digit mismatch");
                return Err(Error::InvalidTypeableLineChecksum {
                    field: index as u8 + 1,
                    computed,
                    found,
                });
            }
        }

        Ok(TypeableLine { digits })
    }

    /// Build a line from digits already known to carry correct field check
    /// digits (used by barcode-to-line conversion).
    pub(crate) fn from_derived_digits(digits: String) -> Self {
        debug_assert!(Self::from_digits(digits.clone()).is_ok());
        TypeableLine { digits }
    }

    /// The digits as a string slice, without punctuation.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Consume the line, returning the digit string.
    pub fn into_string(self) -> String {
        self.digits
    }

    /// The overall modulo-11 check digit carried at position 32.
    pub fn overall_check_digit(&self) -> u32 {
        u32::from(self.digits.as_bytes()[32].wrapping_sub(b'0'))
    }

    /// The canonical punctuated rendering, e.g.
    /// `10491.21203 41000.100044 00000.042499 1 12400000058333`.
    pub fn formatted(&self) -> String {
        format_typeable_line(&self.digits)
    }
}

impl fmt::Display for TypeableLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Render a typeable line with its canonical dots and spaces.
///
/// This is a presentation helper, not a validator: input that does not
/// contain exactly 47 digits is returned unchanged.
pub fn format_typeable_line(line: &str) -> String {
    let digits = strip_non_digits(line);
    if digits.len() != LINE_LENGTH {
        return line.to_string();
    }

    format!(
        "{}.{} {}.{} {}.{} {} {}",
        &digits[0..5],
        &digits[5..10],
        &digits[10..15],
        &digits[15..21],
        &digits[21..26],
        &digits[26..32],
        &digits[32..33],
        &digits[33..47]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REAL_LINE: &str = "10491212034100010004400000042499112400000058333";
    const REAL_LINE_FORMATTED: &str = "10491.21203 41000.100044 00000.042499 1 12400000058333";

    #[test]
    fn test_parse_valid_line() {
        let line = TypeableLine::parse(REAL_LINE).unwrap();
        assert_eq!(line.as_str(), REAL_LINE);
        assert_eq!(line.overall_check_digit(), 1);
    }

    #[test]
    fn test_parse_accepts_punctuated_rendering() {
        let line = TypeableLine::parse(REAL_LINE_FORMATTED).unwrap();
        assert_eq!(line.as_str(), REAL_LINE);
    }

    #[test]
    fn test_field_checksum_mismatch_reports_field() {
        // Flip the last digit of field 2 (position 19) so its check fails.
        let mut digits: Vec<u8> = REAL_LINE.bytes().collect();
        digits[19] = if digits[19] == b'9' { b'0' } else { digits[19] + 1 };
        let tampered = String::from_utf8(digits).unwrap();

        match TypeableLine::parse(&tampered) {
            Err(Error::InvalidTypeableLineChecksum { field: 2, .. }) => {}
            other => panic!("expected field 2 checksum failure, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            TypeableLine::parse(""),
            Err(Error::InvalidLength(0))
        ));
        let truncated = &REAL_LINE[..46];
        assert!(matches!(
            TypeableLine::parse(truncated),
            Err(Error::InvalidLength(46))
        ));
    }

    #[test]
    fn test_format_typeable_line() {
        assert_eq!(format_typeable_line(REAL_LINE), REAL_LINE_FORMATTED);
        // Already-formatted input normalizes to the same rendering.
        assert_eq!(
            format_typeable_line(REAL_LINE_FORMATTED),
            REAL_LINE_FORMATTED
        );
    }

    #[test]
    fn test_format_is_identity_for_other_lengths() {
        assert_eq!(format_typeable_line(""), "");
        assert_eq!(format_typeable_line("abc"), "abc");
        assert_eq!(
            format_typeable_line("10491124000000583331212041000100040000004249"),
            "10491124000000583331212041000100040000004249"
        );
    }

    #[test]
    fn test_display_uses_formatted_rendering() {
        let line = TypeableLine::parse(REAL_LINE).unwrap();
        assert_eq!(line.to_string(), REAL_LINE_FORMATTED);
    }
}
