//! The 44-digit barcode representation of a boleto.
//!
//! Field layout, by zero-indexed half-open ranges:
//!
//! | Field | Positions | Meaning |
//! |---|---|---|
//! | Bank code | 0..3 | 3-digit identifier of the issuing bank |
//! | Currency code | 3..4 | fixed at 9 in practice |
//! | Check digit | 4..5 | modulo-11 over the other 43 digits |
//! | Due-date factor | 5..9 | days since 1997-10-07; 0 = not encoded |
//! | Amount in cents | 9..19 | 0 = not encoded |
//! | Free field | 19..44 | issuer-specific, opaque |

use crate::checksum;
use crate::error::{Error, Result};
use crate::types::strip_non_digits;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;
use tracing::debug;

/// Digit count of the barcode representation.
pub const BARCODE_LENGTH: usize = 44;

/// A validated 44-digit boleto barcode.
///
/// Construction goes through [`Barcode::parse`] (or conversion from a
/// [`crate::TypeableLine`]), so every value of this type has a verified
/// modulo-11 check digit.
///
/// # Examples
///
/// ```
/// use boletokit::Barcode;
///
/// let barcode = Barcode::parse("10491124000000583331212041000100040000004249")?;
/// assert_eq!(barcode.bank_code(), "104");
/// assert_eq!(barcode.amount().unwrap().to_string(), "583.33");
/// # Ok::<(), boletokit::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    digits: String,
}

impl Barcode {
    /// Parse and validate a barcode from arbitrary text.
    ///
    /// Non-digit characters are stripped first. Fails with
    /// [`Error::InvalidLength`] when the remaining digit count is not 44 and
    /// with [`Error::InvalidBarcodeChecksum`] when the overall modulo-11
    /// check digit does not verify.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = strip_non_digits(input);
        if digits.len() != BARCODE_LENGTH {
            return Err(Error::InvalidLength(digits.len()));
        }
        Self::from_digits(digits)
    }

    /// Validate an already-normalized 44-digit string.
    pub(crate) fn from_digits(digits: String) -> Result<Self> {
        debug_assert_eq!(digits.len(), BARCODE_LENGTH);

        let found = digit_at(&digits, 4);
        let payload = format!("{}{}", &digits[0..4], &digits[5..]);
        let computed = checksum::modulo_11(&payload);
        if found != computed {
            debug!(%digits, computed, found, "barcode check digit mismatch");
            return Err(Error::InvalidBarcodeChecksum { computed, found });
        }

        Ok(Barcode { digits })
    }

    /// The digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Consume the barcode, returning the digit string.
    pub fn into_string(self) -> String {
        self.digits
    }

    /// The 3-digit bank code (positions 0..3).
    pub fn bank_code(&self) -> &str {
        &self.digits[0..3]
    }

    /// The currency code digit (position 3).
    pub fn currency_code(&self) -> u32 {
        digit_at(&self.digits, 3)
    }

    /// The overall modulo-11 check digit (position 4).
    pub fn check_digit(&self) -> u32 {
        digit_at(&self.digits, 4)
    }

    /// The due-date factor (positions 5..9): days since the base date,
    /// zero meaning "no due date encoded".
    pub fn due_date_factor(&self) -> u32 {
        self.digits[5..9].parse().unwrap_or(0)
    }

    /// The encoded amount in cents (positions 9..19).
    pub fn amount_cents(&self) -> u64 {
        self.digits[9..19].parse().unwrap_or(0)
    }

    /// The issuer-specific free field (positions 19..44).
    pub fn free_field(&self) -> &str {
        &self.digits[19..44]
    }

    /// The amount, or `None` when the code encodes zero. A zero amount
    /// conventionally means "not encoded", not a free slip.
    pub fn amount(&self) -> Option<Decimal> {
        match self.amount_cents() {
            0 => None,
            cents => Some(Decimal::new(cents as i64, 2)),
        }
    }

    /// The due date, or `None` when the due-date factor is zero.
    pub fn due_date(&self) -> Option<NaiveDate> {
        due_date_from_factor(self.due_date_factor())
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Resolve a due-date factor against the 1997-10-07 base date.
///
/// Pure civil-calendar arithmetic; a factor of zero means no due date.
pub(crate) fn due_date_from_factor(factor: u32) -> Option<NaiveDate> {
    if factor == 0 {
        return None;
    }
    base_date().checked_add_days(Days::new(u64::from(factor)))
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1997, 10, 7).expect("hardcoded base date should be valid")
}

/// Digit value at `index`; callers guarantee an ASCII-digit string.
fn digit_at(digits: &str, index: usize) -> u32 {
    digits.as_bytes()[index].wrapping_sub(b'0').into()
}
