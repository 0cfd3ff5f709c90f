//! Common types shared across the boleto representations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured data extracted from a validated boleto code.
///
/// Produced by [`crate::parse`]; both textual representations are always
/// present and mutually consistent. The optional fields are absent when the
/// code does not encode them (a zero due-date factor or a zero amount), not
/// when extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boleto {
    /// The 44-digit barcode representation.
    pub barcode: String,

    /// The 47-digit typeable line representation.
    pub typeable_line: String,

    /// Display name of the issuing bank, when the 3-digit code is known.
    pub bank: Option<String>,

    /// Amount in the slip's currency; `None` when not encoded.
    pub amount: Option<Decimal>,

    /// Due date; `None` when the code carries a zero due-date factor.
    pub due_date: Option<NaiveDate>,
}

/// Remove every character that is not an ASCII digit.
///
/// All validation and conversion routines operate on the output of this
/// function, so punctuation and grouping spaces in user input are harmless.
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_non_digits() {
        assert_eq!(
            strip_non_digits("10491.21203 41000.100044"),
            "104912120341000100044"
        );
        assert_eq!(strip_non_digits("abc"), "");
        assert_eq!(strip_non_digits(""), "");
    }

    #[test]
    fn test_boleto_serde_round_trip() {
        let boleto = Boleto {
            barcode: "10491124000000583331212041000100040000004249".into(),
            typeable_line: "10491212034100010004400000042499112400000058333".into(),
            bank: Some("Caixa Econômica Federal".into()),
            amount: Some(Decimal::new(58333, 2)),
            due_date: NaiveDate::from_ymd_opt(2001, 2, 28),
        };

        let json = serde_json::to_string(&boleto).unwrap();
        let back: Boleto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, boleto);
    }
}
