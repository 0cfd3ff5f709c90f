//! Best-effort extraction of boleto fields from unstructured text.
//!
//! This is the collaborator surface for PDF uploads: the caller extracts the
//! text (PDF decoding is out of scope here) and this module scrapes it for
//! whatever boleto fields it can recognize. Everything is optional and
//! heuristic; any digit string found here must still go through
//! [`crate::parse`], which re-validates it from scratch.
//!
//! All digit classes below are `[0-9]`, never `\d`: the regex crate's `\d`
//! matches Unicode digits, and matches here get byte-sliced at fixed
//! offsets.

use crate::barcode_format;
use crate::types::strip_non_digits;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

/// Punctuated typeable line as printed on slips, e.g.
/// `10491.21203 41000.100044 00000.042499 1 12400000058333`.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[0-9]{5}\.?[0-9]{5}[ \t]+[0-9]{5}\.?[0-9]{6}[ \t]+[0-9]{5}\.?[0-9]{6}[ \t]+[0-9][ \t]+[0-9]{14}",
    )
    .expect("hardcoded regex should be valid")
});

/// Unpunctuated 47- and 44-digit runs, searched in whitespace-collapsed text.
static BARE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{47}").expect("hardcoded regex should be valid"));
static BARE_BARCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{44}").expect("hardcoded regex should be valid"));

/// Amount in Brazilian rendering near a "Valor" label, e.g.
/// `Valor do Documento: R$ 1.234,56`.
static AMOUNT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)valor(?:\s+do\s+documento|\s+cobrado)?[\s:]*R?\$?\s*([0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2})",
    )
    .expect("hardcoded regex should be valid")
});
static AMOUNT_CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"R\$\s*([0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2})")
        .expect("hardcoded regex should be valid")
});

/// Due date near a "Vencimento" label, day/month/year with 2- or 4-digit year.
static DUE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)vencimento[\s:]*([0-9]{2})[/-]([0-9]{2})[/-]([0-9]{4}|[0-9]{2})")
        .expect("hardcoded regex should be valid")
});

/// Beneficiary (payee) name after its label, to end of line.
static BENEFICIARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)benefici[áa]rio[\s:]+([^\r\n]+)").expect("hardcoded regex should be valid")
});

/// Payer name after its label, to end of line.
static PAYER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:pagador|sacado)[\s:/]*([^\r\n]+)").expect("hardcoded regex should be valid")
});

/// Trailing digit runs (document numbers, CNPJ/CPF) glued to a captured name.
static TRAILING_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[0-9][0-9 .,/-]*$").expect("hardcoded regex should be valid")
});

/// Document number labels.
static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:nosso\s+n[úu]mero|n[úu]mero\s+do\s+documento|nº\s*do\s+documento)[\s:]*([0-9][0-9.-]*)",
    )
    .expect("hardcoded regex should be valid")
});

/// Fields scraped from free-form text. All optional; none validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// Candidate 44-digit barcode.
    pub barcode: Option<String>,

    /// Candidate 47-digit typeable line.
    pub typeable_line: Option<String>,

    /// Amount found in the text or embedded in the typeable line.
    pub amount: Option<Decimal>,

    /// Due date found in the text or derived from the line's factor digits.
    pub due_date: Option<NaiveDate>,

    /// Beneficiary (payee) name.
    pub beneficiary: Option<String>,

    /// Payer ("pagador"/"sacado") name.
    pub payer: Option<String>,

    /// Document number ("nosso número" or similar).
    pub document_number: Option<String>,
}

/// Scrape boleto fields from free-form text.
///
/// Never fails: missing or unrecognizable fields are simply `None`. Digit
/// strings are located by shape only; callers re-validate through
/// [`crate::parse`].
pub fn scan_text(text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();
    let condensed: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    fields.typeable_line = find_typeable_line(text, &condensed);
    fields.barcode = find_barcode(&condensed, fields.typeable_line.as_deref());
    fields.amount = find_amount(text, fields.typeable_line.as_deref());
    fields.due_date = find_due_date(text, fields.typeable_line.as_deref());
    fields.beneficiary = find_beneficiary(text);
    fields.payer = find_payer(text);
    fields.document_number = find_document_number(text);

    debug!(
        line = fields.typeable_line.is_some(),
        barcode = fields.barcode.is_some(),
        amount = fields.amount.is_some(),
        due_date = fields.due_date.is_some(),
        "text scan finished"
    );
    fields
}

fn find_typeable_line(text: &str, condensed: &str) -> Option<String> {
    for m in LINE_RE.find_iter(text) {
        let digits = strip_non_digits(m.as_str());
        if digits.len() == 47 {
            return Some(digits);
        }
    }
    BARE_LINE_RE.find(condensed).map(|m| m.as_str().to_string())
}

fn find_barcode(condensed: &str, line: Option<&str>) -> Option<String> {
    BARE_BARCODE_RE
        .find_iter(condensed)
        .map(|m| m.as_str())
        // The typeable line itself contains 44-digit windows; skip those.
        .find(|candidate| line.map_or(true, |l| !l.contains(*candidate)))
        .map(str::to_string)
}

fn find_amount(text: &str, line: Option<&str>) -> Option<Decimal> {
    // The line's amount digits are more reliable than label matching.
    if let Some(line) = line {
        if let Ok(cents) = line[37..47].parse::<i64>() {
            if cents > 0 {
                return Some(Decimal::new(cents, 2));
            }
        }
    }

    AMOUNT_LABEL_RE
        .captures(text)
        .or_else(|| AMOUNT_CURRENCY_RE.captures(text))
        .and_then(|caps| parse_brl_amount(&caps[1]))
}

fn parse_brl_amount(text: &str) -> Option<Decimal> {
    let normalized = text.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

fn find_due_date(text: &str, line: Option<&str>) -> Option<NaiveDate> {
    if let Some(caps) = DUE_DATE_RE.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if year < 100 {
            // Two-digit years pivot at 50, matching printed slips.
            year += if year > 50 { 1900 } else { 2000 };
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    // Fall back to the factor digits carried in the typeable line.
    let factor: u32 = line?[33..37].parse().ok()?;
    barcode_format::due_date_from_factor(factor)
}

fn find_beneficiary(text: &str) -> Option<String> {
    let caps = BENEFICIARY_RE.captures(text)?;
    clean_name(&caps[1], 10)
}

fn find_payer(text: &str) -> Option<String> {
    let caps = PAYER_RE.captures(text)?;
    clean_name(&caps[1], 5)
}

/// Trim a captured name and drop glued trailing numbers. Length bounds count
/// characters, not bytes, so accented names are not over-counted.
fn clean_name(raw: &str, min_chars: usize) -> Option<String> {
    let name = TRAILING_DIGITS_RE.replace(raw.trim(), "").into_owned();
    if (min_chars..=100).contains(&name.chars().count()) {
        Some(name)
    } else {
        None
    }
}

fn find_document_number(text: &str) -> Option<String> {
    let caps = DOCUMENT_RE.captures(text)?;
    let number = caps[1].trim_end_matches(['.', '-']).to_string();
    if number.len() >= 3 {
        Some(number)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SLIP_TEXT: &str = "\
Caixa Econômica Federal
Beneficiário: EMPRESA EXEMPLO LTDA
Pagador: FULANO DE TAL
Vencimento: 28/02/2001
Valor do Documento: R$ 583,33
Número do Documento: 123456
10491.21203 41000.100044 00000.042499 1 12400000058333
";

    #[test]
    fn test_scan_full_slip_text() {
        let fields = scan_text(SLIP_TEXT);
        assert_eq!(
            fields.typeable_line.as_deref(),
            Some("10491212034100010004400000042499112400000058333")
        );
        assert_eq!(fields.amount, Some(Decimal::new(58333, 2)));
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2001, 2, 28));
        assert_eq!(fields.beneficiary.as_deref(), Some("EMPRESA EXEMPLO LTDA"));
        assert_eq!(fields.payer.as_deref(), Some("FULANO DE TAL"));
        assert_eq!(fields.document_number.as_deref(), Some("123456"));
    }

    #[test]
    fn test_scan_empty_text() {
        assert_eq!(scan_text(""), ExtractedFields::default());
    }

    #[test]
    fn test_scan_ignores_non_ascii_digits() {
        // Devanagari digits match the regex crate's `\d` but not `[0-9]`;
        // they must be ignored rather than sliced at byte offsets.
        let devanagari = "०".repeat(47);
        assert_eq!(scan_text(&devanagari), ExtractedFields::default());

        let fields = scan_text("Vencimento: १५/०३/२०२४ Valor: ९९,९९");
        assert_eq!(fields.due_date, None);
        assert_eq!(fields.amount, None);
    }

    #[test]
    fn test_scan_bare_barcode() {
        let text = "pague o boleto\ncodigo: 10491124000000583331212041000100040000004249 ate sexta";
        let fields = scan_text(text);
        assert_eq!(
            fields.barcode.as_deref(),
            Some("10491124000000583331212041000100040000004249")
        );
        assert_eq!(fields.typeable_line, None);
    }

    #[test]
    fn test_amount_from_text_labels() {
        let fields = scan_text("Valor cobrado: 1.234,56");
        assert_eq!(fields.amount, Some(Decimal::new(123456, 2)));

        let fields = scan_text("total R$ 10,00 a pagar");
        assert_eq!(fields.amount, Some(Decimal::new(1000, 2)));
    }

    #[test]
    fn test_amount_prefers_line_digits() {
        let text = "Valor: 999,99\n10491.21203 41000.100044 00000.042499 1 12400000058333";
        let fields = scan_text(text);
        assert_eq!(fields.amount, Some(Decimal::new(58333, 2)));
    }

    #[test]
    fn test_due_date_two_digit_year_pivot() {
        let fields = scan_text("Vencimento: 15/03/99");
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(1999, 3, 15));

        let fields = scan_text("Vencimento: 15/03/24");
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_due_date_falls_back_to_line_factor() {
        let fields = scan_text("10491.21203 41000.100044 00000.042499 1 12400000058333");
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2001, 2, 28));
    }

    #[test]
    fn test_beneficiary_trailing_digits_stripped() {
        let fields = scan_text("Beneficiário: EMPRESA EXEMPLO LTDA 12.345.678/0001-90");
        assert_eq!(fields.beneficiary.as_deref(), Some("EMPRESA EXEMPLO LTDA"));
    }

    #[test]
    fn test_beneficiary_length_counts_chars() {
        // Too short (9 characters) even though the UTF-8 byte count is 18.
        let fields = scan_text("Beneficiário: ÀÉÍÓÚÂÊÔÃ");
        assert_eq!(fields.beneficiary, None);

        let fields = scan_text("Beneficiário: AÇOUGUE SÃO JOSÉ");
        assert_eq!(fields.beneficiary.as_deref(), Some("AÇOUGUE SÃO JOSÉ"));
    }

    #[test]
    fn test_payer_from_sacado_label() {
        let fields = scan_text("Sacado: MARIA DA SILVA 123.456.789-00");
        assert_eq!(fields.payer.as_deref(), Some("MARIA DA SILVA"));
    }
}
