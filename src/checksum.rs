//! Check digit algorithms used by boleto codes.
//!
//! Both algorithms walk the digits right to left. Modulo 10 protects the
//! three typeable-line fields; modulo 11 protects the barcode as a whole.

/// Modulo-10 check digit.
///
/// Weights alternate 2, 1, 2, 1, … starting from the rightmost digit.
/// Products above 9 fold by summing their own digits (equivalently,
/// subtracting 9). The check digit is in `0..=9`.
pub fn modulo_10(digits: &str) -> u32 {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            let product = d * if i % 2 == 0 { 2 } else { 1 };
            if product > 9 {
                product - 9
            } else {
                product
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

/// Modulo-11 check digit.
///
/// Weights cycle 2 through 9 starting from the rightmost digit. A raw check
/// digit of 0, 10, or 11 is remapped to 1 by convention, so the result is
/// always in `1..=9`.
pub fn modulo_11(digits: &str) -> u32 {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| d * (2 + i as u32 % 8))
        .sum();
    match 11 - sum % 11 {
        0 | 10 | 11 => 1,
        dv => dv,
    }
}
