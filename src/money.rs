//! Decimal amounts in the Turkish notation used on printed reports.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount string.
///
/// Accepts the stored form (`1234.56`) as well as the Turkish display form
/// (`1.234,56`). Returns `None` when the value is not a number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = Decimal::from_str(trimmed) {
        return Some(value);
    }

    if trimmed.contains(',') {
        let normalized = trimmed.replace('.', "").replace(',', ".");
        return Decimal::from_str(&normalized).ok();
    }

    None
}

/// Format an amount with two decimals, `.` thousands and `,` decimal separator.
pub fn format_amount(value: Decimal, currency_symbol: &str) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let grouped = group_thousands(whole);
    let sign = if negative { "-" } else { "" };

    if currency_symbol.is_empty() {
        format!("{sign}{grouped},{frac}")
    } else {
        format!("{sign}{grouped},{frac} {currency_symbol}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_turkish_forms() {
        assert_eq!(parse_amount("1234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount(" 1.234,56 "), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("400"), Some(Decimal::from(400)));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn formats_with_turkish_grouping() {
        assert_eq!(format_amount(Decimal::new(123456789, 2), "₺"), "1.234.567,89 ₺");
        assert_eq!(format_amount(Decimal::from(600), "₺"), "600,00 ₺");
        assert_eq!(format_amount(Decimal::from(-1500), ""), "-1.500,00");
        assert_eq!(format_amount(Decimal::ZERO, "₺"), "0,00 ₺");
    }
}
