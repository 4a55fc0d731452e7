/// Raw ledger amount handling and display formatting
///
/// Ledger amounts are integers in the token's smallest unit and routinely exceed
/// the f64 safe-integer range, so they are carried as digit strings and
/// converted with `BigDecimal`. Conversion to f64 happens only for display.
use crate::errors::CoreError;
use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// Check that a raw amount is a non-empty string of ASCII digits
pub fn is_raw_amount(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Convert a raw integer amount into token units (`raw × 10^-decimals`)
pub fn raw_to_decimal(raw: &str, decimals: u8) -> Result<BigDecimal, CoreError> {
    if !is_raw_amount(raw) {
        return Err(CoreError::invalid_amount(raw, "expected a non-negative integer"));
    }

    BigDecimal::from_str(&format!("{}e-{}", raw, decimals))
        .map_err(|e| CoreError::invalid_amount(raw, &e.to_string()))
}

/// Format a raw integer amount as a token-unit string
///
/// Trailing fractional zeros are dropped: `("150000000", 8)` gives `"1.5"`,
/// `("0", 8)` gives `"0"`.
pub fn format_units(raw: &str, decimals: u8) -> Result<String, CoreError> {
    if !is_raw_amount(raw) {
        return Err(CoreError::invalid_amount(raw, "expected a non-negative integer"));
    }

    let digits = raw.trim_start_matches('0');
    let decimals = decimals as usize;

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        Ok(int_part)
    } else {
        Ok(format!("{}.{}", int_part, frac_part))
    }
}

/// Convert a token-unit decimal string into a raw integer string
///
/// Rejects blank or digit-less input, negative values, malformed input and more
/// fractional digits than the token supports.
pub fn parse_units(value: &str, decimals: u8) -> Result<String, CoreError> {
    let value = value.trim();
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CoreError::invalid_amount(value, "no digits"));
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    if !is_raw_amount(int_part) || !(frac_part.is_empty() || is_raw_amount(frac_part)) {
        return Err(CoreError::invalid_amount(value, "expected a non-negative decimal number"));
    }
    if frac_part.len() > decimals as usize {
        return Err(CoreError::invalid_amount(
            value,
            &format!("more than {} fractional digits", decimals),
        ));
    }

    let raw = format!(
        "{}{:0<width$}",
        int_part,
        frac_part,
        width = decimals as usize
    );
    let trimmed = raw.trim_start_matches('0');
    Ok(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}

/// Lossy conversion for display and f64 aggregates
pub fn to_display_f64(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Format a fiat value with thousands separators and fixed decimals
///
/// `format_fiat(25000.0, 2)` gives `"25,000.00"`.
pub fn format_fiat(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
