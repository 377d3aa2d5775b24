//! Currency display formatting
//!
//! BRL uses the Brazilian convention (`R$ 1.234,56`); CNY and USD use
//! comma thousands and a dot decimal separator.

use std::str::FromStr;

use rust_decimal::prelude::*;

use crate::error::{CalcError, CalcResult};
use crate::money::{DECIMAL_PLACES, to_decimal};

/// Format a BRL amount: `R$ 1.234,56`
pub fn format_brl(amount: f64) -> String {
    format_amount(amount, "R$ ", '.', ',')
}

/// Format a CNY amount: `¥1,234.56`
pub fn format_cny(amount: f64) -> String {
    format_amount(amount, "¥", ',', '.')
}

/// Format a USD amount: `$1,234.56`
pub fn format_usd(amount: f64) -> String {
    format_amount(amount, "$", ',', '.')
}

fn format_amount(amount: f64, symbol: &str, thousands: char, decimal: char) -> String {
    let mut value = to_decimal(amount)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let negative = value.is_sign_negative() && !value.is_zero();
    value.set_sign_positive(true);
    value.rescale(DECIMAL_PLACES);

    let plain = value.to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(digit);
    }

    format!(
        "{}{}{}{}{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        decimal,
        frac_part
    )
}

/// Parse a BRL amount written the Brazilian way
///
/// Accepts an optional `R$` symbol and sign, `.` thousands separators and
/// a `,` decimal separator: `R$ 1.234,56`, `1234,5`, `-R$ 10`.
pub fn parse_brl(text: &str) -> CalcResult<f64> {
    let invalid = || CalcError::InvalidMoneyFormat(text.to_string());

    let mut s = text.trim();
    let negative = s.starts_with('-');
    if negative {
        s = s[1..].trim_start();
    }
    if let Some(rest) = s.strip_prefix("R$") {
        s = rest.trim_start();
    }

    let (int_part, frac_part) = match s.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    if int_part.is_empty() || !valid_grouping(int_part) {
        return Err(invalid());
    }
    if let Some(frac) = frac_part
        && (frac.is_empty() || frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let digits: String = int_part.chars().filter(|c| *c != '.').collect();
    let plain = match frac_part {
        Some(frac) => format!("{}.{}", digits, frac),
        None => digits,
    };
    let mut value = Decimal::from_str(&plain).map_err(|_| invalid())?;
    if negative {
        value.set_sign_negative(true);
    }
    value.to_f64().ok_or_else(invalid)
}

/// Digits, optionally grouped in threes by `.`
fn valid_grouping(int_part: &str) -> bool {
    if !int_part.contains('.') {
        return int_part.chars().all(|c| c.is_ascii_digit());
    }
    let mut groups = int_part.split('.');
    let first_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    first_ok && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}
