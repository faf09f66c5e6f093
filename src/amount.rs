use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) const CURRENCY_SYMBOL: &str = "R$";

/// Largest amount a single entry may hold: R$ 1.000.000.000.000.000,00.
/// Far enough below `Decimal::MAX` that month totals cannot overflow.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Integer digits beyond which a typed number is past `MAX_AMOUNT`.
const MAX_INT_DIGITS: usize = 16;

/// Leading numeric portion of an already-cleaned amount, `parseFloat` style:
/// `12.5abc` reads as `12.5`, `.5` as `0.5`.
static NUMERIC_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?").ok());

/// Parse a user-typed currency amount such as `R$ 1.612,13` or `955,96`.
///
/// Currency symbol, whitespace and `.` thousands separators are dropped and
/// the first `,` is read as the decimal separator. Anything that does not
/// start with a number becomes zero, as do negative amounts. Amounts above
/// `MAX_AMOUNT` clamp to it. The result is rounded to cents. Never fails.
pub(crate) fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '.') && !c.is_whitespace())
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);

    let Some(value) = numeric_prefix(&cleaned) else {
        return Decimal::ZERO;
    };

    if value.is_sign_negative() || value.is_zero() {
        return Decimal::ZERO;
    }
    value
        .min(MAX_AMOUNT)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn numeric_prefix(s: &str) -> Option<Decimal> {
    let re = NUMERIC_PREFIX.as_ref()?;
    let caps = re.captures(s)?;
    let sign = caps.get(1).map_or("", |m| m.as_str());
    let int_part = caps.get(2).map_or("", |m| m.as_str());
    let frac_part = caps.get(3).map_or("", |m| m.as_str());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    if int_part.trim_start_matches('0').len() > MAX_INT_DIGITS {
        return Some(if sign == "-" { -MAX_AMOUNT } else { MAX_AMOUNT });
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    Decimal::from_str(&format!("{sign}{int_part}.{frac_part}")).ok()
}

/// Format an amount as Brazilian currency with two decimals and `.` grouping.
/// e.g. `1612.13` → `"R$ 1.612,13"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let grouped = group_thousands(int_part);

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-{CURRENCY_SYMBOL} {grouped},{dec_part}")
    } else {
        format!("{CURRENCY_SYMBOL} {grouped},{dec_part}")
    }
}

/// Format a percentage with one decimal, e.g. `12.34` → `"12,3%"`.
pub(crate) fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%").replacen('.', ",", 1)
}

fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".")
}
