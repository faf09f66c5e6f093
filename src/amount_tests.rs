#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::amount::*;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_plain_comma_decimal() {
    assert_eq!(parse_amount("955,96"), dec!(955.96));
}

#[test]
fn test_parse_plain_dot_is_thousands_separator() {
    // "." is always a grouping mark, never a decimal point
    assert_eq!(parse_amount("1.612"), dec!(1612));
    assert_eq!(parse_amount("1.612,13"), dec!(1612.13));
}

#[test]
fn test_parse_with_currency_symbol() {
    assert_eq!(parse_amount("R$ 224,20"), dec!(224.20));
    assert_eq!(parse_amount("R$1.000.000,01"), dec!(1000000.01));
}

#[test]
fn test_parse_non_breaking_space() {
    assert_eq!(parse_amount("R$\u{a0}156,63"), dec!(156.63));
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_amount("42"), dec!(42));
}

#[test]
fn test_parse_garbage_is_zero() {
    assert_eq!(parse_amount("abc"), Decimal::ZERO);
    assert_eq!(parse_amount(""), Decimal::ZERO);
    assert_eq!(parse_amount("   "), Decimal::ZERO);
    assert_eq!(parse_amount(","), Decimal::ZERO);
    assert_eq!(parse_amount("-"), Decimal::ZERO);
}

#[test]
fn test_parse_reads_leading_number() {
    assert_eq!(parse_amount("12abc"), dec!(12));
    assert_eq!(parse_amount("7,5 reais"), dec!(7.5));
}

#[test]
fn test_parse_leading_comma() {
    assert_eq!(parse_amount(",5"), dec!(0.5));
}

#[test]
fn test_parse_only_first_comma_is_decimal() {
    assert_eq!(parse_amount("1,2,3"), dec!(1.2));
}

#[test]
fn test_parse_negative_clamps_to_zero() {
    assert_eq!(parse_amount("-50,00"), Decimal::ZERO);
    assert_eq!(parse_amount("-0"), Decimal::ZERO);
}

#[test]
fn test_parse_rounds_to_cents() {
    assert_eq!(parse_amount("1,005"), dec!(1.01));
    assert_eq!(parse_amount("1,004"), dec!(1.00));
}

#[test]
fn test_parse_huge_number_clamps_to_ceiling() {
    assert_eq!(parse_amount("99999999999999999999999999999999999"), MAX_AMOUNT);
    assert_eq!(parse_amount("50.000.000.000.000.000.000.000.000.000"), MAX_AMOUNT);
    assert_eq!(parse_amount("1.000.000.000.000.000,01"), MAX_AMOUNT);
    assert_eq!(parse_amount("-99999999999999999999999999999999999"), Decimal::ZERO);
}

#[test]
fn test_parse_just_below_ceiling() {
    assert_eq!(parse_amount("999.999.999.999.999,99"), dec!(999999999999999.99));
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1612.13)), "R$ 1.612,13");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(Decimal::ZERO), "R$ 0,00");
}

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount(dec!(0.5)), "R$ 0,50");
    assert_eq!(format_amount(dec!(156.63)), "R$ 156,63");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "R$ 1.234.567,89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-5)), "-R$ 5,00");
}

#[test]
fn test_format_amount_rounds() {
    assert_eq!(format_amount(dec!(2.345)), "R$ 2,35");
}

#[test]
fn test_format_parse_roundtrip() {
    for val in [
        Decimal::ZERO,
        dec!(156.63),
        dec!(1612.13),
        dec!(955.96),
        dec!(5557.80),
        dec!(0.01),
        dec!(1000000),
    ] {
        let formatted = format_amount(val);
        assert_eq!(parse_amount(&formatted), val, "Roundtrip failed for {formatted}");
    }
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(dec!(12.34)), "12,3%");
    assert_eq!(format_percent(dec!(100)), "100,0%");
    assert_eq!(format_percent(dec!(0.05)), "0,1%");
}
