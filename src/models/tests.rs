#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Owner ─────────────────────────────────────────────────────

#[test]
fn test_owner_parse() {
    assert_eq!(Owner::parse("lion"), Some(Owner::Lion));
    assert_eq!(Owner::parse("LION"), Some(Owner::Lion));
    assert_eq!(Owner::parse(" primo "), Some(Owner::Primo));
    assert_eq!(Owner::parse("bob"), None);
    assert_eq!(Owner::parse(""), None);
}

#[test]
fn test_owner_roundtrip() {
    for owner in Owner::all() {
        let s = owner.as_str();
        assert_eq!(Owner::parse(s), Some(*owner), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_owner_toggle() {
    assert_eq!(Owner::Lion.toggle(), Owner::Primo);
    assert_eq!(Owner::Primo.toggle(), Owner::Lion);
    assert_eq!(Owner::Lion.toggle().toggle(), Owner::Lion);
}

#[test]
fn test_owner_display() {
    assert_eq!(format!("{}", Owner::Primo), "primo");
    assert_eq!(Owner::Lion.display_name(), "Lion");
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_display_is_one_based() {
    assert_eq!(MonthKey::new(2024, 0).to_string(), "2024-01");
    assert_eq!(MonthKey::new(2024, 11).to_string(), "2024-12");
    assert_eq!(MonthKey::new(987, 4).to_string(), "0987-05");
}

#[test]
fn test_month_key_previous_wraps_year() {
    let jan = MonthKey::new(2024, 0);
    assert_eq!(jan.previous(), MonthKey::new(2023, 11));
    assert_eq!(MonthKey::new(2024, 5).previous(), MonthKey::new(2024, 4));
}

#[test]
fn test_month_key_next_wraps_year() {
    let dec = MonthKey::new(2024, 11);
    assert_eq!(dec.next(), MonthKey::new(2025, 0));
    assert_eq!(MonthKey::new(2024, 5).next(), MonthKey::new(2024, 6));
}

#[test]
fn test_month_key_next_previous_inverse() {
    let mut key = MonthKey::new(2023, 10);
    for _ in 0..30 {
        assert_eq!(key.next().previous(), key);
        key = key.next();
    }
}

#[test]
fn test_month_key_new_normalizes_out_of_range() {
    assert_eq!(MonthKey::new(2024, 12), MonthKey::new(2025, 0));
    assert_eq!(MonthKey::new(2024, -1), MonthKey::new(2023, 11));
    assert_eq!(MonthKey::new(2024, -13), MonthKey::new(2022, 11));
}

#[test]
fn test_month_key_order_matches_string_order() {
    let keys = [
        MonthKey::new(2023, 11),
        MonthKey::new(2024, 0),
        MonthKey::new(2024, 1),
        MonthKey::new(2024, 9),
        MonthKey::new(2025, 0),
    ];
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[0].to_string() < pair[1].to_string());
    }
}

#[test]
fn test_month_key_parse() {
    assert_eq!("2024-01".parse::<MonthKey>().unwrap(), MonthKey::new(2024, 0));
    assert_eq!("2024-1".parse::<MonthKey>().unwrap(), MonthKey::new(2024, 0));
    assert_eq!(" 2025-12 ".parse::<MonthKey>().unwrap(), MonthKey::new(2025, 11));
}

#[test]
fn test_month_key_parse_rejects_garbage() {
    assert!("2024-13".parse::<MonthKey>().is_err());
    assert!("2024-00".parse::<MonthKey>().is_err());
    assert!("2024".parse::<MonthKey>().is_err());
    assert!("jan-2024".parse::<MonthKey>().is_err());
    assert!("".parse::<MonthKey>().is_err());
}

#[test]
fn test_month_key_display_parse_roundtrip() {
    let key = MonthKey::new(2026, 9);
    assert_eq!(key.to_string().parse::<MonthKey>().unwrap(), key);
}

#[test]
fn test_month_key_label() {
    assert_eq!(MonthKey::new(2025, 2).label(), "MAR/2025");
    assert_eq!(MonthKey::new(2024, 11).label(), "DEZ/2024");
    assert_eq!(MonthKey::new(2024, 1).label(), "FEV/2024");
    assert_eq!(MonthKey::new(2024, 8).label(), "SET/2024");
}

// ── EntryField ────────────────────────────────────────────────

#[test]
fn test_entry_field_parse() {
    assert_eq!(EntryField::parse("desc"), Some(EntryField::Desc));
    assert_eq!(EntryField::parse("description"), Some(EntryField::Desc));
    assert_eq!(EntryField::parse("Owner"), Some(EntryField::Owner));
    assert_eq!(EntryField::parse("value"), Some(EntryField::Value));
    assert_eq!(EntryField::parse("color"), None);
}

// ── Seed ──────────────────────────────────────────────────────

#[test]
fn test_seed_categories() {
    let seed = seed_ledger();
    let ids: Vec<&str> = seed.categories().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["internet", "energia", "aguas", "aluguel"]);
    assert_eq!(seed.categories()[0].color, "#67e8f9");
}

#[test]
fn test_seed_entries() {
    let seed = seed_ledger();
    assert_eq!(seed.entries().len(), 8);
    assert_eq!(seed.entry_count_in(&CategoryId::new("internet")), 1);
    assert_eq!(seed.entry_count_in(&CategoryId::new("energia")), 2);
    assert_eq!(seed.entry_count_in(&CategoryId::new("aguas")), 3);
    assert_eq!(seed.entry_count_in(&CategoryId::new("aluguel")), 2);

    let fibra = seed.entry(EntryId::new(1)).unwrap();
    assert_eq!(fibra.desc, "Fibra");
    assert_eq!(fibra.owner, Owner::Lion);
    assert_eq!(fibra.value, dec!(156.63));
}

#[test]
fn test_seed_every_category_has_entries() {
    let seed = seed_ledger();
    for cat in seed.categories() {
        assert!(seed.entry_count_in(&cat.id) >= 1, "{} is empty", cat.id);
    }
}

#[test]
fn test_palette_wraps() {
    assert_eq!(palette_color(0), PALETTE[0]);
    assert_eq!(palette_color(4), "#f87171");
    assert_eq!(palette_color(8), PALETTE[0]);
    assert_eq!(palette_color(11), PALETTE[3]);
}

// ── MonthLedger ───────────────────────────────────────────────

#[test]
fn test_with_fresh_ids_rekeys_entries_only() {
    let seed = seed_ledger();
    let mut next = 100;
    let copy = seed.with_fresh_ids(|| {
        next += 1;
        EntryId::new(next)
    });

    assert_eq!(copy.categories(), seed.categories());
    assert_eq!(copy.entries().len(), seed.entries().len());
    let ids: Vec<u64> = copy.entries().iter().map(|e| e.id.get()).collect();
    assert_eq!(ids, (101..=108).collect::<Vec<_>>());
    for (a, b) in copy.entries().iter().zip(seed.entries()) {
        assert_eq!(a.cat_id, b.cat_id);
        assert_eq!(a.desc, b.desc);
        assert_eq!(a.value, b.value);
    }
}

#[test]
fn test_remove_category_cascades() {
    let mut ledger = seed_ledger();
    let aguas = CategoryId::new("aguas");
    ledger.remove_category(&aguas);
    assert!(ledger.category(&aguas).is_none());
    assert_eq!(ledger.entry_count_in(&aguas), 0);
    assert_eq!(ledger.entries().len(), 5);
}

#[test]
fn test_find_by_label_case_insensitive() {
    let seed = seed_ledger();
    let cat = Category::find_by_label(seed.categories(), "ÁGUAS").unwrap();
    assert_eq!(cat.id.as_str(), "aguas");
    assert!(Category::find_by_label(seed.categories(), "Gas").is_none());
}

#[test]
fn test_default_ledger_is_empty() {
    let ledger = MonthLedger::default();
    assert!(ledger.categories().is_empty());
    assert!(ledger.entries().is_empty());
    assert_eq!(ledger.entries().iter().map(|e| e.value).sum::<Decimal>(), Decimal::ZERO);
}
