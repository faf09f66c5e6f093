#![allow(clippy::unwrap_used)]

use std::fs::File;
use std::io::{BufReader, Write as _};

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use super::*;
use crate::models::{EntryId, MonthKey, Owner};

const JAN: MonthKey = MonthKey::new(2024, 0);
const FEB: MonthKey = MonthKey::new(2024, 1);

fn app() -> App {
    App::new(&Settings {
        start_month: JAN,
        log_capacity: 30,
        seed_on_start: true,
    })
}

fn script_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_text(app: &mut App, body: &str) -> (usize, String) {
    let file = script_file(body);
    let reader = BufReader::new(File::open(file.path()).unwrap());
    let mut out = Vec::new();
    let count = run_script(reader, app, &mut out).unwrap();
    (count, String::from_utf8(out).unwrap())
}

// ── run_script ────────────────────────────────────────────────

#[test]
fn test_script_from_file() {
    let mut app = app();
    let (count, out) = run_text(
        &mut app,
        "// January tweaks\n\
         :value #201 200\n\
         \n\
         owner #202 primo\n\
         next-month\n\
         copy\n\
         add Internet\n",
    );
    assert_eq!(count, 5);
    assert!(out.contains(":value #201 200\n  ✎ [value] → 200\n"));
    assert!(out.contains("FEV/2024 copied from JAN/2024"));

    let jan = app.store.ledger(JAN).unwrap();
    assert_eq!(jan.entry(EntryId::new(201)).unwrap().value, dec!(200));
    assert_eq!(jan.entry(EntryId::new(202)).unwrap().owner, Owner::Primo);

    // The copy carries January's edits under fresh ids
    let feb = app.store.ledger(FEB).unwrap();
    assert_eq!(feb.entries().len(), 9);
    assert!(feb.entry(EntryId::new(201)).is_none());
    assert_eq!(app.store.totals(FEB).grand_total, dec!(5601.17));
}

#[test]
fn test_script_confirms_month_deletion() {
    let mut app = app();
    let (_, out) = run_text(&mut app, "delete-month 2024-01\n");
    assert!(!app.store.contains(JAN));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(out.contains("✕ JAN/2024 deleted"));
}

#[test]
fn test_script_rejects_editor_commands() {
    let mut app = app();
    let (_, out) = run_text(&mut app, "desc #201\n");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(out.contains("'desc #201' needs an argument in scripts"));
    assert_eq!(
        app.ledger().unwrap().entry(EntryId::new(201)).unwrap().desc,
        "Fibra"
    );
}

#[test]
fn test_script_keeps_going_after_rejections() {
    let mut app = app();
    let (count, out) = run_text(&mut app, "bogus\nremove #201\ntoggle #201\n");
    assert_eq!(count, 3);
    assert!(out.contains("Unknown command: :bogus"));
    assert!(out.contains("Cannot remove the last entry of \"Internet\""));
    assert_eq!(
        app.ledger().unwrap().entry(EntryId::new(201)).unwrap().owner,
        Owner::Primo
    );
}

#[test]
fn test_script_stops_at_quit() {
    let mut app = app();
    let (count, _) = run_text(&mut app, "quit\nadd\n");
    assert_eq!(count, 1);
    assert_eq!(app.ledger().unwrap().entries().len(), 8);
}

// ── write_report ──────────────────────────────────────────────

#[test]
fn test_report_for_seeded_month() {
    let app = app();
    let mut out = Vec::new();
    write_report(&app, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("splitbook · JAN/2024\n"));
    assert!(text.contains("R$ 3.173,12"));
    assert!(text.contains("R$ 2.384,68"));
    assert!(text.contains("R$ 5.557,80"));
    assert!(text.contains("Energisa"));
    assert!(text.contains("Imóvel 2"));
    assert!(text.contains("History:"));
    assert!(text.contains("Session started"));
}

#[test]
fn test_report_shows_delta_against_previous_month() {
    let mut app = app();
    run_text(&mut app, "next-month\ncopy\nvalue #209 313,26\n");
    let mut out = Vec::new();
    write_report(&app, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    // 5557,80 -> 5714,43
    assert!(text.contains("▲ 2,8% vs JAN/2024"));
}

#[test]
fn test_report_for_empty_month() {
    let app = App::new(&Settings {
        start_month: JAN,
        log_capacity: 30,
        seed_on_start: false,
    });
    let mut out = Vec::new();
    write_report(&app, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No data for JAN/2024"));
    assert!(!text.contains("History:"));
}
