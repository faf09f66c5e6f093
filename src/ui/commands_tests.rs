#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::config::Settings;
use crate::models::Owner;
use crate::ui::app::InputMode;

const JAN: MonthKey = MonthKey::new(2024, 0);
const FEB: MonthKey = MonthKey::new(2024, 1);

fn app() -> App {
    App::new(&Settings {
        start_month: JAN,
        log_capacity: 30,
        seed_on_start: true,
    })
}

fn run(app: &mut App, input: &str) {
    handle_command(input, app).unwrap();
}

fn entry(app: &App, id: u64) -> crate::models::Entry {
    app.ledger().unwrap().entry(EntryId::new(id)).unwrap().clone()
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("", "copy"), 4);
    assert_eq!(levenshtein("toggle", "toggle"), 0);
}

#[test]
fn test_unknown_command_suggests() {
    let mut app = app();
    run(&mut app, "togle");
    assert_eq!(
        app.status_message,
        "Unknown command: :togle. Did you mean :toggle?"
    );
}

#[test]
fn test_every_command_has_description() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), ":{name} has no description");
    }
}

#[test]
fn test_quit_and_screens() {
    let mut app = app();
    run(&mut app, "summary");
    assert_eq!(app.screen, Screen::Summary);
    run(&mut app, "history");
    assert_eq!(app.screen, Screen::History);
    run(&mut app, "e");
    assert_eq!(app.screen, Screen::Expenses);
    run(&mut app, "help");
    assert!(app.show_help);
    run(&mut app, "q");
    assert!(!app.running);
}

// ── Months ────────────────────────────────────────────────────

#[test]
fn test_month_full_and_short_forms() {
    let mut app = app();
    run(&mut app, "month 2023-11");
    assert_eq!(app.current_month, MonthKey::new(2023, 10));
    run(&mut app, "m 3");
    assert_eq!(app.current_month, MonthKey::new(2023, 2));
}

#[test]
fn test_month_rejects_garbage() {
    let mut app = app();
    run(&mut app, "month 2024-13");
    assert_eq!(app.current_month, JAN);
    assert_eq!(
        app.status_message,
        "Invalid month '2024-13'. Use YYYY-MM (e.g. 2024-01)"
    );
}

#[test]
fn test_next_and_copy() {
    let mut app = app();
    run(&mut app, "next-month");
    assert_eq!(app.current_month, FEB);
    run(&mut app, "copy");
    assert!(app.store.contains(FEB));
    assert_eq!(app.status_message, "FEV/2024 copied from JAN/2024");
    run(&mut app, "prev-month");
    assert_eq!(app.current_month, JAN);
}

#[test]
fn test_init_existing_month_reports() {
    let mut app = app();
    run(&mut app, "init");
    assert_eq!(app.status_message, "2024-01 already has data");
}

#[test]
fn test_delete_month_asks_first() {
    let mut app = app();
    run(&mut app, "delete-month");
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete all data for JAN/2024?");
    assert!(app.store.contains(JAN));
    app.confirm_pending();
    assert!(!app.store.contains(JAN));
}

#[test]
fn test_delete_missing_month() {
    let mut app = app();
    run(&mut app, "delete-month 2024-05");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No data for MAI/2024");
}

#[test]
fn test_mutations_need_an_initialized_month() {
    let mut app = app();
    run(&mut app, "next-month");
    run(&mut app, "add Internet");
    assert_eq!(
        app.status_message,
        "No data for FEV/2024. Use :init or :copy first"
    );
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_category_add_and_select() {
    let mut app = app();
    run(&mut app, "category Internet Móvel");
    let id = CategoryId::new("cat_209");
    assert_eq!(app.selected_category(), Some(id.clone()));
    let ledger = app.ledger().unwrap();
    assert_eq!(ledger.category(&id).unwrap().label, "Internet Móvel");
    assert_eq!(ledger.entry_count_in(&id), 1);
    assert_eq!(app.status_message, "+ Category \"Internet Móvel\"");
}

#[test]
fn test_category_without_name_opens_editor() {
    let mut app = app();
    run(&mut app, "cat");
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.edit_target, Some(EditTarget::NewCategory));
}

#[test]
fn test_delete_category_by_label_and_id() {
    let mut app = app();
    run(&mut app, "delete-category Energisa");
    run(&mut app, "delete-category aguas");
    let ledger = app.ledger().unwrap();
    assert_eq!(ledger.categories().len(), 2);
    assert_eq!(ledger.entries().len(), 3);
}

#[test]
fn test_delete_unknown_category() {
    let mut app = app();
    run(&mut app, "delete-category Mercado");
    assert_eq!(app.status_message, "Category 'Mercado' not found");
}

#[test]
fn test_last_category_is_protected() {
    let mut app = app();
    for name in ["internet", "energia", "aguas"] {
        run(&mut app, &format!("delete-category {name}"));
    }
    run(&mut app, "delete-category aluguel");
    assert_eq!(
        app.status_message,
        "Cannot remove the last category of the month"
    );
    assert_eq!(app.ledger().unwrap().categories().len(), 1);
}

#[test]
fn test_rename_category_forms() {
    let mut app = app();
    run(&mut app, "rename-category aguas = Água");
    let aguas = CategoryId::new("aguas");
    assert_eq!(app.ledger().unwrap().category(&aguas).unwrap().label, "Água");

    // Without a target the selection (internet) is renamed
    run(&mut app, "rename-category Fibra óptica");
    let internet = CategoryId::new("internet");
    assert_eq!(
        app.ledger().unwrap().category(&internet).unwrap().label,
        "Fibra óptica"
    );
}

// ── Entries ───────────────────────────────────────────────────

#[test]
fn test_add_entry_to_selection() {
    let mut app = app();
    run(&mut app, "add");
    assert_eq!(app.selected_entry(), Some(EntryId::new(209)));
    let added = entry(&app, 209);
    assert_eq!(added.desc, "New entry");
    assert_eq!(added.owner, Owner::Lion);
    assert_eq!(added.value, dec!(0));
    assert_eq!(added.cat_id, CategoryId::new("internet"));
}

#[test]
fn test_add_entry_by_label() {
    let mut app = app();
    run(&mut app, "add Aluguel");
    assert_eq!(entry(&app, 209).cat_id, CategoryId::new("aluguel"));
    assert_eq!(app.status_message, "+ Aluguel · new entry");
}

#[test]
fn test_field_commands_with_target() {
    let mut app = app();
    run(&mut app, "value #201 1.234,56");
    run(&mut app, "desc #201 Fibra 500MB");
    run(&mut app, "owner #201 primo");
    let e = entry(&app, 201);
    assert_eq!(e.value, dec!(1234.56));
    assert_eq!(e.desc, "Fibra 500MB");
    assert_eq!(e.owner, Owner::Primo);
    assert_eq!(app.selected_entry(), Some(EntryId::new(201)));
}

#[test]
fn test_field_commands_on_selection() {
    let mut app = app();
    app.row_index = 3; // Unidade Primo
    run(&mut app, "value -40");
    assert_eq!(entry(&app, 203).value, dec!(0));
    run(&mut app, "toggle");
    assert_eq!(entry(&app, 203).owner, Owner::Lion);
}

#[test]
fn test_set_generic_field() {
    let mut app = app();
    run(&mut app, "set #204 amount 99,90");
    assert_eq!(entry(&app, 204).value, dec!(99.90));
    run(&mut app, "set #204 colour red");
    assert_eq!(
        app.status_message,
        "Usage: :set [#id] <desc|owner|value> <text>"
    );
}

#[test]
fn test_bad_owner_is_reported() {
    let mut app = app();
    run(&mut app, "owner #201 bob");
    assert_eq!(
        app.status_message,
        "Invalid input: Unknown owner 'bob'. Use lion or primo"
    );
    assert_eq!(entry(&app, 201).owner, Owner::Lion);
}

#[test]
fn test_field_command_without_selection() {
    let mut app = app();
    // Cursor on the internet header row
    run(&mut app, "toggle");
    assert_eq!(app.status_message, "Select an entry or name one with #id");
}

#[test]
fn test_desc_without_text_opens_editor() {
    let mut app = app();
    run(&mut app, "desc #205");
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.command_input, "Fatura 2");
    assert_eq!(
        app.edit_target,
        Some(EditTarget::EntryDesc(EntryId::new(205)))
    );
}

#[test]
fn test_remove_entry_and_last_entry_guard() {
    let mut app = app();
    run(&mut app, "remove #205");
    assert!(app.ledger().unwrap().entry(EntryId::new(205)).is_none());
    assert_eq!(app.status_message, "✕ \"Fatura 2\" removed");

    run(&mut app, "remove #201");
    assert_eq!(
        app.status_message,
        "Cannot remove the last entry of \"Internet\""
    );
}

#[test]
fn test_unknown_entry_id() {
    let mut app = app();
    run(&mut app, "toggle #999");
    assert_eq!(app.status_message, "Not found: entry #999");
}
