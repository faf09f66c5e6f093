use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, EditTarget, PendingAction, Screen};
use crate::models::{CategoryId, EntryField, EntryId, MonthKey};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit splitbook", cmd_quit, r);
    register_command!("quit", "Quit splitbook", cmd_quit, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("s", "Go to Summary", cmd_summary, r);
    register_command!("summary", "Go to Summary", cmd_summary, r);
    register_command!("history", "Go to History", cmd_history, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("init", "Start the current month from the template", cmd_init, r);
    register_command!(
        "copy",
        "Start the current month as a copy of the previous one",
        cmd_copy,
        r
    );
    register_command!(
        "delete-month",
        "Delete a month (e.g. :delete-month 2024-01)",
        cmd_delete_month,
        r
    );
    register_command!(
        "category",
        "Create category (e.g. :category Internet)",
        cmd_category,
        r
    );
    register_command!(
        "cat",
        "Create category (e.g. :cat Internet)",
        cmd_category,
        r
    );
    register_command!(
        "delete-category",
        "Delete a category and its entries (selected, or by name)",
        cmd_delete_category,
        r
    );
    register_command!(
        "rename-category",
        "Rename category (e.g. :rename-category aguas = Água)",
        cmd_rename_category,
        r
    );
    register_command!(
        "add",
        "Add entry to a category (selected, or by name)",
        cmd_add,
        r
    );
    register_command!(
        "remove",
        "Remove entry (selected, or e.g. :remove #203)",
        cmd_remove,
        r
    );
    register_command!(
        "desc",
        "Set entry description (e.g. :desc #203 Conta de luz)",
        cmd_desc,
        r
    );
    register_command!(
        "value",
        "Set entry value (e.g. :value #203 1.234,56)",
        cmd_value,
        r
    );
    register_command!(
        "owner",
        "Set entry owner (e.g. :owner #203 primo)",
        cmd_owner,
        r
    );
    register_command!("toggle", "Flip entry owner", cmd_toggle, r);
    register_command!(
        "set",
        "Set any entry field (e.g. :set #203 value 99,90)",
        cmd_set,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        log::debug!("command :{cmd_name} {args}");
        (cmd.run)(args, app)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split a leading `#id` off `args`. Without one, the selected entry is the
/// target.
fn entry_target<'a>(args: &'a str, app: &App) -> (Option<EntryId>, &'a str) {
    if let Some(rest) = args.strip_prefix('#') {
        let (id, tail) = rest.split_once(' ').unwrap_or((rest, ""));
        return (id.parse().ok().map(EntryId::new), tail.trim());
    }
    (app.selected_entry(), args)
}

/// Resolve an optional category reference, falling back to the selection.
fn category_target(args: &str, app: &App) -> Option<CategoryId> {
    if args.is_empty() {
        app.selected_category()
    } else {
        app.resolve_category(args)
    }
}

fn require_month(app: &mut App) -> bool {
    if app.store.contains(app.current_month) {
        return true;
    }
    app.set_status(format!(
        "No data for {}. Use :init or :copy first",
        app.current_month.label()
    ));
    false
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_rows();
    Ok(())
}

fn cmd_summary(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Summary;
    Ok(())
}

fn cmd_history(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::History;
    app.history_index = 0;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.go_to_month(MonthKey::current());
        return Ok(());
    }

    // Accept formats like "2024-01", "2024-1", "01", "1"
    let text = if args.len() <= 2 {
        format!("{}-{args}", app.current_month.year())
    } else {
        args.to_string()
    };

    match text.parse::<MonthKey>() {
        Ok(key) => app.go_to_month(key),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.next_month();
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.prev_month();
    Ok(())
}

fn cmd_init(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.init_current(false);
    Ok(())
}

fn cmd_copy(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.init_current(true);
    Ok(())
}

fn cmd_delete_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    let key = if args.is_empty() {
        app.current_month
    } else {
        match args.parse::<MonthKey>() {
            Ok(key) => key,
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    };

    if !app.store.contains(key) {
        app.set_status(format!("No data for {}", key.label()));
        return Ok(());
    }

    app.request_confirm(
        PendingAction::DeleteMonth(key),
        format!("Delete all data for {}?", key.label()),
    );
    Ok(())
}

fn cmd_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        if require_month(app) {
            app.begin_edit(EditTarget::NewCategory);
        }
        return Ok(());
    }

    let result = app.store.add_category(app.current_month, args);
    if let Some(id) = app.check(result) {
        app.select_category(&id);
    }
    Ok(())
}

fn cmd_delete_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !require_month(app) {
        return Ok(());
    }
    let Some(cat_id) = category_target(args, app) else {
        app.set_status(format!("Category '{args}' not found"));
        return Ok(());
    };

    let result = app.store.remove_category(app.current_month, &cat_id);
    app.check(result);
    Ok(())
}

fn cmd_rename_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !require_month(app) {
        return Ok(());
    }

    let (target, label) = match args.split_once('=') {
        Some((target, label)) => (category_target(target.trim(), app), label.trim()),
        None => (app.selected_category(), args),
    };
    let Some(cat_id) = target else {
        app.set_status("Category not found");
        return Ok(());
    };

    if label.is_empty() {
        app.begin_edit(EditTarget::CategoryLabel(cat_id));
        return Ok(());
    }

    let result = app.store.rename_category(app.current_month, &cat_id, label);
    app.check(result);
    Ok(())
}

fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !require_month(app) {
        return Ok(());
    }
    let Some(cat_id) = category_target(args, app) else {
        app.set_status(format!("Category '{args}' not found"));
        return Ok(());
    };

    let result = app.store.add_entry(app.current_month, &cat_id);
    if let Some(id) = app.check(result) {
        app.select_entry(id);
    }
    Ok(())
}

fn cmd_remove(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !require_month(app) {
        return Ok(());
    }
    let (Some(id), _) = entry_target(args, app) else {
        app.set_status("Select an entry or name one with #id");
        return Ok(());
    };

    let result = app.store.remove_entry(app.current_month, id);
    app.check(result);
    Ok(())
}

fn cmd_desc(args: &str, app: &mut App) -> anyhow::Result<()> {
    update_field(args, app, EntryField::Desc)
}

fn cmd_value(args: &str, app: &mut App) -> anyhow::Result<()> {
    update_field(args, app, EntryField::Value)
}

fn cmd_owner(args: &str, app: &mut App) -> anyhow::Result<()> {
    update_field(args, app, EntryField::Owner)
}

fn cmd_set(args: &str, app: &mut App) -> anyhow::Result<()> {
    let (target, rest) = entry_target(args, app);
    let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
    let Some(field) = EntryField::parse(name) else {
        app.set_status("Usage: :set [#id] <desc|owner|value> <text>");
        return Ok(());
    };
    match target {
        Some(id) => write_field(app, id, field, value.trim()),
        None => app.set_status("Select an entry or name one with #id"),
    }
    Ok(())
}

fn cmd_toggle(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !require_month(app) {
        return Ok(());
    }
    let (Some(id), _) = entry_target(args, app) else {
        app.set_status("Select an entry or name one with #id");
        return Ok(());
    };

    let result = app.store.toggle_owner(app.current_month, id);
    app.check(result);
    Ok(())
}

fn update_field(args: &str, app: &mut App, field: EntryField) -> anyhow::Result<()> {
    let (target, text) = entry_target(args, app);
    let Some(id) = target else {
        app.set_status("Select an entry or name one with #id");
        return Ok(());
    };

    if text.is_empty() && field != EntryField::Owner {
        // Open the inline editor prefilled with the current text
        if require_month(app) {
            let edit = match field {
                EntryField::Value => EditTarget::EntryValue(id),
                _ => EditTarget::EntryDesc(id),
            };
            app.begin_edit(edit);
        }
        return Ok(());
    }

    write_field(app, id, field, text);
    Ok(())
}

fn write_field(app: &mut App, id: EntryId, field: EntryField, text: &str) {
    if !require_month(app) {
        return;
    }
    let result = app.store.update_entry_field(app.current_month, id, field, text);
    if app.check(result).is_some() {
        app.select_entry(id);
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
