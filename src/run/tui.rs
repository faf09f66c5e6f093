use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::ui::app::{App, EditTarget, ExpenseRow, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Redraw interval while idle, so highlights can fade.
const TICK: Duration = Duration::from_millis(100);

pub(crate) fn as_tui(settings: &Settings) -> Result<()> {
    let mut app = App::new(settings);
    log::info!("starting TUI at {}", app.current_month);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.expire_highlights(Instant::now());
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd, table borders + header, totals footer
            let content_height = f.area().height.saturating_sub(9) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Expenses),
        KeyCode::Char('2') => switch_screen(app, Screen::Summary),
        KeyCode::Char('3') => switch_screen(app, Screen::History),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app)?,
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-month", app)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-month", app)?;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('X') => match app.screen {
            Screen::History => {
                if let Some(month) = selected_history_month(app) {
                    commands::handle_command(&format!("delete-month {month}"), app)?;
                }
            }
            _ => commands::handle_command("delete-month", app)?,
        },
        _ if app.screen == Screen::Expenses => handle_expenses_key(key, app)?,
        _ => {}
    }
    Ok(())
}

fn handle_expenses_key(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char('i') => app.init_current(false),
        KeyCode::Char('c') => app.init_current(true),
        KeyCode::Char('a') => commands::handle_command("add", app)?,
        KeyCode::Char('A') => commands::handle_command("category", app)?,
        KeyCode::Char('e') => handle_enter(app)?,
        KeyCode::Char('v') => commands::handle_command("value", app)?,
        KeyCode::Char('t') => commands::handle_command("toggle", app)?,
        KeyCode::Char('D') => match app.selected_row().cloned() {
            Some(ExpenseRow::Entry { .. }) => commands::handle_command("remove", app)?,
            Some(ExpenseRow::Category(_)) => commands::handle_command("delete-category", app)?,
            None => {}
        },
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(),
        _ => app.cancel_pending(),
    }
}

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Expenses => app.refresh_rows(),
        Screen::History => {
            let len = app.store.months().len();
            if app.history_index >= len {
                app.history_index = len.saturating_sub(1);
            }
        }
        Screen::Summary => {}
    }
}

/// History rows are shown newest first.
fn selected_history_month(app: &App) -> Option<crate::models::MonthKey> {
    app.store.months().iter().rev().nth(app.history_index).copied()
}

fn handle_enter(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::Expenses => match app.selected_row().cloned() {
            Some(ExpenseRow::Entry { id, .. }) => app.begin_edit(EditTarget::EntryDesc(id)),
            Some(ExpenseRow::Category(id)) => app.begin_edit(EditTarget::CategoryLabel(id)),
            None => {}
        },
        Screen::History => {
            if let Some(month) = selected_history_month(app) {
                app.screen = Screen::Expenses;
                app.go_to_month(month);
            }
        }
        Screen::Summary => {}
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.visible_rows;
            scroll_down(&mut app.row_index, &mut app.row_scroll, app.rows.len(), page);
        }
        Screen::History => {
            let len = app.store.months().len();
            if app.history_index + 1 < len {
                app.history_index += 1;
            }
        }
        Screen::Summary => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.row_index, &mut app.row_scroll),
        Screen::History => app.history_index = app.history_index.saturating_sub(1),
        Screen::Summary => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.row_index, &mut app.row_scroll),
        Screen::History => app.history_index = 0,
        Screen::Summary => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.visible_rows;
            scroll_to_bottom(&mut app.row_index, &mut app.row_scroll, app.rows.len(), page);
        }
        Screen::History => app.history_index = app.store.months().len().saturating_sub(1),
        Screen::Summary => {}
    }
}
