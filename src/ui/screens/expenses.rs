use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::amount::format_amount;
use crate::models::Owner;
use crate::store::EntityRef;
use crate::ui::app::{App, ExpenseRow};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(ledger) = app.ledger() else {
        render_uninitialized(f, area, app);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Ledger table
            Constraint::Length(3), // Owner totals
        ])
        .split(area);

    let totals = app.store.totals(app.current_month);
    let month_flashed = app.is_flashed(&EntityRef::Month(app.current_month));

    let header_cells = ["Description", "Owner", "Value"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .skip(app.row_scroll)
        .take(chunks[0].height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let is_cursor = i == app.row_index;
            match row {
                ExpenseRow::Category(id) => {
                    let (label, color) = ledger
                        .category(id)
                        .map(|c| (c.label.as_str(), theme::hex_color(&c.color)))
                        .unwrap_or(("?", theme::ACCENT));
                    let label = if label.is_empty() { "(unnamed)" } else { label };
                    let count = ledger.entry_count_in(id);
                    let flashed = month_flashed || app.is_flashed(&EntityRef::Category(id.clone()));
                    let style = if is_cursor {
                        theme::selected_style()
                    } else if flashed {
                        theme::flash_style()
                    } else {
                        Style::default().fg(color).add_modifier(Modifier::BOLD)
                    };
                    Row::new(vec![
                        Cell::from(format!("▸ {} ({count})", truncate(label, 36))),
                        Cell::from(""),
                        Cell::from(format_amount(totals.category(id))),
                    ])
                    .style(style)
                }
                ExpenseRow::Entry { id, .. } => {
                    let Some(entry) = ledger.entry(*id) else {
                        return Row::new(vec![Cell::from("")]);
                    };
                    let flashed = month_flashed || app.is_flashed(&EntityRef::Entry(*id));
                    let style = if is_cursor {
                        theme::selected_style()
                    } else if flashed {
                        theme::flash_style()
                    } else if i % 2 == 1 {
                        theme::alt_row_style()
                    } else {
                        theme::normal_style()
                    };
                    let owner_style = if is_cursor {
                        Style::default()
                    } else {
                        Style::default().fg(theme::owner_color(entry.owner))
                    };
                    Row::new(vec![
                        Cell::from(format!("    {}", truncate(&entry.desc, 40))),
                        Cell::from(Span::styled(entry.owner.as_str(), owner_style)),
                        Cell::from(format_amount(entry.value)),
                    ])
                    .style(style)
                }
            }
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(8),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Expenses · {} ({} categories, {} entries) ",
                    app.current_month.label(),
                    ledger.categories().len(),
                    ledger.entries().len()
                ),
                theme::title_style(),
            )),
    );
    f.render_widget(table, chunks[0]);

    let mut spans = Vec::new();
    for owner in Owner::all() {
        spans.push(Span::styled(
            format!(" {}: ", owner.display_name()),
            theme::dim_style(),
        ));
        spans.push(Span::styled(
            format_amount(totals.owner(*owner)),
            Style::default()
                .fg(theme::owner_color(*owner))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(" Total: ", theme::dim_style()));
    spans.push(Span::styled(
        format_amount(totals.grand_total),
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD),
    ));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(footer, chunks[1]);
}

fn render_uninitialized(f: &mut Frame, area: Rect, app: &App) {
    let prev = app.current_month.previous();
    let copy_hint = if app.store.contains(prev) {
        format!("Press c to copy {}", prev.label())
    } else {
        format!("{} has no data either, so c starts fresh too", prev.label())
    };
    let msg = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No data for {}", app.current_month.label()),
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press i to start fresh from the template",
            theme::dim_style(),
        )),
        Line::from(Span::styled(copy_hint, theme::dim_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Expenses · {} ", app.current_month.label()),
            theme::title_style(),
        ));
    f.render_widget(Paragraph::new(msg).centered().block(block), area);
}
