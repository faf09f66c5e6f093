use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table},
    Frame,
};

use crate::amount::format_amount;
use crate::models::Owner;
use crate::store::EntityRef;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{chart_value, delta_badge, trend_is_increase};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let history = app.store.history();
    if history.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" History ", theme::title_style()));
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No months yet", theme::dim_style())),
            Line::from(Span::styled(
                "Go to Expenses and press i to start one",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Month table
            Constraint::Length(5), // Grand total trend
        ])
        .split(area);

    let mut header: Vec<Cell> = vec![Cell::from("Month").style(theme::header_style())];
    header.extend(
        Owner::all()
            .iter()
            .map(|o| Cell::from(o.display_name()).style(theme::header_style())),
    );
    header.push(Cell::from("Total").style(theme::header_style()));
    header.push(Cell::from("Change").style(theme::header_style()));

    // Newest first
    let rows: Vec<Row> = app
        .store
        .history_rows()
        .iter()
        .rev()
        .enumerate()
        .map(|(i, summary)| {
            let is_cursor = i == app.history_index;
            let is_current = summary.month == app.current_month;
            let style = if is_cursor {
                theme::selected_style()
            } else if app.is_flashed(&EntityRef::Month(summary.month)) {
                theme::flash_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let marker = if is_current { "●" } else { " " };
            let mut cells = vec![Cell::from(format!("{marker} {}", summary.month.label()))];
            cells.extend(
                Owner::all()
                    .iter()
                    .map(|o| Cell::from(format_amount(summary.owner(*o)))),
            );
            cells.push(Cell::from(Span::styled(
                format_amount(summary.grand_total),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            cells.push(match summary.delta {
                Some(d) if is_cursor => Cell::from(delta_badge(&d)),
                Some(d) => Cell::from(Span::styled(
                    delta_badge(&d),
                    Style::default().fg(if trend_is_increase(&d) {
                        theme::RED
                    } else {
                        theme::GREEN
                    }),
                )),
                None => Cell::from(Span::styled("·", theme::dim_style())),
            });
            Row::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(header).height(1))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" History ({} months) ", history.len()),
                    theme::title_style(),
                )),
        );
    f.render_widget(table, chunks[0]);

    let data: Vec<u64> = history.grand.iter().map(|v| chart_value(*v)).collect();
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(" Monthly Total Trend ", theme::title_style())),
        )
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));
    f.render_widget(sparkline, chunks[1]);
}
