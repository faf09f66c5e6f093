use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::aggregate::{category_breakdown, percent_delta, Delta};
use crate::amount::{format_amount, format_percent};
use crate::models::Owner;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{delta_badge, share_bar, trend_is_increase, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Owner cards
            Constraint::Min(6),    // Category breakdown
        ])
        .split(area);

    render_cards(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let totals = app.store.totals(app.current_month);
    let previous = app.store.previous_totals(app.current_month);

    for (slot, owner) in cards.iter().zip(Owner::all()) {
        let cur = totals.owner(*owner);
        let delta = percent_delta(previous.as_ref().map(|p| p.owner(*owner)), cur);
        render_card(f, *slot, owner.display_name(), cur, theme::owner_color(*owner), delta);
    }

    let delta = percent_delta(previous.as_ref().map(|p| p.grand_total), totals.grand_total);
    render_card(f, cards[2], "Total", totals.grand_total, theme::TEXT, delta);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    delta: Option<Delta>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let badge = match delta {
        Some(d) => Span::styled(
            format!("{} vs last month", delta_badge(&d)),
            Style::default().fg(if trend_is_increase(&d) {
                theme::RED
            } else {
                theme::GREEN
            }),
        ),
        None => Span::styled("no previous month", theme::dim_style()),
    };

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(badge),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" By Category · {} ", app.current_month.label()),
            theme::title_style(),
        ));

    let Some(ledger) = app.ledger() else {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!("No data for {}", app.current_month.label()),
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let totals = app.store.totals(app.current_month);
    let shares = category_breakdown(&ledger, &totals);

    let header_cells = ["Category", "Entries", "Subtotal", "Share", ""]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = shares
        .iter()
        .map(|share| {
            let color = theme::hex_color(&share.category.color);
            Row::new(vec![
                Cell::from(truncate(&share.category.label, 24)),
                Cell::from(share.entry_count.to_string()),
                Cell::from(format_amount(share.subtotal)),
                Cell::from(format_percent(share.percent)),
                Cell::from(Span::styled(
                    share_bar(share.percent, 20),
                    Style::default().fg(color),
                )),
            ])
            .style(theme::normal_style())
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(22),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
