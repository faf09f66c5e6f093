use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crate::aggregate::{category_breakdown, percent_delta};
use crate::amount::{format_amount, format_percent};
use crate::config::{Settings, LOG_CAPACITY_ENV};
use crate::models::Owner;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::util::delta_badge;

pub(crate) fn as_cli(args: &[String], settings: &Settings) -> Result<()> {
    match args[0].as_str() {
        "summary" | "s" => cli_summary(settings),
        "script" => cli_script(&args[1..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("splitbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("splitbook: shared monthly expenses for two owners");
    println!();
    println!("Usage: splitbook [options] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print the start month's summary");
    println!("  script <file|->               Run TUI commands from a file (or stdin),");
    println!("                                one per line, then print a report");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --month, -m <YYYY-MM>         Month to open (default: current)");
    println!("  --log-capacity <n>            Activity log size (env: {LOG_CAPACITY_ENV})");
    println!("  --empty                       Do not seed the start month");
}

fn cli_summary(settings: &Settings) -> Result<()> {
    let app = App::new(settings);
    let mut out = io::stdout().lock();
    write_report(&app, &mut out)?;
    Ok(())
}

fn cli_script(args: &[String], settings: &Settings) -> Result<()> {
    let Some(source) = args.first() else {
        anyhow::bail!("Usage: splitbook script <file|->");
    };

    let reader: Box<dyn BufRead> = if source == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(source).with_context(|| format!("Failed to open script: {source}"))?;
        Box::new(BufReader::new(file))
    };

    let mut app = App::new(settings);
    let mut out = io::stdout().lock();
    run_script(reader, &mut app, &mut out)?;
    writeln!(out)?;
    write_report(&app, &mut out)?;
    Ok(())
}

/// Feed each line of `reader` to the command registry, echoing the resulting
/// status line. Blank lines and lines starting with `//` are skipped.
/// Confirmation prompts are answered yes; commands that would open the inline
/// editor are rejected, since there is nobody to type.
pub(crate) fn run_script(reader: impl BufRead, app: &mut App, out: &mut impl Write) -> Result<usize> {
    let mut executed = 0;
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read script line {}", n + 1))?;
        let input = line.trim();
        if input.is_empty() || input.starts_with("//") {
            continue;
        }
        let input = input.strip_prefix(':').unwrap_or(input);

        app.status_message.clear();
        commands::handle_command(input, app)
            .with_context(|| format!("Script line {}: {input}", n + 1))?;

        match app.input_mode {
            InputMode::Confirm => app.confirm_pending(),
            InputMode::Editing => {
                app.cancel_edit();
                app.set_status(format!("'{input}' needs an argument in scripts"));
            }
            _ => {}
        }
        executed += 1;

        writeln!(out, ":{input}")?;
        if !app.status_message.is_empty() {
            writeln!(out, "  {}", app.status_message)?;
        }
        if !app.running {
            break;
        }
    }
    log::debug!("script finished after {executed} commands");
    Ok(executed)
}

/// Plain-text rendering of the current month, the history table and the
/// activity log.
pub(crate) fn write_report(app: &App, out: &mut impl Write) -> Result<()> {
    let month = app.current_month;
    writeln!(out, "splitbook · {}", month.label())?;
    writeln!(out, "{}", "─".repeat(48))?;

    let Some(ledger) = app.ledger() else {
        writeln!(out, "  No data for {}", month.label())?;
        write_history(app, out)?;
        write_activity(app, out)?;
        return Ok(());
    };

    let totals = app.store.totals(month);
    let previous = app.store.previous_totals(month);
    for owner in Owner::all() {
        writeln!(
            out,
            "  {:<8} {:>16}",
            format!("{}:", owner.display_name()),
            format_amount(totals.owner(*owner))
        )?;
    }
    let badge = percent_delta(previous.as_ref().map(|p| p.grand_total), totals.grand_total)
        .map(|d| format!("   {} vs {}", delta_badge(&d), month.previous().label()))
        .unwrap_or_default();
    writeln!(
        out,
        "  {:<8} {:>16}{badge}",
        "Total:",
        format_amount(totals.grand_total)
    )?;

    writeln!(out)?;
    writeln!(out, "By category:")?;
    for share in category_breakdown(&ledger, &totals) {
        writeln!(
            out,
            "  {:<20} {:>3}  {:>16}  {:>7}",
            share.category.label,
            share.entry_count,
            format_amount(share.subtotal),
            format_percent(share.percent)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Entries:")?;
    for cat in ledger.categories() {
        for entry in ledger.entries_in(&cat.id) {
            writeln!(
                out,
                "  {:<6} {:<20} {:<24} {:<6} {:>16}",
                entry.id.to_string(),
                cat.label,
                entry.desc,
                entry.owner.as_str(),
                format_amount(entry.value)
            )?;
        }
    }

    write_history(app, out)?;
    write_activity(app, out)?;
    Ok(())
}

fn write_history(app: &App, out: &mut impl Write) -> Result<()> {
    let rows = app.store.history_rows();
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "History:")?;
    for summary in rows.iter().rev() {
        let owners: Vec<String> = Owner::all()
            .iter()
            .map(|o| format!("{:>16}", format_amount(summary.owner(*o))))
            .collect();
        let change = summary.delta.map(|d| delta_badge(&d)).unwrap_or_default();
        writeln!(
            out,
            "  {:<9} {} {:>16}  {change}",
            summary.month.label(),
            owners.join(" "),
            format_amount(summary.grand_total)
        )?;
    }
    Ok(())
}

fn write_activity(app: &App, out: &mut impl Write) -> Result<()> {
    let log = app.store.activity();
    if log.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Activity (newest first):")?;
    for entry in log.iter().rev() {
        writeln!(out, "  {} {}", entry.at.format("%H:%M:%S"), entry.message)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
