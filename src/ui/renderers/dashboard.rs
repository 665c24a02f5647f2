use ratatui::{
    widgets::{Block, Borders, Paragraph, Table, Row, Cell, TableState},
    layout::{Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    text::Line,
    Frame
};

use crate::portfolio::{InvoiceStatus, VisitStatus, average_score, health_score, trend_delta};
use crate::types::App;
use crate::ui::utils::{format_delta, format_money};

/// Render the dashboard: the enabled widgets stacked in their saved order
pub fn render(f: &mut Frame, app: &App) {
    let enabled = app.enabled_widgets();

    let mut constraints = vec![Constraint::Length(3)]; // Title
    if enabled.is_empty() {
        constraints.push(Constraint::Min(0));
    } else {
        for _ in &enabled {
            constraints.push(Constraint::Ratio(1, enabled.len() as u32));
        }
    }
    constraints.push(Constraint::Length(3)); // Footer / notification

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.size());

    render_title(f, chunks[0]);

    if enabled.is_empty() {
        let empty = Paragraph::new("All sections are hidden. Press Tab to customize the dashboard.")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    } else {
        for (i, widget) in enabled.iter().enumerate() {
            let area = chunks[i + 1];
            match widget.id.as_str() {
                "portfolio-health" => render_health(f, app, area),
                "upcoming-visits" => render_visits(f, app, area),
                "agreements" => render_agreements(f, app, area),
                "invoices" => render_invoices(f, app, area),
                "activity" => render_activity(f, app, area),
                _ => {}
            }
        }
    }

    render_footer(f, app, chunks[chunks.len() - 1]);
}

/// Render the title header
fn render_title(f: &mut Frame, area: ratatui::layout::Rect) {
    let block = Block::default().title("Roofdeck").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let nav_text = "q: quit | Tab/c: customize | ↑/↓: select visit | a: accept | x: decline";
    f.render_widget(Paragraph::new(nav_text), inner);
}

fn score_style(score: u8) -> Style {
    if score >= 90 {
        Style::default().fg(Color::Green)
    } else if score >= 70 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Render the portfolio health table with the average and trend in the title
fn render_health(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let buildings = &app.portfolio.buildings;
    let title = format!(
        "Portfolio Health — avg {:.1} ({} vs last round)",
        average_score(buildings),
        format_delta(trend_delta(buildings))
    );

    let header = Row::new(vec![
        Cell::from("Building"),
        Cell::from("Address"),
        Cell::from("Findings"),
        Cell::from("Score"),
    ]);

    let rows = buildings.iter().map(|building| {
        let worst = building
            .findings
            .iter()
            .map(|f| f.severity)
            .max_by_key(|s| s.deduction());
        let findings = match worst {
            None => "none".to_string(),
            Some(severity) => format!(
                "{} (worst: {})",
                building.findings.len(),
                severity.label()
            ),
        };
        let score = health_score(building);
        Row::new(vec![
            Cell::from(building.name.clone()),
            Cell::from(building.address.clone()),
            Cell::from(findings),
            Cell::from(score.to_string()).style(score_style(score)),
        ])
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

/// Render scheduled visits; the highlighted pending one can be decided
fn render_visits(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Building"),
        Cell::from("Crew"),
        Cell::from("Status"),
    ]);

    let rows = app.portfolio.visits.iter().enumerate().map(|(i, visit)| {
        let status_style = match visit.status {
            VisitStatus::Pending => Style::default().fg(Color::Yellow),
            VisitStatus::Accepted => Style::default().fg(Color::Green),
            VisitStatus::Declined => Style::default().fg(Color::Red),
        };
        let mut row_style = Style::default();
        if app.selected_visit == Some(i) {
            row_style = row_style.add_modifier(Modifier::BOLD);
        }
        Row::new(vec![
            Cell::from(visit.date.format("%b %-d").to_string()),
            Cell::from(visit.building.clone()),
            Cell::from(visit.crew.clone()),
            Cell::from(visit.status.label()).style(status_style),
        ])
        .style(row_style)
    });

    let widths = [
        Constraint::Percentage(15),
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
    ];
    let pending = app.portfolio.pending_visits().len();
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Upcoming Visits ({} pending)",
            pending
        )));

    let mut table_state = TableState::default();
    if let Some(selected) = app.selected_visit {
        table_state.select(Some(selected));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}

/// Render the service agreements table
fn render_agreements(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let header = Row::new(vec![
        Cell::from("Building"),
        Cell::from("Plan"),
        Cell::from("Visits/yr"),
        Cell::from("Status"),
    ]);

    let rows = app.portfolio.agreements.iter().map(|agreement| {
        let (status, style) = if agreement.active {
            ("active", Style::default().fg(Color::Green))
        } else {
            ("lapsed", Style::default().fg(Color::Red))
        };
        Row::new(vec![
            Cell::from(agreement.building.clone()),
            Cell::from(agreement.plan.clone()),
            Cell::from(agreement.visits_per_year.to_string()),
            Cell::from(status).style(style),
        ])
    });

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(25),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Service Agreements"));
    f.render_widget(table, area);
}

/// Render invoices with the outstanding total in the title
fn render_invoices(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let header = Row::new(vec![
        Cell::from("Invoice"),
        Cell::from("Building"),
        Cell::from("Amount"),
        Cell::from("Due"),
        Cell::from("Status"),
    ]);

    let rows = app.portfolio.invoices.iter().map(|invoice| {
        let status_style = match invoice.status {
            InvoiceStatus::Paid => Style::default().fg(Color::Green),
            InvoiceStatus::Open => Style::default().fg(Color::Yellow),
            InvoiceStatus::Overdue => Style::default().fg(Color::Red),
        };
        Row::new(vec![
            Cell::from(invoice.number.clone()),
            Cell::from(invoice.building.clone()),
            Cell::from(format_money(invoice.amount_cents)),
            Cell::from(invoice.due.format("%b %-d").to_string()),
            Cell::from(invoice.status.label()).style(status_style),
        ])
    });

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(15),
    ];
    let title = format!(
        "Invoices — {} outstanding",
        format_money(app.portfolio.outstanding_cents())
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

/// Render the recent activity feed, newest first
fn render_activity(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let lines: Vec<Line> = app
        .portfolio
        .activity
        .iter()
        .map(|entry| Line::from(format!("• {}", entry)))
        .collect();
    let activity = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Recent Activity"));
    f.render_widget(activity, area);
}

/// Render the footer: notification banner when present, key help otherwise
fn render_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if let Some(msg) = &app.notification {
        let banner = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Notification"));
        f.render_widget(banner, area);
    } else {
        let footer_text = "Tab: customize sections | ↑/↓: select pending visit | a/x: accept/decline | Esc: dismiss";
        let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }
}
