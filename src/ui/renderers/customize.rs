use ratatui::{
    widgets::{Block, Borders, Clear, Paragraph},
    layout::{Layout, Constraint, Direction, Alignment},
    style::{Style, Color, Modifier},
    text::{Line, Span},
    Frame
};

use crate::types::App;
use crate::ui::utils::centered_rect;

/// Render the customize view: the reorderable section list plus help
pub fn render(f: &mut Frame, app: &App) {
    let screen = f.size();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title header
            Constraint::Min(0),    // Section list + help
            Constraint::Length(3), // Footer / notification
        ])
        .split(screen);

    render_title(f, app, main_chunks[0]);
    render_content(f, app, main_chunks[1]);
    render_footer(f, app, main_chunks[2]);

    if app.confirm_reset {
        render_reset_confirmation(f, screen);
    }
}

/// Render the title header
fn render_title(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let title = if app.saving {
        "Customize Dashboard — saving…"
    } else {
        "Customize Dashboard"
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let nav_text = "Space: show/hide | u/d: move | g/Enter: grab & drop | s: save | r: reset | Esc: cancel";
    f.render_widget(Paragraph::new(nav_text), inner);
}

fn render_content(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Section list
            Constraint::Percentage(40), // Help
        ])
        .split(area);

    render_section_list(f, app, chunks[0]);
    render_help(f, chunks[1]);
}

/// Render the working list: one row per section, disabled ones greyed out,
/// the grabbed one marked
fn render_section_list(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let session = match app.session.as_ref() {
        Some(session) => session,
        None => return,
    };

    let lines: Vec<Line> = session
        .widgets()
        .iter()
        .enumerate()
        .map(|(i, widget)| {
            let checkbox = if widget.enabled { "[x]" } else { "[ ]" };
            let grabbed = session.dragged() == Some(widget.id.as_str());
            let marker = if grabbed { "↕ " } else { "  " };

            let mut style = Style::default();
            if !widget.enabled {
                style = style.fg(Color::DarkGray);
            }
            if grabbed {
                style = style.fg(Color::Yellow);
            }
            if i == app.cursor {
                style = style.add_modifier(Modifier::BOLD).bg(Color::Blue);
            }

            Line::from(vec![
                Span::styled(format!("{}{:>2}. ", marker, i + 1), style),
                Span::styled(format!("{} {}", checkbox, widget.label), style),
                Span::styled(format!("  — {}", widget.description), style.add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let title = if session.is_dragging() {
        "Dashboard Sections (drop with g or Enter)"
    } else {
        "Dashboard Sections"
    };
    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

/// Render the help panel
fn render_help(f: &mut Frame, area: ratatui::layout::Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Reorder & toggle",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("↑/↓       move the cursor"),
        Line::from("Space     show or hide the section"),
        Line::from("u / d     move the section up / down"),
        Line::from("g, Enter  grab the section, then drop it"),
        Line::from(""),
        Line::from(Span::styled(
            "Finish",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("s         save this layout"),
        Line::from("r         reset to where you started"),
        Line::from("Esc       cancel without saving"),
        Line::from(""),
        Line::from("Hidden sections keep their place in the"),
        Line::from("order and can be shown again later."),
    ];
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, area);
}

/// Render the confirmation modal shown before a layout reset
fn render_reset_confirmation(f: &mut Frame, area: ratatui::layout::Rect) {
    let modal = centered_rect(50, 25, area);
    f.render_widget(Clear, modal);

    let lines = vec![
        Line::from(""),
        Line::from("Reset the layout to where this session started?"),
        Line::from("All reordering and visibility changes will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": reset   "),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": keep my changes"),
        ]),
    ];
    let confirm = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("⚠ Confirm Reset")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(confirm, modal);
}

/// Render the footer: notification banner when present, context hint otherwise
fn render_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if let Some(msg) = &app.notification {
        let banner = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Notification"));
        f.render_widget(banner, area);
    } else {
        let footer_text = if app.saving {
            "Saving layout… inputs are paused until it finishes"
        } else {
            "Changes apply after saving. Esc discards everything from this session."
        };
        let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }
}
