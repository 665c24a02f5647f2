use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Format a cents amount as dollars with thousands separators,
/// e.g. 128500 -> "$1,285.00"
pub fn format_money(cents: u64) -> String {
    let dollars = cents / 100;
    let remainder = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}.{:02}", grouped, remainder)
}

/// Format a score delta with an explicit sign, e.g. 1.25 -> "+1.2"
pub fn format_delta(delta: f64) -> String {
    format!("{:+.1}", delta)
}

/// A rectangle centered in `area`, sized as a percentage of it. Used for the
/// reset confirmation modal.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
