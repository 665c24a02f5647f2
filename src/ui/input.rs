use crossterm::event::KeyCode;

use crate::config::{CommitKind, PrefsRequest};
use crate::types::{App, AppMode};

/// Handle keyboard input events for all application modes
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match app.mode {
        AppMode::Dashboard => handle_dashboard_keys(app, key),
        AppMode::Customize => handle_customize_keys(app, key),
    }
}

/// Handle key events on the main dashboard
fn handle_dashboard_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => {
            if app.notification.is_some() {
                app.dismiss_notification();
            } else {
                app.selected_visit = None;
            }
        }
        KeyCode::Tab | KeyCode::Char('c') => app.open_customize(),
        KeyCode::Down => {
            let pending = app.portfolio.pending_visits();
            if let Some(current) = app.selected_visit {
                if let Some(position) = pending.iter().position(|&i| i == current) {
                    if position + 1 < pending.len() {
                        app.selected_visit = Some(pending[position + 1]);
                    }
                }
            } else if let Some(&first) = pending.first() {
                app.selected_visit = Some(first);
            }
        }
        KeyCode::Up => {
            let pending = app.portfolio.pending_visits();
            if let Some(current) = app.selected_visit {
                if let Some(position) = pending.iter().position(|&i| i == current) {
                    if position > 0 {
                        app.selected_visit = Some(pending[position - 1]);
                    }
                }
            } else if let Some(&last) = pending.last() {
                app.selected_visit = Some(last);
            }
        }
        KeyCode::Char('a') => {
            if let Some(index) = app.selected_visit.take() {
                if let Some(message) = app.portfolio.accept_visit(index) {
                    app.notify(format!("✅ {}", message));
                }
            }
        }
        KeyCode::Char('x') => {
            if let Some(index) = app.selected_visit.take() {
                if let Some(message) = app.portfolio.decline_visit(index) {
                    app.notify(format!("❌ {}", message));
                }
            }
        }
        _ => {}
    }
    false
}

/// Handle key events in the customize view
fn handle_customize_keys(app: &mut App, key: KeyCode) -> bool {
    if app.saving {
        // A commit is in flight; the session is read-only until it resolves.
        return false;
    }
    if app.confirm_reset {
        return handle_confirm_reset_keys(app, key);
    }

    let session = match app.session.as_mut() {
        Some(session) => session,
        None => {
            app.mode = AppMode::Dashboard;
            return false;
        }
    };

    match key {
        KeyCode::Char('q') => return true, // Quit, discarding the session
        KeyCode::Esc => {
            if session.is_dragging() {
                session.cancel_drag();
            } else {
                app.close_customize();
            }
        }
        KeyCode::Tab => app.close_customize(),
        KeyCode::Up => {
            if app.cursor > 0 {
                app.cursor -= 1;
            }
        }
        KeyCode::Down => {
            if app.cursor + 1 < session.len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            let id = session.widgets().get(app.cursor).map(|w| w.id.clone());
            if let Some(id) = id {
                session.toggle_enabled(&id);
            }
        }
        KeyCode::Char('u') => {
            if app.cursor > 0 {
                session.move_up(app.cursor);
                app.cursor -= 1;
            }
        }
        KeyCode::Char('d') => {
            if app.cursor + 1 < session.len() {
                session.move_down(app.cursor);
                app.cursor += 1;
            }
        }
        KeyCode::Char('g') | KeyCode::Enter => {
            if session.is_dragging() {
                session.drop_at(app.cursor);
            } else {
                let id = session.widgets().get(app.cursor).map(|w| w.id.clone());
                if let Some(id) = id {
                    session.begin_drag(&id);
                }
            }
        }
        KeyCode::Char('s') => {
            let widgets = session.save();
            app.outbox = Some(PrefsRequest {
                kind: CommitKind::Save,
                widgets,
            });
        }
        KeyCode::Char('r') => {
            // Destructive; fires only after the confirmation modal
            app.confirm_reset = true;
        }
        _ => {}
    }
    false
}

/// Handle key events while the reset confirmation modal is up
fn handle_confirm_reset_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.confirm_reset = false;
            if let Some(session) = app.session.as_ref() {
                app.outbox = Some(PrefsRequest {
                    kind: CommitKind::Reset,
                    widgets: session.reset(),
                });
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm_reset = false;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_widgets, renumbered};
    use crate::portfolio::{Portfolio, VisitStatus};

    fn app() -> App {
        App::new(renumbered(&default_widgets()), Portfolio::sample())
    }

    fn session_ids(app: &App) -> Vec<String> {
        app.session
            .as_ref()
            .map(|s| s.widgets().iter().map(|w| w.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn tab_opens_and_cancels_customize() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Customize);
        assert!(app.session.is_some());

        handle_key_event(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Dashboard);
        assert!(app.session.is_none());
    }

    #[test]
    fn grab_and_drop_moves_a_row() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);

        handle_key_event(&mut app, KeyCode::Char('g')); // grab row 0
        handle_key_event(&mut app, KeyCode::Down);
        handle_key_event(&mut app, KeyCode::Down);
        handle_key_event(&mut app, KeyCode::Char('g')); // drop at row 2

        let ids = session_ids(&app);
        assert_eq!(ids[2], "portfolio-health");
    }

    #[test]
    fn esc_cancels_a_drag_before_closing_the_view() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);
        handle_key_event(&mut app, KeyCode::Char('g'));
        handle_key_event(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Customize);
        assert!(!app.session.as_ref().unwrap().is_dragging());

        handle_key_event(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Dashboard);
    }

    #[test]
    fn save_queues_a_renumbered_commit() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);
        handle_key_event(&mut app, KeyCode::Char('d')); // move row 0 down
        handle_key_event(&mut app, KeyCode::Char('s'));

        let request = app.outbox.take().unwrap();
        assert_eq!(request.kind, CommitKind::Save);
        assert_eq!(request.widgets[0].id, "upcoming-visits");
        let orders: Vec<u32> = request.widgets.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        // The session stays open until the worker confirms.
        assert!(app.session.is_some());
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);
        handle_key_event(&mut app, KeyCode::Char(' ')); // disable row 0

        handle_key_event(&mut app, KeyCode::Char('r'));
        assert!(app.confirm_reset);
        assert!(app.outbox.is_none());

        handle_key_event(&mut app, KeyCode::Char('n'));
        assert!(!app.confirm_reset);
        assert!(app.outbox.is_none());

        handle_key_event(&mut app, KeyCode::Char('r'));
        handle_key_event(&mut app, KeyCode::Char('y'));
        let request = app.outbox.take().unwrap();
        assert_eq!(request.kind, CommitKind::Reset);
        // Reset hands back the layout the session was opened with.
        assert!(request.widgets.iter().all(|w| w.enabled));
    }

    #[test]
    fn mutating_keys_are_ignored_while_saving() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Tab);
        app.saving = true;

        handle_key_event(&mut app, KeyCode::Char('d'));
        handle_key_event(&mut app, KeyCode::Char(' '));
        handle_key_event(&mut app, KeyCode::Char('s'));

        assert!(app.outbox.is_none());
        let ids = session_ids(&app);
        assert_eq!(ids[0], "portfolio-health");
        assert!(app.session.as_ref().unwrap().widgets()[0].enabled);
    }

    #[test]
    fn visit_selection_walks_pending_visits_only() {
        let mut app = app();
        let pending = app.portfolio.pending_visits();

        handle_key_event(&mut app, KeyCode::Down);
        assert_eq!(app.selected_visit, Some(pending[0]));
        handle_key_event(&mut app, KeyCode::Down);
        assert_eq!(app.selected_visit, Some(pending[1]));
        handle_key_event(&mut app, KeyCode::Up);
        assert_eq!(app.selected_visit, Some(pending[0]));

        handle_key_event(&mut app, KeyCode::Char('a'));
        let accepted = pending[0];
        assert_eq!(app.portfolio.visits[accepted].status, VisitStatus::Accepted);
        assert!(app.selected_visit.is_none());
        assert!(app.notification.is_some());
    }

    #[test]
    fn q_quits_from_both_modes() {
        let mut app = app();
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
        app.open_customize();
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
    }
}
