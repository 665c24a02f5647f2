use std::time::Instant;

use crate::config::PrefsRequest;
use crate::layout::{LayoutSession, Widget};
use crate::portfolio::Portfolio;

/// Seconds a notification banner stays on screen.
pub const NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Dashboard,
    Customize,
}

pub struct App {
    pub mode: AppMode,
    pub portfolio: Portfolio,
    /// The layout currently in effect on the dashboard. Replaced only when a
    /// customize session commits successfully.
    pub widgets: Vec<Widget>,
    /// Present while the customize view is open. Dropping it without a
    /// commit is the cancel path.
    pub session: Option<LayoutSession>,
    /// Row the customize cursor is on.
    pub cursor: usize,
    /// Index into `portfolio.visits` of the highlighted pending visit.
    pub selected_visit: Option<usize>,
    /// A layout commit is in flight; mutating keys are ignored until the
    /// preferences worker answers.
    pub saving: bool,
    /// The reset confirmation modal is up.
    pub confirm_reset: bool,
    /// Commit queued by the input layer, picked up by the main loop.
    pub outbox: Option<PrefsRequest>,
    pub notification: Option<String>,
    pub notification_time: Option<Instant>,
}

impl App {
    pub fn new(widgets: Vec<Widget>, portfolio: Portfolio) -> Self {
        App {
            mode: AppMode::Dashboard,
            portfolio,
            widgets,
            session: None,
            cursor: 0,
            selected_visit: None,
            saving: false,
            confirm_reset: false,
            outbox: None,
            notification: None,
            notification_time: None,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_time = Some(Instant::now());
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.notification_time = None;
    }

    pub fn enabled_widgets(&self) -> Vec<&Widget> {
        self.widgets.iter().filter(|w| w.enabled).collect()
    }

    pub fn open_customize(&mut self) {
        self.session = Some(LayoutSession::new(self.widgets.clone()));
        self.cursor = 0;
        self.confirm_reset = false;
        self.mode = AppMode::Customize;
    }

    /// Leave the customize view, discarding the session. Called both on
    /// cancel and after a successful commit.
    pub fn close_customize(&mut self) {
        self.session = None;
        self.cursor = 0;
        self.confirm_reset = false;
        self.mode = AppMode::Dashboard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_widgets, renumbered};

    fn app() -> App {
        App::new(renumbered(&default_widgets()), Portfolio::sample())
    }

    #[test]
    fn cancel_discards_session_edits() {
        let mut app = app();
        let before = app.widgets.clone();

        app.open_customize();
        let session = app.session.as_mut().unwrap();
        session.move_down(0);
        session.toggle_enabled("invoices");
        app.close_customize();

        assert_eq!(app.widgets, before);
        assert!(app.session.is_none());
        assert_eq!(app.mode, AppMode::Dashboard);
    }

    #[test]
    fn enabled_widgets_filters_disabled_rows() {
        let mut app = app();
        app.widgets[1].enabled = false;
        let enabled = app.enabled_widgets();
        assert_eq!(enabled.len(), app.widgets.len() - 1);
        assert!(enabled.iter().all(|w| w.enabled));
    }
}
