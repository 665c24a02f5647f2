use serde::{Deserialize, Serialize};

/// One toggleable, orderable dashboard section.
///
/// `order` is the persisted 1-based rank. While a customize session is open
/// the array position is authoritative; `order` is only rewritten from the
/// position when the session commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub label: String,
    pub description: String,
    pub enabled: bool,
    pub order: u32,
}

impl Widget {
    fn new(id: &str, label: &str, description: &str, order: u32) -> Self {
        Widget {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            enabled: true,
            order,
        }
    }
}

/// The built-in dashboard sections in their default order.
pub fn default_widgets() -> Vec<Widget> {
    vec![
        Widget::new(
            "portfolio-health",
            "Portfolio health",
            "Health score per building with the portfolio average and trend",
            1,
        ),
        Widget::new(
            "upcoming-visits",
            "Upcoming visits",
            "Scheduled inspection visits awaiting acceptance",
            2,
        ),
        Widget::new(
            "agreements",
            "Service agreements",
            "Active service agreements and their visit cadence",
            3,
        ),
        Widget::new(
            "invoices",
            "Invoices",
            "Open, overdue and recently paid invoices",
            4,
        ),
        Widget::new(
            "activity",
            "Recent activity",
            "Latest changes across the portfolio",
            5,
        ),
    ]
}

/// Clone `widgets` with `order` rewritten to each widget's 1-based position.
/// Disabled widgets keep their position and are numbered like any other.
pub fn renumbered(widgets: &[Widget]) -> Vec<Widget> {
    widgets
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, mut widget)| {
            widget.order = i as u32 + 1;
            widget
        })
        .collect()
}

/// One dashboard-customization editing session.
///
/// Holds a working copy of the caller-supplied layout that is mutated freely
/// until the session either commits (`save`), rolls back to the layout it was
/// opened with (`reset`), or is dropped without effect (cancel). The session
/// never creates or deletes widgets, it only reorders and toggles them.
pub struct LayoutSession {
    original: Vec<Widget>,
    working: Vec<Widget>,
    dragged: Option<String>,
}

impl LayoutSession {
    pub fn new(widgets: Vec<Widget>) -> Self {
        LayoutSession {
            working: widgets.clone(),
            original: widgets,
            dragged: None,
        }
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.working
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Flip the `enabled` flag of the widget with the given id. Unknown ids
    /// are ignored. Order is untouched.
    pub fn toggle_enabled(&mut self, id: &str) {
        if let Some(widget) = self.working.iter_mut().find(|w| w.id == id) {
            widget.enabled = !widget.enabled;
        }
    }

    /// Swap the widget at `index` with its upper neighbor. The top row and
    /// out-of-range indices are silent no-ops.
    pub fn move_up(&mut self, index: usize) {
        if index == 0 || index >= self.working.len() {
            return;
        }
        self.working.swap(index, index - 1);
    }

    /// Swap the widget at `index` with its lower neighbor. The bottom row and
    /// out-of-range indices are silent no-ops.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 >= self.working.len() {
            return;
        }
        self.working.swap(index, index + 1);
    }

    /// Start a reorder gesture for the widget with the given id. A new grab
    /// silently replaces any gesture already in progress; only one gesture is
    /// ever active. Unknown ids are ignored.
    pub fn begin_drag(&mut self, id: &str) {
        if self.working.iter().any(|w| w.id == id) {
            self.dragged = Some(id.to_string());
        }
    }

    /// Abandon the in-progress reorder gesture, if any.
    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Finish the in-progress gesture by moving the grabbed widget to
    /// `target`. No-op when nothing is grabbed or when dropped on itself.
    ///
    /// The move is remove-then-insert: the widget is taken out first and the
    /// target index applies to the shortened list. Dropping below the source
    /// therefore lands just before the row that originally held `target`,
    /// while dropping above lands exactly at `target`. Targets past the end
    /// clamp to the end. The gesture is cleared on every path.
    pub fn drop_at(&mut self, target: usize) {
        let id = match self.dragged.take() {
            Some(id) => id,
            None => return,
        };
        let source = match self.working.iter().position(|w| w.id == id) {
            Some(i) => i,
            None => return,
        };
        if source == target {
            return;
        }
        let widget = self.working.remove(source);
        let target = target.min(self.working.len());
        self.working.insert(target, widget);
    }

    /// The working copy renumbered 1..=N, ready to persist. Persistence and
    /// failure reporting belong to the caller; after a failed persist the
    /// session is still editable and a retry saves the same state.
    pub fn save(&self) -> Vec<Widget> {
        renumbered(&self.working)
    }

    /// The layout this session was opened with, renumbered 1..=N. Discards
    /// every in-session edit regardless of how many were made. Destructive;
    /// callers gate this behind an explicit confirmation step.
    pub fn reset(&self) -> Vec<Widget> {
        renumbered(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: &str, order: u32, enabled: bool) -> Widget {
        Widget {
            id: id.to_string(),
            label: id.to_uppercase(),
            description: format!("section {}", id),
            enabled,
            order,
        }
    }

    fn abc() -> Vec<Widget> {
        vec![
            widget("a", 1, true),
            widget("b", 2, true),
            widget("c", 3, true),
        ]
    }

    fn ids(session: &LayoutSession) -> Vec<&str> {
        session.widgets().iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn toggle_flips_only_the_matching_widget() {
        let mut session = LayoutSession::new(abc());
        session.toggle_enabled("b");
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
        assert!(session.widgets()[0].enabled);
        assert!(!session.widgets()[1].enabled);
        assert!(session.widgets()[2].enabled);
        session.toggle_enabled("b");
        assert!(session.widgets()[1].enabled);
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut session = LayoutSession::new(abc());
        session.toggle_enabled("nope");
        assert_eq!(session.widgets(), abc().as_slice());
    }

    #[test]
    fn move_up_then_down_restores_order() {
        for index in 1..3 {
            let mut session = LayoutSession::new(abc());
            session.move_up(index);
            session.move_down(index - 1);
            assert_eq!(ids(&session), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn move_down_then_up_restores_order() {
        for index in 0..2 {
            let mut session = LayoutSession::new(abc());
            session.move_down(index);
            session.move_up(index + 1);
            assert_eq!(ids(&session), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn moves_at_the_boundaries_are_noops() {
        let mut session = LayoutSession::new(abc());
        session.move_up(0);
        session.move_down(2);
        session.move_up(17);
        session.move_down(17);
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn drop_without_grab_is_a_noop() {
        let mut session = LayoutSession::new(abc());
        session.drop_at(2);
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn drop_on_itself_is_a_noop_and_clears_the_gesture() {
        let mut session = LayoutSession::new(abc());
        session.begin_drag("b");
        session.drop_at(1);
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
        assert!(!session.is_dragging());
    }

    #[test]
    fn drag_downward_uses_remove_then_insert() {
        // Grab A (index 0), drop at index 2: remove A -> [b, c],
        // insert at 2 -> [b, c, a].
        let mut session = LayoutSession::new(abc());
        session.begin_drag("a");
        session.drop_at(2);
        assert_eq!(ids(&session), vec!["b", "c", "a"]);
        assert!(!session.is_dragging());
    }

    #[test]
    fn drag_upward_lands_exactly_at_target() {
        let mut session = LayoutSession::new(abc());
        session.begin_drag("c");
        session.drop_at(0);
        assert_eq!(ids(&session), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_past_the_end_clamps_to_the_end() {
        let mut session = LayoutSession::new(abc());
        session.begin_drag("a");
        session.drop_at(99);
        assert_eq!(ids(&session), vec!["b", "c", "a"]);
    }

    #[test]
    fn new_grab_replaces_the_previous_one() {
        let mut session = LayoutSession::new(abc());
        session.begin_drag("a");
        session.begin_drag("c");
        assert_eq!(session.dragged(), Some("c"));
        session.drop_at(0);
        assert_eq!(ids(&session), vec!["c", "a", "b"]);
    }

    #[test]
    fn cancel_drag_abandons_the_gesture() {
        let mut session = LayoutSession::new(abc());
        session.begin_drag("a");
        session.cancel_drag();
        session.drop_at(2);
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn save_renumbers_contiguously_from_position() {
        let mut session = LayoutSession::new(vec![
            widget("a", 1, true),
            widget("b", 2, true),
            widget("c", 3, false),
        ]);
        session.move_down(0);
        let saved = session.save();
        let ids: Vec<&str> = saved.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        let orders: Vec<u32> = saved.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        // Disabled widgets keep their position and still get numbered.
        assert!(!saved[2].enabled);
    }

    #[test]
    fn failed_persist_leaves_the_session_editable() {
        // save() is pure; calling it twice yields the same state, so the
        // caller can retry after a persistence failure.
        let mut session = LayoutSession::new(abc());
        session.move_down(0);
        let first = session.save();
        let second = session.save();
        assert_eq!(first, second);
        session.move_up(1);
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn reset_ignores_session_history() {
        let mut session = LayoutSession::new(abc());
        // Reorder to [c, b, a] and disable everything.
        session.begin_drag("c");
        session.drop_at(0);
        session.begin_drag("a");
        session.drop_at(2);
        for id in ["a", "b", "c"] {
            session.toggle_enabled(id);
        }
        assert_eq!(ids(&session), vec!["c", "b", "a"]);

        let reset = session.reset();
        let ids: Vec<&str> = reset.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(reset.iter().all(|w| w.enabled));
        let orders: Vec<u32> = reset.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn reset_renumbers_from_the_original_sequence() {
        // Original arrives with stale, gappy order values; reset still hands
        // back 1..=N from the original positions.
        let session = LayoutSession::new(vec![
            widget("a", 4, true),
            widget("b", 9, false),
            widget("c", 2, true),
        ]);
        let reset = session.reset();
        let orders: Vec<u32> = reset.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        // enabled flags come back exactly as supplied.
        assert!(!reset[1].enabled);
    }

    #[test]
    fn default_widgets_are_contiguously_ordered() {
        let widgets = default_widgets();
        for (i, widget) in widgets.iter().enumerate() {
            assert_eq!(widget.order, i as u32 + 1);
            assert!(widget.enabled);
        }
    }
}
