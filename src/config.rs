use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::layout::{Widget, default_widgets, renumbered};

#[derive(Parser)]
#[command(name = "roofdeck", version, about = "Customizable terminal dashboard for roof-inspection portfolios")]
pub struct Cli {
    /// Print the effective dashboard layout as JSON and exit
    #[arg(long)]
    pub json: bool,
    /// Delete the saved dashboard layout and exit
    #[arg(long)]
    pub reset: bool,
}

/// Preferences persisted under the user's config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub widgets: Vec<Widget>,
}

/// Which kind of layout commit a session asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    Save,
    Reset,
}

/// A layout commit queued by the input layer for the preferences worker.
pub struct PrefsRequest {
    pub kind: CommitKind,
    pub widgets: Vec<Widget>,
}

/// The preferences worker's answer. `Ok` carries the layout that was
/// persisted; `Err` carries a user-facing reason and leaves the session
/// untouched so the user can retry.
pub struct PrefsResponse {
    pub kind: CommitKind,
    pub result: Result<Vec<Widget>, String>,
}

pub fn prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roofdeck").join("preferences.json"))
}

pub fn load_prefs() -> Option<Preferences> {
    load_prefs_from(&prefs_path()?)
}

/// A missing or unreadable file both count as "no saved preferences".
pub fn load_prefs_from(path: &Path) -> Option<Preferences> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

pub fn save_prefs(prefs: &Preferences) -> io::Result<()> {
    let path = prefs_path().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no config directory available")
    })?;
    save_prefs_to(&path, prefs)
}

pub fn save_prefs_to(path: &Path, prefs: &Preferences) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)
}

/// Remove the saved preferences. `Ok(false)` means there was nothing saved.
pub fn reset_prefs() -> io::Result<bool> {
    let path = match prefs_path() {
        Some(p) => p,
        None => return Ok(false),
    };
    if path.exists() {
        fs::remove_file(&path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// The widget sequence the dashboard starts with: saved preferences when
/// present, the built-in defaults otherwise.
pub fn effective_layout() -> Vec<Widget> {
    match load_prefs() {
        Some(prefs) => reconcile(prefs.widgets),
        None => renumbered(&default_widgets()),
    }
}

/// Reconcile a saved layout against the built-in widget set. Saved rows are
/// taken in their persisted order; ids this build no longer ships are
/// dropped, widgets the saved file predates are appended in default order.
/// Display text always comes from the current build, only `enabled` and the
/// position survive from the file.
pub fn reconcile(mut saved: Vec<Widget>) -> Vec<Widget> {
    let defaults = default_widgets();
    saved.sort_by_key(|w| w.order);
    let mut merged: Vec<Widget> = saved
        .into_iter()
        .filter_map(|w| {
            defaults.iter().find(|d| d.id == w.id).map(|d| Widget {
                label: d.label.clone(),
                description: d.description.clone(),
                ..w
            })
        })
        .collect();
    for default in defaults {
        if !merged.iter().any(|w| w.id == default.id) {
            merged.push(default);
        }
    }
    renumbered(&merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roofdeck").join("preferences.json");

        let mut widgets = renumbered(&default_widgets());
        widgets.swap(0, 1);
        widgets[2].enabled = false;
        let prefs = Preferences {
            widgets: renumbered(&widgets),
        };

        save_prefs_to(&path, &prefs).unwrap();
        let loaded = load_prefs_from(&path).unwrap();
        assert_eq!(loaded.widgets, prefs.widgets);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_prefs_from(&dir.path().join("preferences.json")).is_none());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_prefs_from(&path).is_none());
    }

    #[test]
    fn reconcile_sorts_by_persisted_order() {
        let mut saved = renumbered(&default_widgets());
        let count = saved.len() as u32;
        for widget in saved.iter_mut() {
            widget.order = count + 1 - widget.order;
        }
        let merged = reconcile(saved);
        assert_eq!(merged[0].id, "activity");
        let orders: Vec<u32> = merged.iter().map(|w| w.order).collect();
        assert_eq!(orders, (1..=count).collect::<Vec<u32>>());
    }

    #[test]
    fn reconcile_drops_unknown_ids_and_appends_missing() {
        let defaults = default_widgets();
        let mut saved = vec![
            Widget {
                id: "retired-section".to_string(),
                label: "Retired".to_string(),
                description: String::new(),
                enabled: true,
                order: 1,
            },
            defaults[3].clone(),
        ];
        saved[1].order = 2;
        saved[1].enabled = false;

        let merged = reconcile(saved);
        let ids: Vec<&str> = merged.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "invoices",
                "portfolio-health",
                "upcoming-visits",
                "agreements",
                "activity",
            ]
        );
        assert!(!merged[0].enabled);
        assert!(merged.iter().skip(1).all(|w| w.enabled));
    }

    #[test]
    fn reconcile_refreshes_display_text() {
        let mut saved = renumbered(&default_widgets());
        saved[0].label = "Old label from a previous build".to_string();
        let merged = reconcile(saved);
        assert_eq!(merged[0].label, default_widgets()[0].label);
    }
}
