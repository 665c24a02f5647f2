mod config;
mod layout;
mod portfolio;
mod types;
mod ui;

use std::io;
use std::process::exit;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use config::{Cli, CommitKind, Preferences, PrefsRequest, PrefsResponse};
use layout::Widget;
use portfolio::Portfolio;
use types::{App, NOTIFICATION_TTL_SECS};

fn display_startup_info(widgets: &[Widget]) {
    let enabled = widgets.iter().filter(|w| w.enabled).count();
    eprintln!("🚀 Starting roofdeck...");
    eprintln!("🧱 Dashboard sections: {} ({} shown)", widgets.len(), enabled);
    eprintln!("⏱️  Preparing the dashboard... (Press 'q' to quit)");
    eprintln!();
    eprintln!("🎯 Tip: Press Tab to customize which sections show and in what order");
    eprintln!("📅 Pending visits can be accepted with 'a' or declined with 'x'");
    eprintln!();
}

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    let cli = Cli::parse();

    // Handle reset flag first
    if cli.reset {
        match config::reset_prefs() {
            Ok(true) => {
                println!("✅ Saved dashboard layout has been reset.");
                println!("   Next time you run the program, the default sections are back.");
            }
            Ok(false) => {
                println!("ℹ️  No saved dashboard layout found to reset.");
            }
            Err(e) => {
                eprintln!("❌ Error resetting layout: {}", e);
                exit(1);
            }
        }
        return Ok(());
    }

    let widgets = config::effective_layout();

    if cli.json {
        if let Ok(json_output) = serde_json::to_string_pretty(&widgets) {
            println!("{}", json_output);
        }
        return Ok(());
    }

    display_startup_info(&widgets);

    // Preferences worker: layout commits go out over one channel, results
    // come back over the other so a failed write never unwinds the UI.
    let (req_tx, mut req_rx) = mpsc::channel::<PrefsRequest>(8);
    let (res_tx, mut res_rx) = mpsc::channel::<PrefsResponse>(8);
    thread::spawn(move || {
        while let Some(req) = req_rx.blocking_recv() {
            let result = match config::save_prefs(&Preferences {
                widgets: req.widgets.clone(),
            }) {
                Ok(()) => Ok(req.widgets),
                Err(e) => Err(e.to_string()),
            };
            let response = PrefsResponse {
                kind: req.kind,
                result,
            };
            if res_tx.blocking_send(response).is_err() {
                // UI is gone; nothing left to report to.
                break;
            }
        }
    });

    let mut app = App::new(widgets, Portfolio::sample());
    let mut terminal = ui::setup_terminal()?;

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // --- Draw UI ---
        ui::render_ui(&app, &mut terminal)?;

        // --- Input Handling ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(event) = event::read()? {
                if event.kind == crossterm::event::KeyEventKind::Press {
                    if ui::input::handle_key_event(&mut app, event.code) {
                        break; // Exit condition
                    }
                }
            }
        }

        // Ship any commit the input layer queued to the preferences worker.
        // The session stays read-only until the worker answers.
        if let Some(request) = app.outbox.take() {
            app.saving = true;
            if req_tx.try_send(request).is_err() {
                app.saving = false;
                app.notify("❌ Could not reach the preferences writer. Please try again.");
            }
        }

        // --- Tick-based updates ---
        if last_tick.elapsed() >= tick_rate {
            // Drain preferences worker results
            while let Ok(response) = res_rx.try_recv() {
                app.saving = false;
                match response.result {
                    Ok(widgets) => {
                        app.widgets = widgets;
                        app.close_customize();
                        match response.kind {
                            CommitKind::Save => app.notify("✅ Dashboard layout saved."),
                            CommitKind::Reset => {
                                app.notify("✅ Dashboard layout reset to where you started.")
                            }
                        }
                    }
                    Err(e) => {
                        // Session stays intact so the user can retry.
                        app.notify(format!("❌ Failed to save layout: {}", e));
                    }
                }
            }

            // Cleanup notifications that have been displayed long enough
            if let Some(time) = app.notification_time {
                if time.elapsed() > Duration::from_secs(NOTIFICATION_TTL_SECS) {
                    app.dismiss_notification();
                }
            }

            last_tick = Instant::now();
        }
    }

    ui::restore_terminal(&mut terminal)?;
    Ok(())
}
