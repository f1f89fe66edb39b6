//! courses-tui - a terminal console for UCSB course data and admin jobs
//!
//! This is the main entry point for the courses-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{App, LaunchOptions};
use crate::component::Component;
use crate::config::Config;
use crate::model::preferences;
use crate::services::FixtureBackend;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixture tree used when neither the flag nor the config names one
const DEFAULT_DATA_DIR: &str = "demos/data";

#[derive(Parser, Debug)]
#[command(name = "courses-tui", version, about = "Browse UCSB courses and launch admin jobs")]
struct Args {
    /// Directory of JSON responses laid out like the API (`api/systemInfo.json`, ...)
    #[arg(long)]
    data_dir: Option<String>,

    /// Where preferences, the job log and config.json live (default: ~/.courses-tui)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Quarter to open on the course details page, e.g. 20221
    #[arg(long)]
    qtr: Option<String>,

    /// Enroll code to look up on start, e.g. 06619
    #[arg(long)]
    enroll_code: Option<String>,

    /// Log file (default: <config dir>/courses-tui.log)
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let home_config = args.config_dir.clone().or_else(Config::config_dir);
    // Without a home directory, logs and the job log go in the working directory
    let config_dir = home_config
        .clone()
        .unwrap_or_else(|| PathBuf::from(".courses-tui"));
    let stored = Config::load(&config_dir);
    let first_run = stored.is_none();
    let config = stored
        .unwrap_or_default()
        .merge(args.data_dir.clone(), args.log_file.clone());

    init_logger(&config.log_path(&config_dir))?;

    if first_run {
        if let Err(e) = config.save(&config_dir) {
            warn!("Could not write config: {}", e);
        }
    }

    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
    info!("Serving data from {}", data_dir);

    let prefs = preferences::open_store(home_config.as_deref());
    let launch = LaunchOptions {
        qtr: args.qtr,
        enroll_code: args.enroll_code,
    };

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(
        Box::new(FixtureBackend::new(data_dir)),
        prefs,
        config_dir,
        launch,
    );
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_logger(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                warn!("Draw error: {}", e);
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                debug!("{}", a);
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    info!("Exiting");
    Ok(())
}
