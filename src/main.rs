mod app;
mod cli;
mod controls;
mod data;
mod form;
mod task;
mod todos;
mod ui;
mod visible;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::app::App;
use crate::cli::Config;

fn load_tasks(config: &Config) -> anyhow::Result<Vec<task::Task>> {
    if config.empty {
        return Ok(Vec::new());
    }
    match &config.data {
        Some(path) => data::load_from_file(path),
        None => data::bundled_tasks(),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_matches(&cli::command().get_matches());
    cli::init_tracing(&config)?;

    let mut app = App::new(load_tasks(&config)?);
    info!(tasks = app.todos.len(), "starting");

    // Terminal setup
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "event loop failed");
    }
    result.context("terminal event loop failed")
}
