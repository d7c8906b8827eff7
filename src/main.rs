use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use docnav::app::{sample_tree, App};
use docnav::config::Config;
use docnav::explorer::DocNode;
use docnav::{logging, ui};

/// Keyboard-driven browser over a document tree snapshot.
#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(about = "Browse a document tree with keyboard-driven selection", long_about = None)]
struct Args {
    /// Document tree snapshot (JSON). Uses a built-in sample when omitted.
    #[arg(value_name = "TREE")]
    tree: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn load_tree(path: &Path) -> Result<DocNode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading tree snapshot {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing tree snapshot {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("docnav.log"));
    logging::init_global(&log_path)?;

    let config = Config::load_or_default(args.config.as_deref());
    let document_tree = match &args.tree {
        Some(path) => load_tree(path)?,
        None => sample_tree(),
    };
    tracing::info!(
        root = %document_tree.name,
        "starting browser over document tree"
    );

    let mut app = App::new(document_tree, &config);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("drawing frame")?;
        if let Event::Key(key) = event::read().context("reading terminal event")? {
            app.handle_key(&key);
        }
    }
    Ok(())
}
