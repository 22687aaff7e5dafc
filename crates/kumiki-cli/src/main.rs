//! Kumiki demo host.
//!
//! Loads a program literal, optionally replays a recorded pointer script
//! against it, and prints the block tree before and after.
//!
//! Usage:
//!   # Show the demo program
//!   cargo run -p kumiki-cli
//!
//!   # Replay a drag and write the result as SVG
//!   cargo run -p kumiki-cli -- --script drag.ron --svg out.svg
//!
//! A script is a RON list of pointer events in screen units:
//!
//! ```ron
//! [Down(35.0, 55.0), Move(55.0, 55.0), Move(35.0, 55.0), Up(35.0, 55.0)]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use kumiki_editor::{Editor, EditorConfig, PointerEvent};

#[derive(Parser, Debug)]
#[command(name = "kumiki")]
#[command(about = "Drag-and-drop block editor demo")]
struct Args {
    /// Program literal as JSON (defaults to the demo program)
    #[arg(short, long)]
    literal: Option<String>,

    /// Editor configuration (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pointer events to replay (RON list)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the final scene as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,kumiki=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let literal = match &args.literal {
        Some(text) => serde_json::from_str(text).context("parsing --literal as JSON")?,
        None => kumiki_graph::sample_program(),
    };

    let mut editor = Editor::with_program(config, &literal);
    for warning in editor.warnings() {
        tracing::warn!(%warning, "build");
    }
    print!("{}", editor.outline_text());

    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let events: Vec<PointerEvent> =
            ron::from_str(&text).with_context(|| format!("parsing script {}", path.display()))?;
        tracing::info!(events = events.len(), "replaying script");
        for event in events {
            editor.dispatch(event);
        }
        let highlighted = editor.highlights().active();
        if !highlighted.is_empty() {
            tracing::info!(?highlighted, "highlighted after script");
        }
        println!("---");
        print!("{}", editor.outline_text());
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, editor.to_svg())
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote svg");
    }

    Ok(())
}
