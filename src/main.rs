// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

// Use library instead of local modules
#[cfg(feature = "tui")]
use fair_split::{Controller, MemoryStore, SqliteStore, StateStore};
#[cfg(feature = "tui")]
use std::path::PathBuf;

// Database file used unless FAIR_SPLIT_DB points elsewhere
#[cfg(feature = "tui")]
const DEFAULT_DB_FILE: &str = "fair-split.db";

fn main() -> Result<()> {
    run_ui_mode()?;

    Ok(())
}

/// Open durable storage, or fall back to a session-only store. Storage being
/// unavailable is not fatal: the calculator still runs, it just forgets.
#[cfg(feature = "tui")]
fn open_store() -> Box<dyn StateStore> {
    let path = std::env::var("FAIR_SPLIT_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE));

    match SqliteStore::open(&path) {
        Ok(store) => {
            println!("✓ State database: {}", path.display());
            Box::new(store)
        }
        Err(err) => {
            eprintln!("❌ Could not open {}: {}", path.display(), err);
            eprintln!("   Continuing without persistence (session only).");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🧮 Fair Split - proportional expense calculator\n");

    let controller = Controller::new(open_store());

    println!("Starting UI... (Press Esc to quit)\n");

    // Create and run app
    let mut app = ui::App::new(controller);
    ui::run_ui(&mut app)?;

    println!("\n✓ Fair Split closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin fair-split-server --features server");
    std::process::exit(1);
}
