//! Clear-all-data command implementation.

use crate::cli::commands::open_store;
use crate::cli::notify;
use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Execute the clear command.
///
/// Destructive and irreversible: requires an explicit confirmation
/// step (`--force`, or an interactive yes) before anything happens.
pub fn execute(force: bool, db: Option<&PathBuf>, json: bool) -> Result<()> {
    if !force && !confirm()? {
        notify::info("Cancelled; nothing was cleared.");
        return Ok(());
    }

    let mut store = open_store(db)?;
    store.clear_all()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": true }));
    } else {
        notify::success("All data has been cleared successfully");
    }

    Ok(())
}

fn confirm() -> Result<bool> {
    print!("Are you sure you want to clear all data? This action cannot be undone. [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
