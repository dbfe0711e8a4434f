//! Vocabulary command implementations (products and labels).
//!
//! Both vocabularies are append-only sets of strings used to populate
//! the case form's selection choices; there is no delete.

use crate::cli::commands::open_store;
use crate::cli::notify;
use crate::cli::{LabelCommands, ProductCommands};
use crate::error::Result;
use std::path::PathBuf;

/// Execute product/service-area commands.
pub fn execute_product(command: &ProductCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        ProductCommands::Add { name } => {
            let mut store = open_store(db)?;
            let added = store.add_product(name)?;
            report_add("product/service area", name, added, json);
            Ok(())
        }
        ProductCommands::List => {
            let store = open_store(db)?;
            list("product/service areas", store.products(), json)
        }
    }
}

/// Execute label commands.
pub fn execute_label(command: &LabelCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        LabelCommands::Add { name } => {
            let mut store = open_store(db)?;
            let added = store.add_label(name)?;
            report_add("label", name, added, json);
            Ok(())
        }
        LabelCommands::List => {
            let store = open_store(db)?;
            list("labels", store.labels(), json)
        }
    }
}

fn report_add(kind: &str, name: &str, added: bool, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "name": name, "added": added }));
    } else if added {
        notify::success(&format!("Added {kind}: {name}"));
    } else {
        notify::info(&format!("{kind} already exists: {name}"));
    }
}

fn list(kind: &str, entries: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        notify::info(&format!("No {kind} yet."));
        return Ok(());
    }

    for entry in entries {
        println!("{entry}");
    }
    Ok(())
}
