//! Case command implementations.

use crate::cli::commands::{open_store, position};
use crate::cli::notify;
use crate::cli::{CaseAddArgs, CaseCommands, CaseListArgs, Order};
use crate::csv;
use crate::error::{Error, Result};
use crate::format::format_duration;
use crate::model::Case;
use crate::validate;
use crate::view::{self, Row, SortDirection, SortKey, TableState};
use serde::Serialize;
use std::path::PathBuf;

/// Output row for `case list --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowOutput<'a> {
    /// 1-based store position (stable across sorting/filtering).
    position: usize,
    #[serde(flatten)]
    case: &'a Case,
    session_count: usize,
    total_duration: u64,
}

/// Execute case commands.
pub fn execute(command: &CaseCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        CaseCommands::Add(args) => add(args, db, json),
        CaseCommands::List(args) => list(args, db, json),
        CaseCommands::Show { index } => show(*index, db, json),
        CaseCommands::Delete { index } => delete(*index, db, json),
        CaseCommands::Import { file } => import(file, db, json),
        CaseCommands::Export { file } => export(file.as_ref(), db),
    }
}

fn add(args: &CaseAddArgs, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;

    // Empty fields are accepted; only a provided issue type is validated.
    let issue_type = validate::normalize_issue_type(args.issue_type.as_deref().unwrap_or(""))?;

    let draft = store.draft_mut();
    draft.case_number = args.case_number.clone().unwrap_or_default();
    draft.customer = args.customer.clone().unwrap_or_default();
    draft.support_engineer = args.support_engineer.clone().unwrap_or_default();
    draft.date_opened = args.date_opened.clone().unwrap_or_default();
    draft.product_service_area = args.product_area.clone().unwrap_or_default();
    draft.issue_type = issue_type;
    draft.labels = args.labels.clone().unwrap_or_default();

    let pos = store.add_case()?;

    if json {
        let output = serde_json::json!({
            "position": pos + 1,
            "case": store.cases()[pos],
        });
        println!("{output}");
    } else {
        let number = &store.cases()[pos].case_number;
        if number.is_empty() {
            notify::success(&format!("Added case #{}", pos + 1));
        } else {
            notify::success(&format!("Added case #{} ({number})", pos + 1));
        }
    }

    Ok(())
}

fn list(args: &CaseListArgs, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db)?;

    let sort_key = match args.sort.as_deref() {
        Some(s) => s.parse::<SortKey>().map_err(Error::InvalidArgument)?,
        None => SortKey::default(),
    };
    let state = TableState {
        sort_key,
        direction: match args.order {
            Order::Asc => SortDirection::Ascending,
            Order::Desc => SortDirection::Descending,
        },
        filter: args.filter.clone().unwrap_or_default(),
    };

    let rows = view::project(store.cases(), &state);

    if json {
        let output: Vec<RowOutput> = rows
            .iter()
            .map(|row| RowOutput {
                position: row.position + 1,
                case: row.case,
                session_count: row.case.session_count(),
                total_duration: row.case.total_duration(),
            })
            .collect();
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if rows.is_empty() {
        if store.cases().is_empty() {
            notify::info("No cases on file. Add one with `huddle case add`.");
        } else {
            notify::info("No cases match the filter.");
        }
        return Ok(());
    }

    print_table(&rows);
    Ok(())
}

const HEADERS: [&str; 10] = [
    "#",
    "Case Number",
    "Customer",
    "Support Engineer",
    "Date Opened",
    "Product/Service Area",
    "Issue Type",
    "Labels",
    "Sessions",
    "Total Duration",
];

fn print_table(rows: &[Row<'_>]) {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    table.push(HEADERS.iter().map(ToString::to_string).collect());
    for row in rows {
        let mut cells = vec![(row.position + 1).to_string()];
        cells.extend(row.field_strings());
        table.push(cells);
    }

    let widths: Vec<usize> = (0..HEADERS.len())
        .map(|col| table.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    for row in &table {
        let line = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}

fn show(index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let pos = position(index)?;

    let case = store.cases().get(pos).ok_or(Error::CaseNotFound {
        index,
        count: store.cases().len(),
    })?;

    if json {
        println!("{}", serde_json::to_string(case)?);
        return Ok(());
    }

    println!("Case #{index}");
    println!("  Case Number:          {}", case.case_number);
    println!("  Customer:             {}", case.customer);
    println!("  Support Engineer:     {}", case.support_engineer);
    println!("  Date Opened:          {}", case.date_opened);
    println!("  Product/Service Area: {}", case.product_service_area);
    println!("  Issue Type:           {}", case.issue_type);
    println!("  Labels:               {}", case.labels);
    println!(
        "  Sessions:             {} ({} total)",
        case.session_count(),
        format_duration(case.total_duration())
    );

    for (i, session) in case.huddle_sessions.iter().enumerate() {
        println!();
        crate::cli::commands::session::print_session(i + 1, session);
    }

    Ok(())
}

fn delete(index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;
    let pos = position(index)?;

    // Deleting an already-removed index is a no-op, never an error.
    let deleted = store.delete_case(pos)?;

    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else if deleted {
        notify::success(&format!("Deleted case #{index}"));
    } else {
        notify::info(&format!("No case at #{index}; nothing to delete."));
    }

    Ok(())
}

fn import(file: &PathBuf, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;

    let mut store = open_store(db)?;
    let imported = store.import_from_csv(&contents)?;

    if json {
        println!("{}", serde_json::json!({ "imported": imported }));
    } else {
        notify::success(&format!(
            "Imported {imported} case(s) from {}",
            file.display()
        ));
    }

    Ok(())
}

fn export(file: Option<&PathBuf>, db: Option<&PathBuf>) -> Result<()> {
    let store = open_store(db)?;
    let text = csv::write_cases(store.cases())?;

    match file {
        Some(path) => {
            std::fs::write(path, &text)?;
            notify::success(&format!(
                "Exported {} case(s) to {}",
                store.cases().len(),
                path.display()
            ));
        }
        None => print!("{text}"),
    }

    Ok(())
}
