//! Session command implementations.

use crate::cli::commands::{open_store, position};
use crate::cli::notify;
use crate::cli::{SessionCommands, SessionEditArgs};
use crate::editor::SessionEditor;
use crate::error::{Error, Result};
use crate::format::format_duration;
use crate::model::HuddleSession;
use crate::storage::SqliteStore;
use crate::store::CaseStore;
use crate::validate;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

/// Execute session commands.
pub fn execute(command: &SessionCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        SessionCommands::Add { case } => add(*case, db, json),
        SessionCommands::Show { case } => show(*case, db, json),
        SessionCommands::Edit(args) => edit(args, db, json),
        SessionCommands::Delete { case, index } => delete(*case, *index, db, json),
        SessionCommands::Track { case, index } => track(*case, *index, db, json),
    }
}

/// Look up a session, mapping missing case/session to not-found errors.
fn get_session(
    store: &CaseStore<SqliteStore>,
    case_index: usize,
    session_index: usize,
) -> Result<HuddleSession> {
    let case_pos = position(case_index)?;
    let session_pos = position(session_index)?;

    let case = store.cases().get(case_pos).ok_or(Error::CaseNotFound {
        index: case_index,
        count: store.cases().len(),
    })?;

    case.huddle_sessions
        .get(session_pos)
        .cloned()
        .ok_or(Error::SessionNotFound {
            case: case_index,
            index: session_index,
            count: case.huddle_sessions.len(),
        })
}

fn add(case_index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;
    let case_pos = position(case_index)?;

    let session_pos = store
        .add_session(case_pos)?
        .ok_or(Error::CaseNotFound {
            index: case_index,
            count: store.cases().len(),
        })?;

    let session = &store.cases()[case_pos].huddle_sessions[session_pos];

    if json {
        let output = serde_json::json!({
            "case": case_index,
            "session": session_pos + 1,
            "record": session,
        });
        println!("{output}");
    } else {
        notify::success(&format!(
            "Added session #{} to case #{case_index}",
            session_pos + 1
        ));
        // Open the new session's editor view immediately.
        print_session(session_pos + 1, session);
    }

    Ok(())
}

fn show(case_index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let case_pos = position(case_index)?;

    let case = store.cases().get(case_pos).ok_or(Error::CaseNotFound {
        index: case_index,
        count: store.cases().len(),
    })?;

    if json {
        println!("{}", serde_json::to_string(&case.huddle_sessions)?);
        return Ok(());
    }

    if case.huddle_sessions.is_empty() {
        notify::info(&format!(
            "Case #{case_index} has no sessions. Add one with `huddle session add {case_index}`."
        ));
        return Ok(());
    }

    for (i, session) in case.huddle_sessions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_session(i + 1, session);
    }

    Ok(())
}

fn edit(args: &SessionEditArgs, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;
    let session = get_session(&store, args.case, args.index)?;

    let mut editor = SessionEditor::new(&session);
    editor.enter_edit();

    let scratch = editor.scratch_mut();
    if let Some(date) = &args.date {
        scratch.date = date.clone();
    }
    if let Some(status) = &args.status {
        scratch.current_status = validate::normalize_status(status)?;
    }
    if let Some(overview) = &args.overview {
        scratch.case_overview = overview.clone();
    }
    if let Some(steps) = &args.steps {
        scratch.steps_taken = steps.clone();
    }
    if let Some(challenges) = &args.challenges {
        scratch.challenges = challenges.clone();
    }
    if let Some(next_steps) = &args.next_steps {
        scratch.next_steps = next_steps.clone();
    }
    if let Some(duration) = args.duration {
        editor.set_duration(duration);
    }

    let record = editor.save();
    store.update_session(position(args.case)?, position(args.index)?, record.clone())?;

    if json {
        let output = serde_json::json!({
            "case": args.case,
            "session": args.index,
            "record": record,
        });
        println!("{output}");
    } else {
        notify::success(&format!(
            "Saved session #{} of case #{}",
            args.index, args.case
        ));
        print_session(args.index, &record);
    }

    Ok(())
}

fn delete(case_index: usize, session_index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;

    // Out-of-range deletes are no-ops, matching case deletion.
    let deleted =
        store.delete_session(position(case_index)?, position(session_index)?)?;

    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else if deleted {
        notify::success(&format!(
            "Deleted session #{session_index} from case #{case_index}"
        ));
    } else {
        notify::info(&format!(
            "No session #{session_index} on case #{case_index}; nothing to delete."
        ));
    }

    Ok(())
}

fn track(case_index: usize, session_index: usize, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut store = open_store(db)?;
    let session = get_session(&store, case_index, session_index)?;

    let mut editor = SessionEditor::new(&session);

    // One reader thread waits for Enter (or EOF); the main loop turns
    // one-second timeouts into stopwatch ticks. Stopping the watch
    // before saving guarantees no stray tick lands after the stop.
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = tx.send(());
    });

    editor.stopwatch_mut().start();
    if !json {
        println!(
            "Tracking session #{session_index} of case #{case_index} \
             (starting at {}); press Enter to stop.",
            format_duration(editor.stopwatch().seconds())
        );
    }

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                editor.stopwatch_mut().tick();
                if !json {
                    print!("\r  {}", format_duration(editor.stopwatch().seconds()));
                    std::io::stdout().flush()?;
                }
            }
            // Enter pressed, or stdin closed.
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    editor.stopwatch_mut().stop();
    let record = editor.save();
    store.update_session(
        position(case_index)?,
        position(session_index)?,
        record.clone(),
    )?;

    if json {
        let output = serde_json::json!({
            "case": case_index,
            "session": session_index,
            "duration": record.duration,
        });
        println!("{output}");
    } else {
        println!();
        notify::success(&format!(
            "Saved session #{session_index} of case #{case_index} at {}",
            format_duration(record.duration)
        ));
    }

    Ok(())
}

/// Render one session in its view mode.
pub(crate) fn print_session(number: usize, session: &HuddleSession) {
    println!(
        "Session #{number}  {}  [{}]  {}",
        session.date,
        session.current_status,
        format_duration(session.duration)
    );
    println!("  Case Overview: {}", session.case_overview);
    println!("  Steps Taken:   {}", session.steps_taken);
    println!("  Challenges:    {}", session.challenges);
    println!("  Next Steps:    {}", session.next_steps);
}
