//! Per-session editor state machine and stopwatch.
//!
//! Each rendered session gets its own editor, independent of the
//! others: a view/edit mode over a scratch copy of the session, plus
//! a stopwatch seeded from the stored duration. Nothing here touches
//! the store; `save()` hands back the merged record for the owner
//! to commit via `CaseStore::update_session`.

use crate::model::HuddleSession;

/// Elapsed-time stopwatch driven by explicit one-second ticks.
///
/// The owner starts/stops the stopwatch and delivers ticks from its
/// own scheduler; a stopped stopwatch ignores ticks, so stopping
/// guarantees no further increments apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    seconds: u64,
    running: bool,
}

impl Stopwatch {
    /// Create a stopped stopwatch seeded with `seconds`.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self {
            seconds,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt increments; the current value is retained.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Apply one one-second tick. Ignored while stopped.
    pub fn tick(&mut self) {
        if self.running {
            self.seconds += 1;
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }
}

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    View,
    Edit,
}

/// Editor state for one huddle session.
#[derive(Debug, Clone)]
pub struct SessionEditor {
    mode: Mode,
    scratch: HuddleSession,
    stopwatch: Stopwatch,
}

impl SessionEditor {
    /// Create an editor in view mode over the given session.
    #[must_use]
    pub fn new(session: &HuddleSession) -> Self {
        Self {
            mode: Mode::View,
            scratch: session.clone(),
            stopwatch: Stopwatch::new(session.duration),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to edit mode over a scratch copy of the session.
    pub fn enter_edit(&mut self) {
        self.mode = Mode::Edit;
    }

    /// The scratch record being edited.
    #[must_use]
    pub const fn scratch(&self) -> &HuddleSession {
        &self.scratch
    }

    /// Mutable access to the scratch record for field edits. Edits
    /// live here until a save or an external update; they are never
    /// committed implicitly.
    pub fn scratch_mut(&mut self) -> &mut HuddleSession {
        &mut self.scratch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    #[must_use]
    pub const fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Replace the accumulated duration outright, reseeding the
    /// stopwatch (used when an edit supplies an explicit duration).
    pub fn set_duration(&mut self, seconds: u64) {
        self.stopwatch = Stopwatch::new(seconds);
    }

    /// Commit: merge the scratch record with the stopwatch value,
    /// return to view mode, and hand back the record for the owner
    /// to store. Saving is the only path that persists the timer.
    pub fn save(&mut self) -> HuddleSession {
        self.scratch.duration = self.stopwatch.seconds();
        self.mode = Mode::View;
        self.scratch.clone()
    }

    /// The parent supplied a fresh session object (external update):
    /// reset the scratch copy and reseed the stopwatch.
    pub fn sync_external(&mut self, session: &HuddleSession) {
        self.scratch = session.clone();
        self.stopwatch = Stopwatch::new(session.duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionStatus;

    fn session_with_duration(duration: u64) -> HuddleSession {
        HuddleSession {
            date: "2024-03-01".to_string(),
            duration,
            ..HuddleSession::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let editor = SessionEditor::new(&session_with_duration(10));
        assert_eq!(editor.mode(), Mode::View);
        assert!(!editor.stopwatch().is_running());
        assert_eq!(editor.stopwatch().seconds(), 10);
    }

    #[test]
    fn test_duration_accumulation() {
        // Pre-timer duration 10, run for 5 ticks, stop, save.
        let mut editor = SessionEditor::new(&session_with_duration(10));
        editor.stopwatch_mut().start();
        for _ in 0..5 {
            editor.stopwatch_mut().tick();
        }
        editor.stopwatch_mut().stop();

        let saved = editor.save();
        assert_eq!(saved.duration, 15);
    }

    #[test]
    fn test_stopped_stopwatch_ignores_ticks() {
        let mut sw = Stopwatch::new(3);
        sw.tick();
        assert_eq!(sw.seconds(), 3);

        sw.start();
        sw.tick();
        sw.stop();
        // A tick arriving after stop must not apply.
        sw.tick();
        assert_eq!(sw.seconds(), 4);
    }

    #[test]
    fn test_timer_alone_does_not_change_scratch() {
        let mut editor = SessionEditor::new(&session_with_duration(0));
        editor.stopwatch_mut().start();
        editor.stopwatch_mut().tick();
        // Until save, the scratch record still carries the old value.
        assert_eq!(editor.scratch().duration, 0);
    }

    #[test]
    fn test_save_merges_edits_and_timer() {
        let mut editor = SessionEditor::new(&session_with_duration(0));
        editor.enter_edit();
        editor.scratch_mut().current_status = SessionStatus::Resolved;
        editor.scratch_mut().next_steps = "ship it".to_string();
        editor.stopwatch_mut().start();
        for _ in 0..5 {
            editor.stopwatch_mut().tick();
        }

        let saved = editor.save();
        assert_eq!(saved.current_status, SessionStatus::Resolved);
        assert_eq!(saved.next_steps, "ship it");
        assert_eq!(saved.duration, 5);
        assert_eq!(editor.mode(), Mode::View);
    }

    #[test]
    fn test_unsaved_edits_persist_until_external_update() {
        let stored = session_with_duration(10);
        let mut editor = SessionEditor::new(&stored);
        editor.enter_edit();
        editor.scratch_mut().challenges = "flaky repro".to_string();

        // Edits stay in local state without a save.
        assert_eq!(editor.scratch().challenges, "flaky repro");

        // A fresh session object from the parent resets the scratch.
        let mut fresh = stored.clone();
        fresh.duration = 99;
        editor.sync_external(&fresh);
        assert!(editor.scratch().challenges.is_empty());
        assert_eq!(editor.stopwatch().seconds(), 99);
    }

    #[test]
    fn test_set_duration_reseeds_stopwatch() {
        let mut editor = SessionEditor::new(&session_with_duration(10));
        editor.set_duration(5);
        let saved = editor.save();
        assert_eq!(saved.duration, 5);
    }

    #[test]
    fn test_toggle() {
        let mut sw = Stopwatch::new(0);
        sw.toggle();
        assert!(sw.is_running());
        sw.toggle();
        assert!(!sw.is_running());
    }
}
