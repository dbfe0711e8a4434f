//! Huddle session model.
//!
//! A huddle session is a dated note/status entry with an accumulated
//! stopwatch duration, representing one working session on a case.
//! Sessions are owned exclusively by their case and addressed by
//! position within the case's session list.

use serde::{Deserialize, Serialize};

/// Session status values.
///
/// Serialized forms match the display strings used in persisted
/// records and CSV-embedded session JSON ("In Progress", "Pending QA").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending Customer")]
    PendingCustomer,
    #[serde(rename = "Pending Development")]
    PendingDevelopment,
    #[serde(rename = "Pending QA")]
    PendingQa,
    Resolved,
    Closed,
    Other,
}

impl SessionStatus {
    /// All statuses, in form-menu order.
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::InProgress,
        Self::PendingCustomer,
        Self::PendingDevelopment,
        Self::PendingQa,
        Self::Resolved,
        Self::Closed,
        Self::Other,
    ];

    /// Display string, identical to the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::PendingCustomer => "Pending Customer",
            Self::PendingDevelopment => "Pending Development",
            Self::PendingQa => "Pending QA",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A huddle session logged against a case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuddleSession {
    /// Session date (date string, `YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,

    /// Current status of the case as of this session.
    #[serde(default)]
    pub current_status: SessionStatus,

    /// Case overview notes.
    #[serde(default)]
    pub case_overview: String,

    /// Steps taken so far.
    #[serde(default)]
    pub steps_taken: String,

    /// Challenges encountered.
    #[serde(default)]
    pub challenges: String,

    /// Planned next steps.
    #[serde(default)]
    pub next_steps: String,

    /// Accumulated stopwatch duration in whole seconds.
    #[serde(default)]
    pub duration: u64,
}

impl HuddleSession {
    /// Create a blank session dated today (UTC): status Open,
    /// zero duration, empty text fields.
    #[must_use]
    pub fn new_today() -> Self {
        Self::new_on(chrono::Utc::now().format("%Y-%m-%d").to_string())
    }

    /// Create a blank session with an explicit date.
    #[must_use]
    pub fn new_on(date: String) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = HuddleSession::new_today();
        assert_eq!(session.current_status, SessionStatus::Open);
        assert_eq!(session.duration, 0);
        assert!(session.case_overview.is_empty());
        // Date stamp looks like YYYY-MM-DD
        assert_eq!(session.date.len(), 10);
        assert_eq!(&session.date[4..5], "-");
    }

    #[test]
    fn test_status_serialized_as_display_string() {
        let json = serde_json::to_string(&SessionStatus::PendingQa).unwrap();
        assert_eq!(json, "\"Pending QA\"");
        let back: SessionStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, SessionStatus::InProgress);
    }

    #[test]
    fn test_session_camel_case_round_trip() {
        let mut session = HuddleSession::new_on("2024-05-01".to_string());
        session.current_status = SessionStatus::Resolved;
        session.steps_taken = "rebooted".to_string();
        session.duration = 42;

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"currentStatus\":\"Resolved\""));
        assert!(json.contains("\"stepsTaken\""));

        let back: HuddleSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_missing_fields_default() {
        // Imported session objects may omit fields; they default.
        let back: HuddleSession = serde_json::from_str("{\"date\":\"2024-01-01\"}").unwrap();
        assert_eq!(back.current_status, SessionStatus::Open);
        assert_eq!(back.duration, 0);
    }
}
