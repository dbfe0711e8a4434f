//! The case store.
//!
//! Central state: the ordered case collection plus the product and
//! label vocabularies, mirrored to the persistence port on every
//! change. Each record persists independently as its own full
//! snapshot; there is no batching and no cross-record transaction.
//!
//! Cases and sessions are addressed by position (0-based here; the
//! CLI presents 1-based indices). Deletes at out-of-range positions
//! are silent no-ops.

use crate::csv;
use crate::error::Result;
use crate::model::{Case, HuddleSession, IssueType};
use crate::storage::{StoragePort, CASES_KEY, LABELS_KEY, PRODUCTS_KEY};

/// The add-case form values.
///
/// No validation is performed on required fields: empty strings are
/// accepted. Submitting resets every field to blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseDraft {
    pub case_number: String,
    pub customer: String,
    pub support_engineer: String,
    pub date_opened: String,
    pub product_service_area: String,
    pub issue_type: IssueType,
    pub labels: String,
}

impl CaseDraft {
    fn into_case(self) -> Case {
        Case {
            case_number: self.case_number,
            customer: self.customer,
            support_engineer: self.support_engineer,
            date_opened: self.date_opened,
            product_service_area: self.product_service_area,
            issue_type: self.issue_type,
            labels: self.labels,
            huddle_sessions: Vec::new(),
        }
    }
}

/// In-memory case collection with write-through persistence.
#[derive(Debug)]
pub struct CaseStore<S: StoragePort> {
    port: S,
    cases: Vec<Case>,
    products: Vec<String>,
    labels: Vec<String>,
    draft: CaseDraft,
}

impl<S: StoragePort> CaseStore<S> {
    /// Load the store from the persistence port.
    ///
    /// Absent keys load as empty collections.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored record cannot be read or parsed.
    pub fn open(port: S) -> Result<Self> {
        let cases = load(&port, CASES_KEY)?;
        let products = load(&port, PRODUCTS_KEY)?;
        let labels = load(&port, LABELS_KEY)?;

        Ok(Self {
            port,
            cases,
            products,
            labels,
            draft: CaseDraft::default(),
        })
    }

    /// The current case collection, in insertion order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// The product/service-area vocabulary.
    #[must_use]
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// The label vocabulary.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The add-case draft form.
    pub fn draft_mut(&mut self) -> &mut CaseDraft {
        &mut self.draft
    }

    /// Append a new case built from the draft form, with an empty
    /// session list, then reset the draft to blank values.
    ///
    /// Returns the new case's position.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist; the
    /// in-memory change has already been applied.
    pub fn add_case(&mut self) -> Result<usize> {
        let draft = std::mem::take(&mut self.draft);
        self.cases.push(draft.into_case());
        self.persist_cases()?;
        Ok(self.cases.len() - 1)
    }

    /// Remove the case at `position`, discarding its sessions.
    ///
    /// Out-of-range positions are a silent no-op; returns whether a
    /// case was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn delete_case(&mut self, position: usize) -> Result<bool> {
        if position >= self.cases.len() {
            return Ok(false);
        }
        self.cases.remove(position);
        self.persist_cases()?;
        Ok(true)
    }

    /// Append a blank session (status Open, today's date, zero
    /// duration) to the case at `case_position`.
    ///
    /// Returns the new session's position so the caller can open its
    /// editor immediately, or `None` if the case doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn add_session(&mut self, case_position: usize) -> Result<Option<usize>> {
        let Some(case) = self.cases.get_mut(case_position) else {
            return Ok(None);
        };
        case.huddle_sessions.push(HuddleSession::new_today());
        let position = case.huddle_sessions.len() - 1;
        self.persist_cases()?;
        Ok(Some(position))
    }

    /// Replace the session at the given position wholesale.
    ///
    /// Returns whether a session was replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn update_session(
        &mut self,
        case_position: usize,
        session_position: usize,
        record: HuddleSession,
    ) -> Result<bool> {
        let Some(slot) = self
            .cases
            .get_mut(case_position)
            .and_then(|c| c.huddle_sessions.get_mut(session_position))
        else {
            return Ok(false);
        };
        *slot = record;
        self.persist_cases()?;
        Ok(true)
    }

    /// Remove the session at the given position.
    ///
    /// Out-of-range positions are a silent no-op; returns whether a
    /// session was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn delete_session(
        &mut self,
        case_position: usize,
        session_position: usize,
    ) -> Result<bool> {
        let Some(case) = self.cases.get_mut(case_position) else {
            return Ok(false);
        };
        if session_position >= case.huddle_sessions.len() {
            return Ok(false);
        }
        case.huddle_sessions.remove(session_position);
        self.persist_cases()?;
        Ok(true)
    }

    /// Replace the entire case collection with rows parsed from CSV.
    ///
    /// The parse completes before anything is applied: a malformed
    /// row fails the whole upload and the collection is unchanged.
    ///
    /// Returns the number of imported cases.
    ///
    /// # Errors
    ///
    /// Returns `Error::CsvImport` on a malformed file, or a storage
    /// error if the snapshot fails to persist.
    pub fn import_from_csv(&mut self, file_contents: &str) -> Result<usize> {
        let parsed = csv::parse_cases(file_contents)?;
        self.cases = parsed;
        self.persist_cases()?;
        Ok(self.cases.len())
    }

    /// Empty the case collection and both vocabularies, and remove
    /// all three records from persistent storage. Cannot be undone;
    /// the caller is responsible for confirming first.
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails to be removed from storage.
    pub fn clear_all(&mut self) -> Result<()> {
        self.cases.clear();
        self.products.clear();
        self.labels.clear();
        self.draft = CaseDraft::default();

        self.port.remove(CASES_KEY)?;
        self.port.remove(PRODUCTS_KEY)?;
        self.port.remove(LABELS_KEY)?;
        Ok(())
    }

    /// Add an entry to the product/service-area vocabulary.
    ///
    /// Vocabularies are append-only sets: re-adding an existing entry
    /// is a no-op. Returns whether the entry was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn add_product(&mut self, name: &str) -> Result<bool> {
        if self.products.iter().any(|p| p == name) {
            return Ok(false);
        }
        self.products.push(name.to_string());
        let json = serde_json::to_string(&self.products)?;
        self.port.set(PRODUCTS_KEY, &json)?;
        Ok(true)
    }

    /// Add an entry to the label vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to persist.
    pub fn add_label(&mut self, name: &str) -> Result<bool> {
        if self.labels.iter().any(|l| l == name) {
            return Ok(false);
        }
        self.labels.push(name.to_string());
        let json = serde_json::to_string(&self.labels)?;
        self.port.set(LABELS_KEY, &json)?;
        Ok(true)
    }

    fn persist_cases(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.cases)?;
        self.port.set(CASES_KEY, &json)
    }
}

fn load<S: StoragePort, T: serde::de::DeserializeOwned>(port: &S, key: &str) -> Result<Vec<T>> {
    match port.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionStatus;
    use crate::storage::SqliteStore;

    fn open_store() -> CaseStore<SqliteStore> {
        CaseStore::open(SqliteStore::open_memory().unwrap()).unwrap()
    }

    fn add_case(store: &mut CaseStore<SqliteStore>, number: &str, customer: &str) -> usize {
        let draft = store.draft_mut();
        draft.case_number = number.to_string();
        draft.customer = customer.to_string();
        store.add_case().unwrap()
    }

    #[test]
    fn test_add_case_resets_draft() {
        let mut store = open_store();
        let draft = store.draft_mut();
        draft.case_number = "C-1".to_string();
        draft.labels = "vip".to_string();
        draft.issue_type = IssueType::Bug;

        let pos = store.add_case().unwrap();
        assert_eq!(pos, 0);
        assert_eq!(store.cases()[0].case_number, "C-1");
        assert!(store.cases()[0].huddle_sessions.is_empty());
        // Every draft field resets, labels included.
        assert_eq!(*store.draft_mut(), CaseDraft::default());
    }

    #[test]
    fn test_empty_draft_accepted() {
        let mut store = open_store();
        store.add_case().unwrap();
        assert_eq!(store.cases().len(), 1);
        assert!(store.cases()[0].case_number.is_empty());
    }

    #[test]
    fn test_delete_case_is_idempotent() {
        let mut store = open_store();
        add_case(&mut store, "C-1", "Acme");

        assert!(store.delete_case(0).unwrap());
        // Second delete at the same index: collection unchanged.
        assert!(!store.delete_case(0).unwrap());
        assert!(store.cases().is_empty());
    }

    #[test]
    fn test_session_lifecycle_scenario() {
        let mut store = open_store();
        add_case(&mut store, "C-1", "Acme");
        assert_eq!(store.cases().len(), 1);

        let session_pos = store.add_session(0).unwrap().unwrap();
        assert_eq!(session_pos, 0);
        let session = &store.cases()[0].huddle_sessions[0];
        assert_eq!(session.current_status, SessionStatus::Open);
        assert_eq!(session.duration, 0);

        let mut edited = session.clone();
        edited.current_status = SessionStatus::Resolved;
        edited.duration = 5;
        assert!(store.update_session(0, 0, edited).unwrap());
        assert_eq!(
            store.cases()[0].huddle_sessions[0].current_status,
            SessionStatus::Resolved
        );
        assert_eq!(store.cases()[0].huddle_sessions[0].duration, 5);

        assert!(store.delete_case(0).unwrap());
        assert!(store.cases().is_empty());
    }

    #[test]
    fn test_delete_session_is_idempotent() {
        let mut store = open_store();
        add_case(&mut store, "C-1", "Acme");
        store.add_session(0).unwrap();

        assert!(store.delete_session(0, 0).unwrap());
        assert!(!store.delete_session(0, 0).unwrap());
        // Out-of-range case index is a no-op too.
        assert!(!store.delete_session(7, 0).unwrap());
    }

    #[test]
    fn test_add_session_to_missing_case() {
        let mut store = open_store();
        assert_eq!(store.add_session(0).unwrap(), None);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huddle.db");

        {
            let port = SqliteStore::open(&path).unwrap();
            let mut store = CaseStore::open(port).unwrap();
            add_case(&mut store, "C-1", "Acme");
            add_case(&mut store, "C-2", "Globex");
            store.add_session(1).unwrap();
            store.add_product("Billing").unwrap();
            store.add_label("vip").unwrap();
        }

        let port = SqliteStore::open(&path).unwrap();
        let store = CaseStore::open(port).unwrap();
        assert_eq!(store.cases().len(), 2);
        assert_eq!(store.cases()[0].case_number, "C-1");
        assert_eq!(store.cases()[1].session_count(), 1);
        assert_eq!(store.products(), ["Billing"]);
        assert_eq!(store.labels(), ["vip"]);
    }

    #[test]
    fn test_failed_import_leaves_collection_unchanged() {
        let mut store = open_store();
        add_case(&mut store, "C-1", "Acme");

        let bad = "caseNumber,huddleSessions\nC-2,[]\nC-3,\"{not json\"\n";
        assert!(store.import_from_csv(bad).is_err());

        assert_eq!(store.cases().len(), 1);
        assert_eq!(store.cases()[0].case_number, "C-1");
    }

    #[test]
    fn test_import_replaces_collection() {
        let mut store = open_store();
        add_case(&mut store, "C-old", "Initech");

        let text = "caseNumber,customer,huddleSessions\nC-1,Acme,[]\nC-2,Globex,\n";
        let imported = store.import_from_csv(text).unwrap();
        assert_eq!(imported, 2);
        assert_eq!(store.cases().len(), 2);
        assert_eq!(store.cases()[0].case_number, "C-1");
    }

    #[test]
    fn test_vocabularies_are_sets() {
        let mut store = open_store();
        assert!(store.add_product("Billing").unwrap());
        assert!(!store.add_product("Billing").unwrap());
        assert_eq!(store.products().len(), 1);

        assert!(store.add_label("vip").unwrap());
        assert!(!store.add_label("vip").unwrap());
    }

    #[test]
    fn test_clear_all_removes_persisted_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huddle.db");

        {
            let port = SqliteStore::open(&path).unwrap();
            let mut store = CaseStore::open(port).unwrap();
            add_case(&mut store, "C-1", "Acme");
            store.add_product("Billing").unwrap();
            store.add_label("vip").unwrap();
            store.clear_all().unwrap();
            assert!(store.cases().is_empty());
        }

        let port = SqliteStore::open(&path).unwrap();
        assert_eq!(port.get(CASES_KEY).unwrap(), None);
        assert_eq!(port.get(PRODUCTS_KEY).unwrap(), None);
        assert_eq!(port.get(LABELS_KEY).unwrap(), None);
    }
}
