//! Cases table projection.
//!
//! A pure view transform over the case collection: substring
//! filtering across every visible field, plus a stable sort on a
//! selected column. Nothing here mutates the underlying store; rows
//! carry the case's store position so row actions address the store,
//! not the view.

use crate::format::format_duration;
use crate::model::Case;

/// Sortable table columns, including the two derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CaseNumber,
    Customer,
    SupportEngineer,
    DateOpened,
    ProductServiceArea,
    IssueType,
    Labels,
    /// Derived: number of huddle sessions.
    SessionCount,
    /// Derived: total session duration in seconds.
    TotalDuration,
}

impl SortKey {
    /// Canonical CLI name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CaseNumber => "case-number",
            Self::Customer => "customer",
            Self::SupportEngineer => "support-engineer",
            Self::DateOpened => "date-opened",
            Self::ProductServiceArea => "product-service-area",
            Self::IssueType => "issue-type",
            Self::Labels => "labels",
            Self::SessionCount => "session-count",
            Self::TotalDuration => "total-duration",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "case-number" => Ok(Self::CaseNumber),
            "customer" => Ok(Self::Customer),
            "support-engineer" => Ok(Self::SupportEngineer),
            "date-opened" => Ok(Self::DateOpened),
            "product-service-area" | "product-area" => Ok(Self::ProductServiceArea),
            "issue-type" => Ok(Self::IssueType),
            "labels" => Ok(Self::Labels),
            "session-count" | "sessions" => Ok(Self::SessionCount),
            "total-duration" | "duration" => Ok(Self::TotalDuration),
            other => Err(format!(
                "unknown sort column '{other}' (try case-number, customer, \
                 support-engineer, date-opened, product-service-area, issue-type, \
                 labels, session-count, total-duration)"
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Local view state: sort column, direction, and filter text.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub filter: String,
}

impl TableState {
    /// Handle a sort request: re-selecting the current column toggles
    /// direction, a different column resets to ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// One projected table row: a case plus its store position.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Position in the underlying store (not the view).
    pub position: usize,
    pub case: &'a Case,
}

impl Row<'_> {
    /// String forms of every visible field, derived fields included,
    /// in column order.
    #[must_use]
    pub fn field_strings(&self) -> Vec<String> {
        vec![
            self.case.case_number.clone(),
            self.case.customer.clone(),
            self.case.support_engineer.clone(),
            self.case.date_opened.clone(),
            self.case.product_service_area.clone(),
            self.case.issue_type.as_str().to_string(),
            self.case.labels.clone(),
            self.case.session_count().to_string(),
            format_duration(self.case.total_duration()),
        ]
    }

    fn matches(&self, filter_lower: &str) -> bool {
        self.field_strings()
            .iter()
            .any(|field| field.to_lowercase().contains(filter_lower))
    }
}

/// Project the case collection through the view state: filter, then
/// a stable sort on the selected column.
#[must_use]
pub fn project<'a>(cases: &'a [Case], state: &TableState) -> Vec<Row<'a>> {
    let filter_lower = state.filter.to_lowercase();

    let mut rows: Vec<Row<'a>> = cases
        .iter()
        .enumerate()
        .map(|(position, case)| Row { position, case })
        .filter(|row| row.matches(&filter_lower))
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare(a.case, b.case, state.sort_key);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    rows
}

/// Native ordering for the selected column: lexicographic for string
/// fields, numeric for the derived fields.
fn compare(a: &Case, b: &Case, key: SortKey) -> std::cmp::Ordering {
    match key {
        SortKey::CaseNumber => a.case_number.cmp(&b.case_number),
        SortKey::Customer => a.customer.cmp(&b.customer),
        SortKey::SupportEngineer => a.support_engineer.cmp(&b.support_engineer),
        SortKey::DateOpened => a.date_opened.cmp(&b.date_opened),
        SortKey::ProductServiceArea => a.product_service_area.cmp(&b.product_service_area),
        SortKey::IssueType => a.issue_type.as_str().cmp(b.issue_type.as_str()),
        SortKey::Labels => a.labels.cmp(&b.labels),
        SortKey::SessionCount => a.session_count().cmp(&b.session_count()),
        SortKey::TotalDuration => a.total_duration().cmp(&b.total_duration()),
    }
}
