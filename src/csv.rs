//! CSV import/export of the case collection.
//!
//! The import format is a header row of camelCase Case field names
//! (`caseNumber, customer, supportEngineer, dateOpened,
//! productServiceArea, issueType, labels`) plus an optional
//! `huddleSessions` column whose cells hold a JSON-encoded array of
//! session objects. A malformed cell aborts the entire import.

use crate::error::{Error, Result};
use crate::model::{Case, HuddleSession};
use crate::validate;

/// One parsed CSV record with the line number it started on (1-based).
type Record = (usize, Vec<String>);

/// Parse CSV text into raw records.
///
/// Handles quoted fields, escaped quotes (`""`), embedded commas and
/// newlines inside quotes, and CRLF line endings.
///
/// # Errors
///
/// Returns `Error::CsvImport` on an unterminated quoted field.
pub fn parse(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::CsvImport {
            line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    // Final record without a trailing newline.
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}

/// Parse CSV text into an ordered sequence of cases.
///
/// Unknown columns are ignored; missing known columns default to
/// empty values. Rows whose fields are all empty are skipped (a
/// trailing newline produces one).
///
/// # Errors
///
/// Returns `Error::CsvImport` if the file has no header row, if an
/// `issueType` cell is unrecognized, or if a `huddleSessions` cell is
/// present, non-empty, and not valid session-array JSON. No partial
/// result is ever returned.
pub fn parse_cases(text: &str) -> Result<Vec<Case>> {
    let records = parse(text)?;
    let mut iter = records.into_iter();

    let Some((_, header)) = iter.next() else {
        return Err(Error::CsvImport {
            line: 1,
            reason: "missing header row".to_string(),
        });
    };

    let column = |name: &str| header.iter().position(|h| h.trim() == name);
    let col_case_number = column("caseNumber");
    let col_customer = column("customer");
    let col_support_engineer = column("supportEngineer");
    let col_date_opened = column("dateOpened");
    let col_product_area = column("productServiceArea");
    let col_issue_type = column("issueType");
    let col_labels = column("labels");
    let col_sessions = column("huddleSessions");

    let mut cases = Vec::new();
    for (line, fields) in iter {
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let cell = |col: Option<usize>| -> String {
            col.and_then(|i| fields.get(i)).cloned().unwrap_or_default()
        };

        let issue_type =
            validate::normalize_issue_type(&cell(col_issue_type)).map_err(|e| Error::CsvImport {
                line,
                reason: e.to_string(),
            })?;

        let sessions_cell = cell(col_sessions);
        let huddle_sessions: Vec<HuddleSession> = if sessions_cell.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&sessions_cell).map_err(|e| Error::CsvImport {
                line,
                reason: format!("invalid huddleSessions JSON: {e}"),
            })?
        };

        cases.push(Case {
            case_number: cell(col_case_number),
            customer: cell(col_customer),
            support_engineer: cell(col_support_engineer),
            date_opened: cell(col_date_opened),
            product_service_area: cell(col_product_area),
            issue_type,
            labels: cell(col_labels),
            huddle_sessions,
        });
    }

    Ok(cases)
}

/// Serialize the case collection back to the import format.
///
/// # Errors
///
/// Returns an error if a session list fails to serialize.
pub fn write_cases(cases: &[Case]) -> Result<String> {
    let mut out = String::from(
        "caseNumber,customer,supportEngineer,dateOpened,productServiceArea,issueType,labels,huddleSessions\n",
    );

    for case in cases {
        let sessions = serde_json::to_string(&case.huddle_sessions)?;
        let row = [
            case.case_number.as_str(),
            case.customer.as_str(),
            case.support_engineer.as_str(),
            case.date_opened.as_str(),
            case.product_service_area.as_str(),
            case.issue_type.as_str(),
            case.labels.as_str(),
            sessions.as_str(),
        ]
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",");
        out.push_str(&row);
        out.push('\n');
    }

    Ok(out)
}

/// Escape a value for CSV output (wrap in quotes if it contains
/// commas, quotes, or newlines).
#[must_use]
pub fn escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueType, SessionStatus};

    #[test]
    fn test_parse_plain_records() {
        let records = parse("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1, vec!["a", "b", "c"]);
        assert_eq!(records[1], (2, vec!["1".into(), "2".into(), "3".into()]));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let records = parse("a,\"x, y\",\"he said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(records[0].1, vec!["a", "x, y", "he said \"hi\""]);
    }

    #[test]
    fn test_parse_newline_inside_quotes() {
        let records = parse("\"line1\nline2\",b\nnext,row\n").unwrap();
        assert_eq!(records[0].1[0], "line1\nline2");
        // The next record's reported line accounts for the embedded newline.
        assert_eq!(records[1].0, 3);
    }

    #[test]
    fn test_parse_crlf_and_missing_trailing_newline() {
        let records = parse("a,b\r\n1,2").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].1, vec!["1", "2"]);
    }

    #[test]
    fn test_unterminated_quote_fails() {
        assert!(matches!(
            parse("a,\"oops\n").unwrap_err(),
            Error::CsvImport { .. }
        ));
    }

    #[test]
    fn test_parse_cases_with_sessions() {
        let sessions = "[{\"date\":\"2024-01-05\",\"currentStatus\":\"Resolved\",\"duration\":90}]";
        let text = format!(
            "caseNumber,customer,supportEngineer,dateOpened,productServiceArea,issueType,labels,huddleSessions\n\
             C-1,Acme,Dana,2024-01-01,Billing,Bug,vip,\"{}\"\n",
            sessions.replace('"', "\"\"")
        );

        let cases = parse_cases(&text).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_number, "C-1");
        assert_eq!(cases[0].issue_type, IssueType::Bug);
        assert_eq!(cases[0].huddle_sessions.len(), 1);
        assert_eq!(
            cases[0].huddle_sessions[0].current_status,
            SessionStatus::Resolved
        );
        assert_eq!(cases[0].huddle_sessions[0].duration, 90);
    }

    #[test]
    fn test_parse_cases_without_sessions_column() {
        let text = "caseNumber,customer\nC-1,Acme\nC-2,Globex\n";
        let cases = parse_cases(text).unwrap();
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|c| c.huddle_sessions.is_empty()));
        assert!(cases.iter().all(|c| c.issue_type == IssueType::Unset));
    }

    #[test]
    fn test_malformed_sessions_cell_aborts() {
        let text = "caseNumber,huddleSessions\nC-1,[]\nC-2,\"{not json\"\n";
        let err = parse_cases(text).unwrap_err();
        match err {
            Error::CsvImport { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("huddleSessions"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_issue_type_aborts() {
        let text = "caseNumber,issueType\nC-1,Catastrophe\n";
        assert!(matches!(
            parse_cases(text).unwrap_err(),
            Error::CsvImport { line: 2, .. }
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut case = Case {
            case_number: "C-1".to_string(),
            customer: "Acme, Inc.".to_string(),
            issue_type: IssueType::FeatureRequest,
            ..Case::default()
        };
        case.huddle_sessions.push(HuddleSession {
            date: "2024-01-05".to_string(),
            current_status: SessionStatus::PendingQa,
            case_overview: "said \"works on my machine\"".to_string(),
            duration: 30,
            ..HuddleSession::default()
        });

        let text = write_cases(std::slice::from_ref(&case)).unwrap();
        let back = parse_cases(&text).unwrap();
        assert_eq!(back, vec![case]);
    }
}
