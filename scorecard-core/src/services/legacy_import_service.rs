//! Legacy file import service
//!
//! Loads the flat files written by the earlier form application:
//! - `users.json`: a JSON object mapping email to hex SHA-256 digest
//! - `marks.csv`: header `name,email,AAI,FOML,IMAD,VCC`, one row per submission
//!
//! Digests are stored as-is, so existing passwords keep working.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::crypto;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ImportFailure, ImportReport, ImportSource, ScoreRecord, Scores, Subject, User};

/// A parsed `marks.csv` row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LegacyMarksRow {
    line: usize,
    name: String,
    email: String,
    scores: Scores,
}

/// Legacy file import service
pub struct LegacyImportService {
    ctx: Arc<ServiceContext>,
}

impl LegacyImportService {
    /// Create an import service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Import users and, optionally, marks.
    ///
    /// Entries that already exist are skipped. Malformed entries and marks
    /// for emails without credentials are reported in
    /// `ImportReport::failures`. A file that cannot be parsed at all fails
    /// the whole import before anything is written.
    pub async fn import(
        &self,
        users_json: &str,
        marks_csv: Option<&str>,
    ) -> CoreResult<ImportReport> {
        let users = parse_users(users_json)?;
        let (rows, row_failures) = match marks_csv {
            Some(content) => parse_marks(content)?,
            None => (Vec::new(), Vec::new()),
        };

        let mut report = ImportReport::default();

        for (email, digest) in users {
            if !crypto::is_valid_digest(&digest) {
                report.failures.push(ImportFailure {
                    source: ImportSource::Users,
                    key: email,
                    reason: "password digest is not a hex SHA-256".to_string(),
                });
                continue;
            }

            let user = User::new(email.clone(), digest.to_ascii_lowercase());
            match self.ctx.credential_store().insert(&user).await {
                Ok(()) => report.users_imported += 1,
                Err(CoreError::AlreadyRegistered(_)) => {
                    log::debug!("Skipping existing user: {email}");
                    report.users_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        report.failures.extend(row_failures);

        for row in latest_per_email(rows) {
            if !self.ctx.credential_store().contains(&row.email).await? {
                report.failures.push(ImportFailure {
                    source: ImportSource::Marks,
                    key: row.email,
                    reason: "no registered user with this email".to_string(),
                });
                continue;
            }
            let record = ScoreRecord::new(row.email.clone(), row.name, row.scores);
            match self.ctx.submission_store().append(&record).await {
                Ok(()) => report.submissions_imported += 1,
                Err(CoreError::AlreadySubmitted(_)) => {
                    log::debug!("Skipping existing submission: {}", row.email);
                    report.submissions_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Legacy import complete: {} users, {} submissions, {} failures",
            report.users_imported,
            report.submissions_imported,
            report.failures.len()
        );
        Ok(report)
    }
}

/// Parse `users.json` into `(email, digest)` pairs in email order.
fn parse_users(content: &str) -> CoreResult<BTreeMap<String, String>> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(content)
        .map_err(|e| CoreError::ImportError(format!("Invalid users file: {e}")))
}

/// Parse `marks.csv`.
///
/// Returns the valid rows plus one failure per row that could not be used.
fn parse_marks(content: &str) -> CoreResult<(Vec<LegacyMarksRow>, Vec<ImportFailure>)> {
    let mut records = csv_records(content).into_iter();

    let Some((_, header)) = records.next() else {
        return Ok((Vec::new(), Vec::new()));
    };
    let columns = ColumnIndex::from_header(&header)?;

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for (line_no, fields) in records {
        match columns.row(line_no, &fields) {
            Ok(row) => rows.push(row),
            Err(reason) => failures.push(ImportFailure {
                source: ImportSource::Marks,
                key: columns
                    .field(&fields, columns.email)
                    .filter(|e| !e.is_empty())
                    .map_or_else(|| format!("line {line_no}"), str::to_string),
                reason,
            }),
        }
    }
    Ok((rows, failures))
}

/// Keep only the last row per email, ordered by line.
fn latest_per_email(rows: Vec<LegacyMarksRow>) -> Vec<LegacyMarksRow> {
    let mut latest: HashMap<String, LegacyMarksRow> = HashMap::new();
    for row in rows {
        latest.insert(row.email.clone(), row);
    }
    let mut rows: Vec<_> = latest.into_values().collect();
    rows.sort_by_key(|r| r.line);
    rows
}

/// Positions of the known columns in `marks.csv`.
struct ColumnIndex {
    name: usize,
    email: usize,
    subjects: [usize; 4],
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> CoreResult<Self> {
        let find = |label: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(label))
                .ok_or_else(|| CoreError::ImportError(format!("Marks file has no '{label}' column")))
        };
        Ok(Self {
            name: find("name")?,
            email: find("email")?,
            subjects: [
                find(Subject::Aai.label())?,
                find(Subject::Foml.label())?,
                find(Subject::Imad.label())?,
                find(Subject::Vcc.label())?,
            ],
        })
    }

    fn field<'a>(&self, fields: &'a [String], index: usize) -> Option<&'a str> {
        fields.get(index).map(|f| f.trim())
    }

    fn row(&self, line: usize, fields: &[String]) -> Result<LegacyMarksRow, String> {
        let email = self
            .field(fields, self.email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| "missing email".to_string())?;
        let name = self
            .field(fields, self.name)
            .filter(|n| !n.is_empty())
            .unwrap_or(email);

        let mut values = [0i64; 4];
        for (slot, (subject, index)) in values
            .iter_mut()
            .zip(Subject::ALL.into_iter().zip(self.subjects))
        {
            let raw = self
                .field(fields, index)
                .ok_or_else(|| format!("missing {subject}"))?;
            *slot = parse_mark(raw).ok_or_else(|| format!("{subject} is not a whole number: {raw}"))?;
        }

        let scores = Scores::try_from_values(values[0], values[1], values[2], values[3])
            .map_err(|e| e.to_string())?;

        Ok(LegacyMarksRow {
            line,
            name: name.to_string(),
            email: email.to_string(),
            scores,
        })
    }
}

/// Parse a mark written either as `80` or `80.0`.
#[allow(clippy::cast_possible_truncation)]
fn parse_mark(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.fract().abs() < f64::EPSILON && (-1.0..=1000.0).contains(&v)).then_some(v as i64)
}

/// Split CSV content into records tagged with the line each starts on.
///
/// Double-quoted fields may hold commas, `""` escapes and line breaks.
/// Records whose fields are all blank are dropped.
fn csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, start, std::mem::take(&mut fields));
                line += 1;
                start = line;
            }
            '\n' => {
                current.push(c);
                line += 1;
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        push_record(&mut records, start, fields);
    }
    records
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    if fields.iter().any(|f| !f.trim().is_empty()) {
        records.push((line, fields));
    }
}
