//! Subjects, scores and submission records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest accepted score.
pub const MAX_SCORE: u8 = 100;

/// The four subjects, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subject {
    Aai,
    Foml,
    Imad,
    Vcc,
}

impl Subject {
    /// All subjects in canonical order.
    pub const ALL: [Subject; 4] = [Subject::Aai, Subject::Foml, Subject::Imad, Subject::Vcc];

    /// Column/axis label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Aai => "AAI",
            Self::Foml => "FOML",
            Self::Imad => "IMAD",
            Self::Vcc => "VCC",
        }
    }

    /// Parse a label, ignoring case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per subject, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Scores {
    pub aai: u8,
    pub foml: u8,
    pub imad: u8,
    pub vcc: u8,
}

impl Scores {
    /// Build scores, rejecting values above [`MAX_SCORE`].
    pub fn new(aai: u8, foml: u8, imad: u8, vcc: u8) -> CoreResult<Self> {
        let scores = Self {
            aai,
            foml,
            imad,
            vcc,
        };
        scores.validate()?;
        Ok(scores)
    }

    /// Build scores from wider integers read from files or the database.
    pub fn try_from_values(aai: i64, foml: i64, imad: i64, vcc: i64) -> CoreResult<Self> {
        let narrow = |subject: Subject, value: i64| {
            u8::try_from(value)
                .ok()
                .filter(|v| *v <= MAX_SCORE)
                .ok_or_else(|| out_of_range(subject, value))
        };
        Ok(Self {
            aai: narrow(Subject::Aai, aai)?,
            foml: narrow(Subject::Foml, foml)?,
            imad: narrow(Subject::Imad, imad)?,
            vcc: narrow(Subject::Vcc, vcc)?,
        })
    }

    /// Check every value is within range.
    pub fn validate(&self) -> CoreResult<()> {
        for (subject, value) in self.iter() {
            if value > MAX_SCORE {
                return Err(out_of_range(subject, i64::from(value)));
            }
        }
        Ok(())
    }

    /// Value for one subject.
    #[must_use]
    pub fn get(&self, subject: Subject) -> u8 {
        match subject {
            Subject::Aai => self.aai,
            Subject::Foml => self.foml,
            Subject::Imad => self.imad,
            Subject::Vcc => self.vcc,
        }
    }

    /// `(subject, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, u8)> + '_ {
        Subject::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    /// Sum of all four values.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| u32::from(v)).sum()
    }
}

fn out_of_range(subject: Subject, value: i64) -> CoreError {
    CoreError::ValidationError(format!(
        "{subject} must be between 0 and {MAX_SCORE}, got {value}"
    ))
}

/// One user's submitted scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Submitter email
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Marks for the four subjects
    pub scores: Scores,
    /// Submission time
    #[serde(with = "crate::utils::datetime")]
    pub submitted_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Build a record stamped with the current time.
    #[must_use]
    pub fn new(email: String, display_name: String, scores: Scores) -> Self {
        Self {
            email,
            display_name,
            scores,
            submitted_at: Utc::now(),
        }
    }
}
