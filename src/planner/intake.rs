//! Form row intake.
//!
//! Converts raw form rows into [`Subject`]s. Rows with a blank name are
//! skipped, so an unused row in the form is not an error.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::models::{Grade, GradeOrScore, Subject};
use crate::validation::{ValidationError, ValidationErrorKind};

/// One raw subject row from the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectInput {
    /// Subject name as typed; blank rows are skipped.
    pub name: String,
    /// Grade band label (e.g. `"B3"`).
    pub grade: Option<String>,
    /// Numeric mark, 0–100.
    pub score: Option<f64>,
    /// Confidence, 1 (least) to 5 (most).
    pub confidence: i32,
    /// Whether tuition support is in place.
    pub has_tuition: bool,
    /// Sessions wanted; defaults to 1.
    pub requested_sessions: Option<u32>,
}

impl SubjectInput {
    /// A row with a grade label.
    pub fn graded(name: impl Into<String>, grade: impl Into<String>, confidence: i32) -> Self {
        Self {
            name: name.into(),
            grade: Some(grade.into()),
            confidence,
            ..Self::default()
        }
    }

    /// A row with a numeric mark.
    pub fn scored(name: impl Into<String>, score: f64, confidence: i32) -> Self {
        Self {
            name: name.into(),
            score: Some(score),
            confidence,
            ..Self::default()
        }
    }
}

/// Converts form rows into subjects.
///
/// A grade label wins over a mark when a row carries both. Range checks on
/// confidence and marks are left to the scorer.
///
/// # Errors
/// `InvalidInput` listing every unknown grade label and every row with
/// neither grade nor mark, or `NoSubjects` if every row is blank.
pub fn intake_subjects(rows: &[SubjectInput]) -> PlanResult<Vec<Subject>> {
    let mut subjects = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        let name = row.name.trim();
        if name.is_empty() {
            continue;
        }

        let performance = match (&row.grade, row.score) {
            (Some(label), _) => match label.parse::<Grade>() {
                Ok(grade) => GradeOrScore::Grade(grade),
                Err(message) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownGrade,
                        format!("'{name}': {message}"),
                    ));
                    continue;
                }
            },
            (None, Some(score)) => GradeOrScore::Score(score),
            (None, None) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingPerformance,
                    format!("'{name}' has neither a grade nor a score"),
                ));
                continue;
            }
        };

        subjects.push(
            Subject::new(name, performance, row.confidence)
                .with_tuition(row.has_tuition)
                .with_sessions(row.requested_sessions.unwrap_or(1)),
        );
    }

    if !errors.is_empty() {
        return Err(PlanError::InvalidInput(errors));
    }
    if subjects.is_empty() {
        return Err(PlanError::InvalidInput(vec![ValidationError::new(
            ValidationErrorKind::NoSubjects,
            "Please enter at least one subject",
        )]));
    }
    Ok(subjects)
}
