//! Input validation for planning runs.
//!
//! Checks every subject before any score is computed, so a run either
//! scores all subjects or none. Detects:
//! - Missing subjects, or more subjects than allowed
//! - Blank names
//! - Confidence outside 1..=5
//! - Marks outside 0..=100 (or not finite)
//! - Performance kind not usable by the chosen formula
//! - Requested session counts out of range

use serde::{Deserialize, Serialize};

use crate::config::SubjectLimits;
use crate::models::{GradeOrScore, Subject};
use crate::scoring::ScoringStrategy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Lowest accepted confidence.
pub const MIN_CONFIDENCE: i32 = 1;
/// Highest accepted confidence.
pub const MAX_CONFIDENCE: i32 = 5;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No subject was supplied.
    NoSubjects,
    /// More subjects than the configured limit.
    TooManySubjects,
    /// A subject name is blank.
    BlankName,
    /// A grade label is not one of the nine bands.
    UnknownGrade,
    /// Neither a grade nor a mark was supplied.
    MissingPerformance,
    /// Confidence outside 1..=5.
    ConfidenceOutOfRange,
    /// Mark outside 0..=100.
    ScoreOutOfRange,
    /// Grade given to the mark formula or mark given to the grade formula.
    PerformanceMismatch,
    /// Requested sessions outside the configured range.
    SessionsOutOfRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates subjects for the given scoring strategy.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_subjects(
    subjects: &[Subject],
    strategy: ScoringStrategy,
    limits: &SubjectLimits,
) -> ValidationResult {
    let mut errors = Vec::new();

    if subjects.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoSubjects,
            "Please enter at least one subject",
        ));
    }
    if subjects.len() > limits.max_subjects {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManySubjects,
            format!(
                "{} subjects given, at most {} allowed",
                subjects.len(),
                limits.max_subjects
            ),
        ));
    }

    for (i, subject) in subjects.iter().enumerate() {
        check_subject(i, subject, strategy, limits, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_subject(
    index: usize,
    subject: &Subject,
    strategy: ScoringStrategy,
    limits: &SubjectLimits,
    errors: &mut Vec<ValidationError>,
) {
    let label = if subject.name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::BlankName,
            format!("Subject {} has no name", index + 1),
        ));
        format!("Subject {}", index + 1)
    } else {
        format!("'{}'", subject.name)
    };

    if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&subject.confidence) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ConfidenceOutOfRange,
            format!(
                "{label} confidence {} is outside {MIN_CONFIDENCE}..={MAX_CONFIDENCE}",
                subject.confidence
            ),
        ));
    }

    match (strategy, subject.performance) {
        (ScoringStrategy::ScoreBased, GradeOrScore::Score(score)) => {
            if !score.is_finite() || !(0.0..=100.0).contains(&score) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ScoreOutOfRange,
                    format!("{label} score {score} is outside 0..=100"),
                ));
            }
        }
        (ScoringStrategy::GradeBased, GradeOrScore::Grade(_)) => {}
        (ScoringStrategy::GradeBased, GradeOrScore::Score(_)) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::PerformanceMismatch,
                format!("{label} has a numeric score but grade-based scoring needs a grade"),
            ));
        }
        (ScoringStrategy::ScoreBased, GradeOrScore::Grade(_)) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::PerformanceMismatch,
                format!("{label} has a grade but score-based scoring needs a numeric score"),
            ));
        }
    }

    if subject.requested_sessions < 1 || subject.requested_sessions > limits.max_requested_sessions
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::SessionsOutOfRange,
            format!(
                "{label} requests {} sessions, expected 1..={}",
                subject.requested_sessions, limits.max_requested_sessions
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn limits() -> SubjectLimits {
        SubjectLimits::default()
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_graded() {
        let subjects = vec![
            Subject::graded("Math", Grade::C5, 2),
            Subject::graded("English", Grade::A1, 5).with_tuition(true),
        ];
        assert!(validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits()).is_ok());
    }

    #[test]
    fn test_valid_scored_bounds() {
        let subjects = vec![
            Subject::scored("Math", 0.0, 1),
            Subject::scored("Physics", 100.0, 5),
        ];
        assert!(validate_subjects(&subjects, ScoringStrategy::ScoreBased, &limits()).is_ok());
    }

    #[test]
    fn test_no_subjects() {
        let result = validate_subjects(&[], ScoringStrategy::GradeBased, &limits());
        assert!(has_kind(result, ValidationErrorKind::NoSubjects));
    }

    #[test]
    fn test_too_many_subjects() {
        let subjects: Vec<Subject> = (0..11)
            .map(|i| Subject::graded(format!("S{i}"), Grade::B3, 3))
            .collect();
        let result = validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits());
        assert!(has_kind(result, ValidationErrorKind::TooManySubjects));
    }

    #[test]
    fn test_blank_name() {
        let subjects = vec![Subject::graded("   ", Grade::B3, 3)];
        let result = validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits());
        assert!(has_kind(result, ValidationErrorKind::BlankName));
    }

    #[test]
    fn test_confidence_out_of_range() {
        for confidence in [0, 6, -1] {
            let subjects = vec![Subject::graded("Math", Grade::B3, confidence)];
            let result = validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits());
            assert!(has_kind(result, ValidationErrorKind::ConfidenceOutOfRange));
        }
    }

    #[test]
    fn test_score_out_of_range() {
        for score in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let subjects = vec![Subject::scored("Math", score, 3)];
            let result = validate_subjects(&subjects, ScoringStrategy::ScoreBased, &limits());
            assert!(has_kind(result, ValidationErrorKind::ScoreOutOfRange));
        }
    }

    #[test]
    fn test_performance_mismatch() {
        let graded = vec![Subject::graded("Math", Grade::B3, 3)];
        let result = validate_subjects(&graded, ScoringStrategy::ScoreBased, &limits());
        assert!(has_kind(result, ValidationErrorKind::PerformanceMismatch));

        let scored = vec![Subject::scored("Math", 50.0, 3)];
        let result = validate_subjects(&scored, ScoringStrategy::GradeBased, &limits());
        assert!(has_kind(result, ValidationErrorKind::PerformanceMismatch));
    }

    #[test]
    fn test_sessions_out_of_range() {
        for sessions in [0, 11] {
            let subjects = vec![Subject::graded("Math", Grade::B3, 3).with_sessions(sessions)];
            let result = validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits());
            assert!(has_kind(result, ValidationErrorKind::SessionsOutOfRange));
        }
    }

    #[test]
    fn test_multiple_errors() {
        let subjects = vec![
            Subject::graded("", Grade::B3, 9),
            Subject::scored("Math", 150.0, 3),
        ];
        let errors =
            validate_subjects(&subjects, ScoringStrategy::GradeBased, &limits()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
