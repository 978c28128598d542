//! Built-in urgency formulas.
//!
//! Both formulas rise as performance or confidence falls, and both apply
//! tuition as a flat multiplicative discount rather than a reordering.

use super::{ScoringRule, UrgencyScore};
use crate::models::{GradeOrScore, Subject};

/// Multiplier applied by the grade formula when tuition is present.
pub const TUITION_DISCOUNT: f64 = 0.85;

/// Fraction removed by the score formula when tuition is present.
pub const TUITION_FACTOR: f64 = 0.3;

const GRADE_WEIGHT: f64 = 0.6;
const CONFIDENCE_WEIGHT: f64 = 0.4;

/// Grade-band urgency.
///
/// `base = 0.6 · grade_urgency + 0.4 · (5 − confidence) / 4`, multiplied by
/// 0.85 with tuition and rounded to three decimals.
#[derive(Debug, Clone, Copy)]
pub struct GradeUrgency;

impl ScoringRule for GradeUrgency {
    fn name(&self) -> &'static str {
        "GRADE"
    }

    fn evaluate(&self, subject: &Subject) -> Option<UrgencyScore> {
        let grade = match subject.performance {
            GradeOrScore::Grade(g) => g,
            GradeOrScore::Score(_) => return None,
        };
        let confidence_urgency = (5 - subject.confidence) as f64 / 4.0;
        let base = GRADE_WEIGHT * grade.urgency() + CONFIDENCE_WEIGHT * confidence_urgency;
        let modifier = if subject.has_tuition {
            TUITION_DISCOUNT
        } else {
            1.0
        };
        Some(round3(base * modifier))
    }

    fn description(&self) -> &'static str {
        "Weighted grade band and confidence urgency"
    }
}

/// Numeric-mark urgency.
///
/// `(1 − mark/100) · (6 − confidence) · (1 − tuition_factor)`, unrounded.
#[derive(Debug, Clone, Copy)]
pub struct ScoreUrgency;

impl ScoringRule for ScoreUrgency {
    fn name(&self) -> &'static str {
        "SCORE"
    }

    fn evaluate(&self, subject: &Subject) -> Option<UrgencyScore> {
        let mark = match subject.performance {
            GradeOrScore::Score(s) => s,
            GradeOrScore::Grade(_) => return None,
        };
        let tuition_factor = if subject.has_tuition {
            TUITION_FACTOR
        } else {
            0.0
        };
        Some((1.0 - mark / 100.0) * (6 - subject.confidence) as f64 * (1.0 - tuition_factor))
    }

    fn description(&self) -> &'static str {
        "Mark shortfall scaled by low confidence"
    }
}

/// Rounds half away from zero to three decimals.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
