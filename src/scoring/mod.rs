//! Urgency scoring and priority ranking.
//!
//! Two formulas are available, selected by [`ScoringStrategy`]:
//!
//! | Strategy | Formula |
//! |----------|---------|
//! | `grade_based` | `round((0.6·grade + 0.4·(5−conf)/4) · (0.85 if tuition), 3)` |
//! | `score_based` | `(1 − mark/100) · (6 − conf) · (1 − 0.3 if tuition)` |
//!
//! # Score Convention
//! **Higher score = more urgent.** This is the reverse of the lower-first
//! convention used by dispatching rules; the ranking sorts descending.
//!
//! # Usage
//!
//! ```
//! use u_studyplan::models::{Grade, Subject};
//! use u_studyplan::scoring::{PriorityScorer, ScoringStrategy};
//!
//! let scorer = PriorityScorer::new(ScoringStrategy::GradeBased);
//! let ranked = scorer
//!     .rank(&[
//!         Subject::graded("English", Grade::A2, 4),
//!         Subject::graded("Math", Grade::F9, 1),
//!     ])
//!     .unwrap();
//! assert_eq!(ranked[0].name(), "Math");
//! ```

mod rules;
mod scorer;

pub use rules::{GradeUrgency, ScoreUrgency, TUITION_DISCOUNT, TUITION_FACTOR};
pub use scorer::PriorityScorer;

use crate::models::Subject;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Urgency score (higher = revise first).
pub type UrgencyScore = f64;

/// A formula turning a subject into an urgency score.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "GRADE").
    fn name(&self) -> &'static str;

    /// Scores a subject.
    ///
    /// Returns `None` when the subject's performance is not the kind this
    /// rule reads. Inputs are assumed validated.
    fn evaluate(&self, subject: &Subject) -> Option<UrgencyScore>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Which urgency formula a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Grade band and confidence, discounted 15% for tuition, rounded.
    #[default]
    GradeBased,
    /// Numeric mark and confidence, discounted 30% for tuition.
    ScoreBased,
}

impl ScoringStrategy {
    /// The rule implementing this strategy.
    pub fn rule(self) -> &'static dyn ScoringRule {
        match self {
            ScoringStrategy::GradeBased => &GradeUrgency,
            ScoringStrategy::ScoreBased => &ScoreUrgency,
        }
    }
}
