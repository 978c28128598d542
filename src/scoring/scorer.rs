//! Priority ranking of subjects.
//!
//! Validates the whole batch, scores every subject with the configured
//! formula, then orders by descending urgency. The sort is stable: equal
//! scores keep their input order.

use std::cmp::Ordering;

use log::debug;

use super::{ScoringRule, ScoringStrategy, UrgencyScore};
use crate::config::SubjectLimits;
use crate::error::{PlanError, PlanResult};
use crate::models::{RankedSubject, Subject};
use crate::validation::{validate_subjects, ValidationError, ValidationErrorKind};

/// Scores and ranks subjects.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    strategy: ScoringStrategy,
    limits: SubjectLimits,
}

impl PriorityScorer {
    /// Creates a scorer with default input limits.
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self {
            strategy,
            limits: SubjectLimits::default(),
        }
    }

    /// Sets the input limits.
    pub fn with_limits(mut self, limits: SubjectLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The configured strategy.
    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Scores a single subject.
    ///
    /// # Errors
    /// `InvalidInput` if the subject fails validation.
    pub fn score(&self, subject: &Subject) -> PlanResult<UrgencyScore> {
        validate_subjects(std::slice::from_ref(subject), self.strategy, &self.limits)?;
        self.evaluate(subject)
    }

    /// Scores all subjects and sorts them by descending urgency.
    ///
    /// No score is computed unless every subject is valid.
    ///
    /// # Errors
    /// `InvalidInput` with every validation problem found.
    pub fn rank(&self, subjects: &[Subject]) -> PlanResult<Vec<RankedSubject>> {
        validate_subjects(subjects, self.strategy, &self.limits)?;

        let mut ranked = subjects
            .iter()
            .map(|s| -> PlanResult<RankedSubject> {
                Ok(RankedSubject {
                    subject: s.clone(),
                    score: self.evaluate(s)?,
                })
            })
            .collect::<PlanResult<Vec<_>>>()?;

        // Stable: ties keep input order.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        for (i, r) in ranked.iter().enumerate() {
            debug!(
                "rank {} '{}' {}={:.3}",
                i + 1,
                r.name(),
                self.strategy.rule().name(),
                r.score
            );
        }
        Ok(ranked)
    }

    fn evaluate(&self, subject: &Subject) -> PlanResult<UrgencyScore> {
        let rule = self.strategy.rule();
        rule.evaluate(subject).ok_or_else(|| {
            PlanError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::PerformanceMismatch,
                format!("'{}' cannot be scored by {}", subject.name, rule.name()),
            )])
        })
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new(ScoringStrategy::default())
    }
}
