//! Planner configuration.
//!
//! Selects the scoring formula and allocation policy and carries the
//! input bounds a planning run enforces. Every field has a default, so a
//! partial JSON document (or `{}`) is a valid configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::scheduler::AllocationMode;
use crate::scoring::ScoringStrategy;

/// Bounds on subject input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectLimits {
    /// Maximum number of subjects per run.
    pub max_subjects: usize,
    /// Maximum sessions a single subject may request.
    pub max_requested_sessions: u32,
}

impl Default for SubjectLimits {
    fn default() -> Self {
        Self {
            max_subjects: 10,
            max_requested_sessions: 10,
        }
    }
}

/// Configuration for a [`Planner`](crate::planner::Planner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Urgency formula.
    pub scoring: ScoringStrategy,
    /// Slot allocation policy.
    pub allocation: AllocationMode,
    /// Length of each study session (minutes).
    pub session_minutes: i64,
    /// Shortest session accepted (minutes).
    pub min_session_minutes: i64,
    /// Longest session accepted (minutes).
    pub max_session_minutes: i64,
    /// Length of a meal block placed at a meal time (minutes).
    pub meal_minutes: i64,
    /// Subject input bounds.
    pub limits: SubjectLimits,
    /// Bedtimes later than this raise a late-sleep advisory.
    pub healthy_bedtime: NaiveTime,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringStrategy::default(),
            allocation: AllocationMode::default(),
            session_minutes: 60,
            min_session_minutes: 15,
            max_session_minutes: 180,
            meal_minutes: 30,
            limits: SubjectLimits::default(),
            healthy_bedtime: NaiveTime::from_hms_opt(22, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl PlannerConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the scoring strategy.
    pub fn with_scoring(mut self, scoring: ScoringStrategy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the allocation mode.
    pub fn with_allocation(mut self, allocation: AllocationMode) -> Self {
        self.allocation = allocation;
        self
    }

    /// Sets the session length (minutes).
    pub fn with_session_minutes(mut self, minutes: i64) -> Self {
        self.session_minutes = minutes;
        self
    }

    /// Sets the subject input bounds.
    pub fn with_limits(mut self, limits: SubjectLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks the duration settings.
    ///
    /// # Errors
    /// `InvalidWindow` if the session length is non-positive or outside
    /// `[min_session_minutes, max_session_minutes]`, or the meal block is
    /// non-positive.
    pub fn validate(&self) -> PlanResult<()> {
        if self.session_minutes <= 0 {
            return Err(PlanError::window(format!(
                "session duration must be positive, got {} minutes",
                self.session_minutes
            )));
        }
        if self.session_minutes < self.min_session_minutes
            || self.session_minutes > self.max_session_minutes
        {
            return Err(PlanError::window(format!(
                "session duration {} minutes is outside {}..={}",
                self.session_minutes, self.min_session_minutes, self.max_session_minutes
            )));
        }
        if self.meal_minutes <= 0 {
            return Err(PlanError::window(format!(
                "meal block must be positive, got {} minutes",
                self.meal_minutes
            )));
        }
        Ok(())
    }
}
