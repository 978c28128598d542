//! Planning pipeline.
//!
//! Runs one day's plan end to end: rank subjects, build the free window and
//! its exclusions, allocate sessions, and collect advisories for display.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveTime;
//! use u_studyplan::models::{Grade, Subject};
//! use u_studyplan::planner::{DayPlan, Planner};
//! use u_studyplan::PlannerConfig;
//!
//! let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let day = DayPlan::after_school(t(7, 0), t(17, 0), t(22, 0)).with_dinner(t(19, 0), t(19, 45));
//! let subjects = vec![
//!     Subject::graded("Math", Grade::E8, 2),
//!     Subject::graded("English", Grade::B3, 4),
//! ];
//!
//! let outcome = Planner::new(PlannerConfig::default()).plan(&day, &subjects).unwrap();
//! assert_eq!(outcome.report[0].name(), "Math");
//! assert_eq!(outcome.table()[0].start_label, "17:00");
//! ```

mod day;
mod intake;

pub use day::{ClockRange, DayPlan};
pub use intake::{intake_subjects, SubjectInput};

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{PersistenceError, PlanResult};
use crate::models::{RankedSubject, ScheduleResult, ScheduleStatus, Subject};
use crate::persistence::{PersistencePayload, ReportSink};
use crate::scheduler::{AllocationRequest, ScheduleSummary, SlotAllocator};
use crate::scoring::PriorityScorer;

/// Informational notes for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Bedtime is later than the healthy bedtime.
    LateSleep { bedtime: String, healthy: String },
    /// Inputs were valid but no session fit.
    NothingScheduled { reason: String },
}

impl Advisory {
    /// Text suitable for an info banner.
    pub fn message(&self) -> String {
        match self {
            Advisory::LateSleep { bedtime, healthy } => format!(
                "Your sleep time ({bedtime}) is quite late. Consistent sleep before {healthy} \
                 supports learning and wellbeing."
            ),
            Advisory::NothingScheduled { reason } => {
                format!("No study sessions could be scheduled: {reason}.")
            }
        }
    }
}

/// One display row of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    /// Subject studied.
    pub subject: String,
    /// Start time (`HH:MM`).
    pub start_label: String,
    /// End time (`HH:MM`).
    pub end_label: String,
}

/// Everything one planning run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Subjects ranked by descending urgency.
    pub report: Vec<RankedSubject>,
    /// Allocated sessions.
    pub schedule: ScheduleResult,
    /// Time metrics for the schedule.
    pub summary: ScheduleSummary,
    /// Notes to show alongside the schedule.
    pub advisories: Vec<Advisory>,
}

impl PlanOutcome {
    /// Schedule as `{subject, start, end}` display rows.
    pub fn table(&self) -> Vec<SessionRow> {
        self.schedule
            .sessions
            .iter()
            .map(|s| SessionRow {
                subject: s.subject_name.clone(),
                start_label: s.start_label(),
                end_label: s.end_label(),
            })
            .collect()
    }

    /// Whether any session was placed.
    pub fn has_sessions(&self) -> bool {
        !self.schedule.is_empty()
    }
}

/// Scorer → allocator pipeline.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    scorer: PriorityScorer,
    allocator: SlotAllocator,
}

impl Planner {
    /// Creates a planner from a configuration.
    pub fn new(config: PlannerConfig) -> Self {
        let scorer = PriorityScorer::new(config.scoring).with_limits(config.limits);
        let allocator = SlotAllocator::new(config.session_minutes, config.allocation);
        Self {
            config,
            scorer,
            allocator,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs one planning pass.
    ///
    /// # Errors
    /// - `InvalidInput` if any subject is invalid (nothing is scored).
    /// - `InvalidWindow` if the session length is out of bounds or a
    ///   period has equal start and end times (nothing is allocated).
    pub fn plan(&self, day: &DayPlan, subjects: &[Subject]) -> PlanResult<PlanOutcome> {
        self.config.validate()?;
        let report = self.scorer.rank(subjects)?;

        let window = day.window()?;
        let exclusions = day.exclusions(self.config.meal_minutes)?;
        let request = AllocationRequest::new(
            window,
            report.iter().map(|r| r.subject.clone()).collect(),
        )
        .with_exclusions(exclusions);

        let schedule = self.allocator.allocate(&request)?;
        let summary = ScheduleSummary::calculate(&schedule, &request);

        let mut advisories = Vec::new();
        if day.sleeps_late(self.config.healthy_bedtime) {
            let bedtime = day.effective_bedtime();
            warn!("late bedtime {}", bedtime.format("%H:%M"));
            advisories.push(Advisory::LateSleep {
                bedtime: bedtime.format("%H:%M").to_string(),
                healthy: self.config.healthy_bedtime.format("%H:%M").to_string(),
            });
        }
        if let ScheduleStatus::NothingScheduled(reason) = &schedule.status {
            advisories.push(Advisory::NothingScheduled {
                reason: reason.clone(),
            });
        }

        info!(
            "planned {} subjects into {} sessions ({} of {} free minutes)",
            report.len(),
            summary.session_count,
            summary.study_minutes,
            summary.free_minutes
        );

        Ok(PlanOutcome {
            report,
            schedule,
            summary,
            advisories,
        })
    }

    /// Hands a finished outcome to a report sink.
    ///
    /// The outcome is only read; a sink failure leaves it intact.
    ///
    /// # Errors
    /// `NotReady` if the sink is not ready, or the sink's own failure.
    pub fn persist(
        &self,
        outcome: &PlanOutcome,
        date: NaiveDate,
        sink: &mut dyn ReportSink,
    ) -> Result<(), PersistenceError> {
        if !sink.is_ready() {
            warn!("report sink not ready, skipping save");
            return Err(PersistenceError::NotReady(
                "sink was not initialized".to_string(),
            ));
        }
        let payload = PersistencePayload::from_outcome(outcome, date);
        sink.append(&payload).map_err(|e| {
            warn!("failed to save plan for {date}: {e}");
            e
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::models::Grade;
    use crate::persistence::MemorySink;
    use crate::scheduler::AllocationMode;
    use crate::scoring::ScoringStrategy;
    use crate::validation::ValidationErrorKind;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn subjects() -> Vec<Subject> {
        vec![
            Subject::graded("English", Grade::B3, 4),
            Subject::graded("Math", Grade::F9, 1),
            Subject::graded("Science", Grade::C6, 3).with_tuition(true),
        ]
    }

    #[test]
    fn test_plan_after_school_with_dinner() {
        let day =
            DayPlan::after_school(t(7, 0), t(17, 0), t(22, 0)).with_dinner(t(19, 0), t(19, 45));
        let planner = Planner::new(PlannerConfig::default().with_session_minutes(45));
        let outcome = planner.plan(&day, &subjects()).unwrap();

        let names: Vec<&str> = outcome.report.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Math", "Science", "English"]);

        let table = outcome.table();
        assert_eq!(table[0].subject, "Math");
        assert_eq!(table[0].start_label, "17:00");
        // 17:00, 17:45, then [18:30, 19:15) hits dinner → 19:45
        assert_eq!(table[2].start_label, "19:45");
        assert!(outcome.advisories.is_empty());
        assert!(outcome.has_sessions());
    }

    #[test]
    fn test_plan_late_sleep_advisory() {
        let day = DayPlan::after_school(t(7, 0), t(17, 0), t(0, 30));
        let outcome = Planner::default().plan(&day, &subjects()).unwrap();
        assert!(matches!(outcome.advisories[0], Advisory::LateSleep { .. }));
        assert!(outcome.advisories[0].message().contains("00:30"));
        assert_eq!(outcome.table().last().unwrap().end_label, "00:00");
    }

    #[test]
    fn test_plan_late_free_period_advisory() {
        let day = DayPlan::free_period(t(17, 0), t(1, 0));
        let outcome = Planner::default().plan(&day, &subjects()).unwrap();
        match &outcome.advisories[0] {
            Advisory::LateSleep { bedtime, healthy } => {
                assert_eq!(bedtime, "01:00");
                assert_eq!(healthy, "22:30");
            }
            other => panic!("unexpected advisory {other:?}"),
        }
    }

    #[test]
    fn test_plan_equal_times_is_window_error() {
        let day = DayPlan::after_school(t(7, 0), t(17, 0), t(17, 0));
        let err = Planner::default().plan(&day, &subjects()).unwrap_err();
        assert!(matches!(err, PlanError::InvalidWindow(_)));
    }

    #[test]
    fn test_plan_invalid_subject_rejected_first() {
        let day = DayPlan::free_period(t(17, 0), t(17, 0));
        let bad = vec![Subject::graded("Math", Grade::F9, 0)];
        let err = Planner::default().plan(&day, &bad).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::ConfidenceOutOfRange
        );
    }

    #[test]
    fn test_plan_nothing_scheduled_advisory() {
        let day = DayPlan::free_period(t(17, 0), t(17, 30));
        let outcome = Planner::default().plan(&day, &subjects()).unwrap();
        assert!(!outcome.has_sessions());
        assert!(matches!(
            outcome.advisories.last(),
            Some(Advisory::NothingScheduled { .. })
        ));
    }

    #[test]
    fn test_plan_proportional_score_based() {
        let config = PlannerConfig::default()
            .with_scoring(ScoringStrategy::ScoreBased)
            .with_allocation(AllocationMode::Proportional)
            .with_session_minutes(60);
        let subjects = vec![
            Subject::scored("B", 80.0, 4).with_sessions(1),
            Subject::scored("A", 30.0, 2).with_sessions(2),
        ];
        let day = DayPlan::free_period(t(16, 0), t(19, 0));
        let outcome = Planner::new(config).plan(&day, &subjects).unwrap();

        let rows: Vec<(String, String)> = outcome
            .table()
            .into_iter()
            .map(|r| (r.subject, r.start_label))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A".to_string(), "16:00".to_string()),
                ("A".to_string(), "17:00".to_string()),
                ("B".to_string(), "18:00".to_string()),
            ]
        );
        assert!((outcome.summary.utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_plan_session_bounds() {
        let day = DayPlan::free_period(t(16, 0), t(19, 0));
        let planner = Planner::new(PlannerConfig::default().with_session_minutes(10));
        assert!(matches!(
            planner.plan(&day, &subjects()),
            Err(PlanError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_plan_idempotent() {
        let day = DayPlan::free_period(t(8, 0), t(23, 0))
            .with_school(t(8, 0), t(14, 0))
            .with_meal(t(12, 0))
            .with_dinner(t(19, 0), t(19, 45));
        let planner = Planner::default();
        assert_eq!(
            planner.plan(&day, &subjects()).unwrap(),
            planner.plan(&day, &subjects()).unwrap()
        );
    }

    #[test]
    fn test_persist_leaves_outcome_untouched() {
        let day = DayPlan::free_period(t(16, 0), t(19, 0));
        let planner = Planner::default();
        let outcome = planner.plan(&day, &subjects()).unwrap();
        let before = outcome.clone();

        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut sink = MemorySink::new();
        planner.persist(&outcome, date, &mut sink).unwrap();
        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.records()[0].schedule.len(), 3);

        let mut offline = MemorySink::offline();
        let err = planner.persist(&outcome, date, &mut offline).unwrap_err();
        assert!(matches!(err, PersistenceError::NotReady(_)));
        assert_eq!(outcome, before);
    }
}
