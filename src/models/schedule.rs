//! Schedule (result) model.
//!
//! A schedule result is the ordered list of study sessions produced by
//! one allocation run, plus the subjects that could not be fully served.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::calendar::{at_anchor, clock_label};

/// One study session for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAssignment {
    /// Subject studied in this session.
    pub subject_name: String,
    /// Start (minutes from anchor midnight).
    pub start_min: i64,
    /// End (minutes from anchor midnight, exclusive).
    pub end_min: i64,
}

impl SessionAssignment {
    /// Creates a new assignment.
    pub fn new(subject_name: impl Into<String>, start_min: i64, end_min: i64) -> Self {
        Self {
            subject_name: subject_name.into(),
            start_min,
            end_min,
        }
    }

    /// Session length (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Start label (`HH:MM`).
    pub fn start_label(&self) -> String {
        clock_label(self.start_min)
    }

    /// End label (`HH:MM`).
    pub fn end_label(&self) -> String {
        clock_label(self.end_min)
    }

    /// Start as a timestamp on the given anchor date.
    pub fn start_at(&self, anchor: NaiveDate) -> NaiveDateTime {
        at_anchor(anchor, self.start_min)
    }

    /// End as a timestamp on the given anchor date.
    pub fn end_at(&self, anchor: NaiveDate) -> NaiveDateTime {
        at_anchor(anchor, self.end_min)
    }
}

/// Outcome of an allocation that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// At least one session was placed.
    Scheduled,
    /// Inputs were valid but no session fit. Informational, not an error.
    NothingScheduled(String),
}

/// A subject that received fewer sessions than it asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledSubject {
    /// Subject name.
    pub subject_name: String,
    /// Sessions that could not be placed.
    pub missing_sessions: u32,
}

/// Ordered sessions produced by one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Sessions, ascending by start time.
    pub sessions: Vec<SessionAssignment>,
    /// Whether anything was scheduled.
    pub status: ScheduleStatus,
    /// Subjects left short of sessions.
    pub unscheduled: Vec<UnscheduledSubject>,
}

impl ScheduleResult {
    /// Wraps a session list, deriving the status from it.
    pub fn from_sessions(sessions: Vec<SessionAssignment>) -> Self {
        let status = if sessions.is_empty() {
            ScheduleStatus::NothingScheduled(
                "no study sessions could be scheduled within the available time".to_string(),
            )
        } else {
            ScheduleStatus::Scheduled
        };
        Self {
            sessions,
            status,
            unscheduled: Vec::new(),
        }
    }

    /// Records a subject left short.
    pub fn add_unscheduled(&mut self, subject_name: impl Into<String>, missing_sessions: u32) {
        self.unscheduled.push(UnscheduledSubject {
            subject_name: subject_name.into(),
            missing_sessions,
        });
    }

    /// Whether nothing could be scheduled.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Total scheduled time (minutes).
    pub fn total_minutes(&self) -> i64 {
        self.sessions.iter().map(|s| s.duration_min()).sum()
    }

    /// Sessions for one subject.
    pub fn sessions_for(&self, subject_name: &str) -> Vec<&SessionAssignment> {
        self.sessions
            .iter()
            .filter(|s| s.subject_name == subject_name)
            .collect()
    }

    /// Session count per subject name.
    pub fn counts_by_subject(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for s in &self.sessions {
            *counts.entry(s.subject_name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// End of the last session (minutes), if any.
    pub fn finish_min(&self) -> Option<i64> {
        self.sessions.iter().map(|s| s.end_min).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScheduleResult {
        ScheduleResult::from_sessions(vec![
            SessionAssignment::new("Math", 930, 990),
            SessionAssignment::new("English", 990, 1050),
            SessionAssignment::new("Math", 1050, 1110),
        ])
    }

    #[test]
    fn test_result_counts() {
        let r = sample_result();
        assert_eq!(r.status, ScheduleStatus::Scheduled);
        assert_eq!(r.session_count(), 3);
        assert_eq!(r.total_minutes(), 180);
        assert_eq!(r.sessions_for("Math").len(), 2);
        assert_eq!(r.counts_by_subject()["English"], 1);
        assert_eq!(r.finish_min(), Some(1110));
    }

    #[test]
    fn test_empty_result_is_informational() {
        let r = ScheduleResult::from_sessions(Vec::new());
        assert!(r.is_empty());
        assert!(matches!(r.status, ScheduleStatus::NothingScheduled(_)));
        assert_eq!(r.finish_min(), None);
    }

    #[test]
    fn test_assignment_labels() {
        let a = SessionAssignment::new("Math", 23 * 60 + 30, 24 * 60 + 30);
        assert_eq!(a.duration_min(), 60);
        assert_eq!(a.start_label(), "23:30");
        assert_eq!(a.end_label(), "00:30");

        let anchor = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(a.end_at(anchor).date(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(a.start_at(anchor).date(), anchor);
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&ScheduleStatus::Scheduled).unwrap();
        assert_eq!(json, r#"{"status":"scheduled"}"#);
        let empty = ScheduleStatus::NothingScheduled("none".into());
        let json = serde_json::to_string(&empty).unwrap();
        assert_eq!(json, r#"{"status":"nothing_scheduled","reason":"none"}"#);
    }

    #[test]
    fn test_unscheduled() {
        let mut r = sample_result();
        r.add_unscheduled("History", 2);
        assert_eq!(r.unscheduled[0].subject_name, "History");
        assert_eq!(r.unscheduled[0].missing_sessions, 2);
    }
}
