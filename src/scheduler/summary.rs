//! Schedule quality metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Study minutes | Sum of session lengths |
//! | Free minutes | Window length minus excluded time inside it |
//! | Utilization | Study minutes / free minutes |
//! | Finish | End of the last session |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::AllocationRequest;
use crate::models::{ScheduleResult, TimeWindow};

/// Summary of one allocation run.
///
/// All time values are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of sessions placed.
    pub session_count: usize,
    /// Total study time.
    pub study_minutes: i64,
    /// Window time not covered by any excluded period.
    pub free_minutes: i64,
    /// Fraction of free time spent studying (0.0..1.0).
    pub utilization: f64,
    /// Study time per subject.
    pub minutes_by_subject: HashMap<String, i64>,
    /// End of the last session, if any.
    pub finish_min: Option<i64>,
}

impl ScheduleSummary {
    /// Computes the summary of a result against the request it answered.
    pub fn calculate(result: &ScheduleResult, request: &AllocationRequest) -> Self {
        let study_minutes = result.total_minutes();
        let free_minutes = free_minutes(&request.window, &request.exclusions);

        let mut minutes_by_subject: HashMap<String, i64> = HashMap::new();
        for s in &result.sessions {
            *minutes_by_subject
                .entry(s.subject_name.clone())
                .or_insert(0) += s.duration_min();
        }

        let utilization = if free_minutes <= 0 {
            0.0
        } else {
            study_minutes as f64 / free_minutes as f64
        };

        Self {
            session_count: result.session_count(),
            study_minutes,
            free_minutes,
            utilization,
            minutes_by_subject,
            finish_min: result.finish_min(),
        }
    }
}

/// Window length minus the union of excluded periods clipped to it.
fn free_minutes(window: &TimeWindow, exclusions: &[TimeWindow]) -> i64 {
    if !window.is_valid() {
        return 0;
    }

    let mut clipped: Vec<(i64, i64)> = exclusions
        .iter()
        .filter(|e| e.overlaps(window))
        .map(|e| {
            (
                e.start_min.max(window.start_min),
                e.end_min.min(window.end_min),
            )
        })
        .filter(|(s, e)| e > s)
        .collect();
    clipped.sort_unstable();

    // Merge overlapping periods so shared time is not subtracted twice.
    let mut blocked = 0;
    let mut current: Option<(i64, i64)> = None;
    for (s, e) in clipped {
        match current {
            Some((cs, ce)) if s <= ce => current = Some((cs, ce.max(e))),
            Some((cs, ce)) => {
                blocked += ce - cs;
                current = Some((s, e));
            }
            None => current = Some((s, e)),
        }
    }
    if let Some((cs, ce)) = current {
        blocked += ce - cs;
    }

    window.duration_min() - blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, SessionAssignment, Subject};

    fn request(exclusions: Vec<TimeWindow>) -> AllocationRequest {
        AllocationRequest::new(
            TimeWindow::new(0, 600),
            vec![Subject::graded("Math", Grade::B3, 3)],
        )
        .with_exclusions(exclusions)
    }

    #[test]
    fn test_summary_basic() {
        let result = ScheduleResult::from_sessions(vec![
            SessionAssignment::new("Math", 0, 60),
            SessionAssignment::new("English", 60, 120),
            SessionAssignment::new("Math", 180, 240),
        ]);
        let summary = ScheduleSummary::calculate(&result, &request(vec![]));

        assert_eq!(summary.session_count, 3);
        assert_eq!(summary.study_minutes, 180);
        assert_eq!(summary.free_minutes, 600);
        assert!((summary.utilization - 0.3).abs() < 1e-10);
        assert_eq!(summary.minutes_by_subject["Math"], 120);
        assert_eq!(summary.finish_min, Some(240));
    }

    #[test]
    fn test_free_minutes_merges_overlaps() {
        let req = request(vec![
            TimeWindow::new(100, 200),
            TimeWindow::new(150, 250), // overlaps previous
            TimeWindow::new(550, 700), // clipped to 600
            TimeWindow::new(800, 900), // outside window
        ]);
        let summary = ScheduleSummary::calculate(&ScheduleResult::from_sessions(vec![]), &req);
        // blocked: 100..250 (150) + 550..600 (50)
        assert_eq!(summary.free_minutes, 400);
    }

    #[test]
    fn test_summary_empty() {
        let req = request(vec![TimeWindow::new(0, 600)]);
        let summary = ScheduleSummary::calculate(&ScheduleResult::from_sessions(vec![]), &req);
        assert_eq!(summary.session_count, 0);
        assert_eq!(summary.free_minutes, 0);
        assert!((summary.utilization - 0.0).abs() < 1e-10);
        assert_eq!(summary.finish_min, None);
    }
}
