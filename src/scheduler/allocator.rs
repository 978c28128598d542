//! Exclusion-aware greedy slot allocator.
//!
//! # Overlap Test
//! Slot `[s, e)` and excluded period `[x, y)` collide iff `s < y && x < e`.
//! The same test decides cursor jumps (round-robin) and candidate validity
//! (proportional).
//!
//! # Complexity
//! O(k · x) where k = slots in the window, x = excluded periods.

use log::{debug, info};

use super::AllocationMode;
use crate::error::{PlanError, PlanResult};
use crate::models::{ScheduleResult, ScheduleStatus, SessionAssignment, Subject, TimeWindow};

/// Input container for allocation.
#[derive(Debug, Clone)]
pub struct AllocationRequest {
    /// Free window (already midnight-normalized).
    pub window: TimeWindow,
    /// Periods in which no session may be placed.
    pub exclusions: Vec<TimeWindow>,
    /// Subjects in priority order.
    pub subjects: Vec<Subject>,
}

impl AllocationRequest {
    /// Creates a request with no excluded periods.
    pub fn new(window: TimeWindow, subjects: Vec<Subject>) -> Self {
        Self {
            window,
            exclusions: Vec::new(),
            subjects,
        }
    }

    /// Adds an excluded period.
    pub fn with_exclusion(mut self, exclusion: TimeWindow) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    /// Sets all excluded periods.
    pub fn with_exclusions(mut self, exclusions: Vec<TimeWindow>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Whether a slot collides with any excluded period.
    pub fn is_excluded(&self, slot: &TimeWindow) -> bool {
        self.exclusions.iter().any(|e| slot.overlaps(e))
    }
}

/// Greedy slot allocator.
///
/// # Example
///
/// ```
/// use u_studyplan::models::{Grade, Subject, TimeWindow};
/// use u_studyplan::scheduler::{AllocationMode, AllocationRequest, SlotAllocator};
///
/// let window = TimeWindow::new(15 * 60 + 30, 22 * 60);
/// let request = AllocationRequest::new(window, vec![Subject::graded("Math", Grade::C5, 2)]);
///
/// let allocator = SlotAllocator::new(60, AllocationMode::RoundRobin);
/// let result = allocator.allocate(&request).unwrap();
/// assert_eq!(result.session_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    session_minutes: i64,
    mode: AllocationMode,
}

impl SlotAllocator {
    /// Creates an allocator.
    pub fn new(session_minutes: i64, mode: AllocationMode) -> Self {
        Self {
            session_minutes,
            mode,
        }
    }

    /// Session length (minutes).
    pub fn session_minutes(&self) -> i64 {
        self.session_minutes
    }

    /// Allocation policy.
    pub fn mode(&self) -> AllocationMode {
        self.mode
    }

    /// Allocates sessions for a request.
    ///
    /// An empty result (status `NothingScheduled`) is returned when inputs
    /// are valid but nothing fits.
    ///
    /// # Errors
    /// `InvalidWindow` if the window is empty or inverted, or the session
    /// length is not positive. Checked before any slot is considered.
    pub fn allocate(&self, request: &AllocationRequest) -> PlanResult<ScheduleResult> {
        self.check(request)?;

        let exclusions: Vec<TimeWindow> = request
            .exclusions
            .iter()
            .copied()
            .filter(TimeWindow::is_valid)
            .collect();
        let request = AllocationRequest {
            window: request.window,
            exclusions,
            subjects: request.subjects.clone(),
        };

        // Counts are per input position: subjects may share a name.
        let mut received = vec![0u32; request.subjects.len()];
        let sessions = match self.mode {
            AllocationMode::RoundRobin => self.round_robin(&request, &mut received),
            AllocationMode::Proportional => self.proportional(&request, &mut received),
        };

        let mut result = ScheduleResult::from_sessions(sessions);
        for (subject, &received) in request.subjects.iter().zip(&received) {
            let wanted = subject.requested_sessions.max(1);
            if received < wanted {
                result.add_unscheduled(&subject.name, wanted - received);
            }
        }

        if result.is_empty() {
            let reason = self.empty_reason(&request);
            info!("nothing scheduled: {reason}");
            result.status = ScheduleStatus::NothingScheduled(reason);
        } else {
            info!(
                "{:?} allocation placed {} sessions of {} min between {} and {}",
                self.mode,
                result.session_count(),
                self.session_minutes,
                request.window.start_label(),
                request.window.end_label()
            );
        }
        Ok(result)
    }

    fn check(&self, request: &AllocationRequest) -> PlanResult<()> {
        if self.session_minutes <= 0 {
            return Err(PlanError::window(format!(
                "session duration must be positive, got {} minutes",
                self.session_minutes
            )));
        }
        if !request.window.is_valid() {
            return Err(PlanError::window(format!(
                "free window {} to {} ends before it starts",
                request.window.start_label(),
                request.window.end_label()
            )));
        }
        Ok(())
    }

    /// Cycles subjects one slot at a time, jumping over excluded periods.
    fn round_robin(
        &self,
        request: &AllocationRequest,
        received: &mut [u32],
    ) -> Vec<SessionAssignment> {
        let mut sessions = Vec::new();
        if request.subjects.is_empty() {
            return sessions;
        }

        let d = self.session_minutes;
        let mut cursor = request.window.start_min;
        let mut next = 0usize;

        while cursor + d <= request.window.end_min {
            let slot = TimeWindow::new(cursor, cursor + d);

            // Resume after the latest-ending period the slot collides with.
            let blocked_until = request
                .exclusions
                .iter()
                .filter(|e| slot.overlaps(e))
                .map(|e| e.end_min)
                .max();
            if let Some(resume) = blocked_until {
                debug!(
                    "slot {}-{} excluded, resuming at {}",
                    slot.start_label(),
                    slot.end_label(),
                    crate::models::clock_label(resume)
                );
                cursor = resume;
                continue;
            }

            let index = next % request.subjects.len();
            let subject = &request.subjects[index];
            debug!(
                "slot {}-{} -> '{}'",
                slot.start_label(),
                slot.end_label(),
                subject.name
            );
            sessions.push(SessionAssignment::new(&subject.name, slot.start_min, slot.end_min));
            received[index] += 1;
            next += 1;
            cursor += d;
        }
        sessions
    }

    /// Enumerates free grid slots, then grants each subject its requested count.
    fn proportional(
        &self,
        request: &AllocationRequest,
        received: &mut [u32],
    ) -> Vec<SessionAssignment> {
        let candidates = self.candidate_slots(request);
        debug!("{} candidate slots", candidates.len());

        let mut free = candidates.into_iter();
        let mut sessions = Vec::new();
        'subjects: for (index, subject) in request.subjects.iter().enumerate() {
            for _ in 0..subject.requested_sessions {
                match free.next() {
                    Some(slot) => {
                        sessions.push(SessionAssignment::new(
                            &subject.name,
                            slot.start_min,
                            slot.end_min,
                        ));
                        received[index] += 1;
                    }
                    None => break 'subjects,
                }
            }
        }
        sessions
    }

    /// Free slots on the session grid, ascending by start.
    ///
    /// The grid starts at the window start and steps by the session length.
    pub fn candidate_slots(&self, request: &AllocationRequest) -> Vec<TimeWindow> {
        let d = self.session_minutes;
        if d <= 0 {
            return Vec::new();
        }
        let mut slots = Vec::new();
        let mut start = request.window.start_min;
        while start + d <= request.window.end_min {
            let slot = TimeWindow::new(start, start + d);
            if !request.is_excluded(&slot) {
                slots.push(slot);
            }
            start += d;
        }
        slots
    }

    fn empty_reason(&self, request: &AllocationRequest) -> String {
        if request.subjects.is_empty() {
            "no subjects to schedule".to_string()
        } else if request.window.duration_min() < self.session_minutes {
            format!(
                "free time of {} minutes is shorter than one {}-minute session",
                request.window.duration_min(),
                self.session_minutes
            )
        } else {
            "every study slot overlaps an excluded period".to_string()
        }
    }
}
