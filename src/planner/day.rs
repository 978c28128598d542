//! Day plan: the clock times that shape one day's free study window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PlanResult;
use crate::models::TimeWindow;

/// A start/end pair of clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRange {
    /// Start clock time.
    pub start: NaiveTime,
    /// End clock time; earlier than `start` means the next day.
    pub end: NaiveTime,
}

impl ClockRange {
    /// Creates a clock range.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The normalized window for this range.
    pub fn window(&self) -> PlanResult<TimeWindow> {
        TimeWindow::from_clock(self.start, self.end)
    }
}

/// Schedule parameters for one day.
///
/// The free window runs from `free.start` to `free.end`; every other
/// period is an exclusion inside it. Each period is midnight-normalized on
/// its own against the same anchor day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Overall free period.
    pub free: ClockRange,
    /// Time away from home (leave house → reach home).
    pub away: Option<ClockRange>,
    /// School hours.
    pub school: Option<ClockRange>,
    /// Dinner period.
    pub dinner: Option<ClockRange>,
    /// Meal start times, each blocking a fixed-length period.
    pub meals: Vec<NaiveTime>,
    /// Planned bedtime, checked against the healthy bedtime.
    /// Falls back to the end of the free period when unset.
    pub bedtime: Option<NaiveTime>,
}

impl DayPlan {
    /// A free period between two clock times.
    pub fn free_period(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            free: ClockRange::new(start, end),
            away: None,
            school: None,
            dinner: None,
            meals: Vec::new(),
            bedtime: None,
        }
    }

    /// A school day: study from reaching home until sleep.
    pub fn after_school(leave_house: NaiveTime, reach_home: NaiveTime, sleep: NaiveTime) -> Self {
        let mut plan = Self::free_period(reach_home, sleep);
        plan.away = Some(ClockRange::new(leave_house, reach_home));
        plan.bedtime = Some(sleep);
        plan
    }

    /// Adds a dinner period.
    pub fn with_dinner(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.dinner = Some(ClockRange::new(start, end));
        self
    }

    /// Adds school hours.
    pub fn with_school(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.school = Some(ClockRange::new(start, end));
        self
    }

    /// Adds a meal starting at the given time.
    pub fn with_meal(mut self, at: NaiveTime) -> Self {
        self.meals.push(at);
        self
    }

    /// Sets the planned bedtime.
    pub fn with_bedtime(mut self, bedtime: NaiveTime) -> Self {
        self.bedtime = Some(bedtime);
        self
    }

    /// The normalized free window.
    ///
    /// # Errors
    /// `InvalidWindow` if start and end clock times are equal.
    pub fn window(&self) -> PlanResult<TimeWindow> {
        self.free.window()
    }

    /// All excluded periods, in declaration order.
    ///
    /// # Errors
    /// `InvalidWindow` if any range has equal start and end times.
    pub fn exclusions(&self, meal_minutes: i64) -> PlanResult<Vec<TimeWindow>> {
        let mut out = Vec::new();
        for range in [self.away, self.school, self.dinner].into_iter().flatten() {
            out.push(range.window()?);
        }
        out.extend(self.meals.iter().map(|&at| TimeWindow::block(at, meal_minutes)));
        Ok(out)
    }

    /// Bedtime, or the end of the free period if none was given.
    pub fn effective_bedtime(&self) -> NaiveTime {
        self.bedtime.unwrap_or(self.free.end)
    }

    /// Whether the bedtime falls after `healthy` (or past midnight).
    pub fn sleeps_late(&self, healthy: NaiveTime) -> bool {
        let bedtime = self.effective_bedtime();
        match TimeWindow::from_clock(self.free.start, bedtime) {
            Ok(w) => w.crosses_midnight() || bedtime > healthy,
            Err(_) => bedtime > healthy,
        }
    }
}
