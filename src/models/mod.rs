//! Revision planning domain models.
//!
//! Provides the data types flowing through a planning run: subjects and
//! their grades, time windows on a single anchor day, and the resulting
//! session assignments.
//!
//! # Time Model
//! All interval arithmetic is done in whole minutes relative to midnight
//! of an arbitrary anchor day. Clock times that cross midnight land past
//! minute 1440; labels wrap back to `HH:MM`.

mod calendar;
mod schedule;
mod subject;

pub use calendar::{at_anchor, clock_label, TimeWindow, MINUTES_PER_DAY};
pub use schedule::{ScheduleResult, ScheduleStatus, SessionAssignment, UnscheduledSubject};
pub use subject::{Grade, GradeOrScore, RankedSubject, Subject};
