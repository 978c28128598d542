//! Study slot allocation and schedule metrics.
//!
//! Packs fixed-length sessions into one free window, in subject priority
//! order, skipping excluded periods (meals, school, dinner).
//!
//! # Algorithm
//!
//! `SlotAllocator` supports two greedy policies, selected by
//! [`AllocationMode`]:
//!
//! - **Round-robin**: walk a cursor forward; a slot that hits an excluded
//!   period moves the cursor to the end of that period. Free slots go to
//!   subjects one at a time, cycling in priority order.
//! - **Proportional**: enumerate every free slot on the session grid
//!   first, then hand each subject its requested number of slots in
//!   priority order.
//!
//! Neither policy backtracks or optimizes globally.
//!
//! # Metrics
//!
//! `ScheduleSummary` reports study time, free time and utilization.

mod allocator;
mod summary;

pub use allocator::{AllocationRequest, SlotAllocator};
pub use summary::ScheduleSummary;

use serde::{Deserialize, Serialize};

/// Slot allocation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// One slot per subject at a time, cycling until the window is full.
    #[default]
    RoundRobin,
    /// Each subject takes its requested session count, in priority order.
    Proportional,
}
