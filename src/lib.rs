//! Revision planning for students.
//!
//! Scores subjects by revision urgency and packs fixed-length study
//! sessions into the free time of a single day, skipping meals, school
//! and other blocked periods.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Subject`, `Grade`, `TimeWindow`,
//!   `SessionAssignment`, `ScheduleResult`
//! - **`validation`**: Input checks run before any score is computed
//! - **`scoring`**: Urgency formulas and the stable priority ranking
//! - **`scheduler`**: Round-robin and proportional slot allocation
//! - **`planner`**: Day plan intake and the scorer → allocator pipeline
//! - **`persistence`**: Append-only report sinks
//!
//! # Data Flow
//!
//! ```text
//! subjects ──► PriorityScorer ──► ranked subjects ──► SlotAllocator ──► sessions
//! ```
//!
//! Every run is a pure recomputation. Nothing is retained between runs
//! except what a `ReportSink` chooses to store.

pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod planner;
pub mod scheduler;
pub mod scoring;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{PersistenceError, PlanError};
