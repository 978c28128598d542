//! Subject model.
//!
//! A subject is one entry of the student's revision list: a current
//! result (grade band or numeric mark), a self-reported confidence, and
//! whether outside tuition is already helping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Examination grade band, best (`A1`) to worst (`F9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A1,
    A2,
    B3,
    B4,
    C5,
    C6,
    D7,
    E8,
    F9,
}

impl Grade {
    /// All bands in order of increasing urgency.
    pub const ALL: [Grade; 9] = [
        Grade::A1,
        Grade::A2,
        Grade::B3,
        Grade::B4,
        Grade::C5,
        Grade::C6,
        Grade::D7,
        Grade::E8,
        Grade::F9,
    ];

    /// Revision urgency of this band in `[0.05, 1.00]`.
    pub fn urgency(self) -> f64 {
        match self {
            Grade::A1 => 0.05,
            Grade::A2 => 0.10,
            Grade::B3 => 0.25,
            Grade::B4 => 0.35,
            Grade::C5 => 0.50,
            Grade::C6 => 0.60,
            Grade::D7 => 0.75,
            Grade::E8 => 0.85,
            Grade::F9 => 1.00,
        }
    }

    /// Band label (e.g. `"B3"`).
    pub fn label(self) -> &'static str {
        match self {
            Grade::A1 => "A1",
            Grade::A2 => "A2",
            Grade::B3 => "B3",
            Grade::B4 => "B4",
            Grade::C5 => "C5",
            Grade::C6 => "C6",
            Grade::D7 => "D7",
            Grade::E8 => "E8",
            Grade::F9 => "F9",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Parses a band label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.label() == wanted)
            .ok_or_else(|| format!("unknown grade '{}'", s.trim()))
    }
}

/// Current performance in a subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeOrScore {
    /// Categorical grade band.
    Grade(Grade),
    /// Raw mark, 0–100.
    Score(f64),
}

/// A subject to revise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name (trimmed, not required to be unique).
    pub name: String,
    /// Current result.
    pub performance: GradeOrScore,
    /// Self-reported confidence, 1 (least) to 5 (most).
    pub confidence: i32,
    /// Whether tuition support is in place.
    pub has_tuition: bool,
    /// Sessions wanted in proportional allocation.
    pub requested_sessions: u32,
}

impl Subject {
    /// Creates a subject with the given performance.
    pub fn new(name: impl Into<String>, performance: GradeOrScore, confidence: i32) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim().to_string(),
            performance,
            confidence,
            has_tuition: false,
            requested_sessions: 1,
        }
    }

    /// Creates a subject graded by band.
    pub fn graded(name: impl Into<String>, grade: Grade, confidence: i32) -> Self {
        Self::new(name, GradeOrScore::Grade(grade), confidence)
    }

    /// Creates a subject with a numeric mark.
    pub fn scored(name: impl Into<String>, score: f64, confidence: i32) -> Self {
        Self::new(name, GradeOrScore::Score(score), confidence)
    }

    /// Sets the tuition flag.
    pub fn with_tuition(mut self, has_tuition: bool) -> Self {
        self.has_tuition = has_tuition;
        self
    }

    /// Sets the requested session count.
    pub fn with_sessions(mut self, requested_sessions: u32) -> Self {
        self.requested_sessions = requested_sessions;
        self
    }

    /// Grade band, if this subject is graded by band.
    pub fn grade(&self) -> Option<Grade> {
        match self.performance {
            GradeOrScore::Grade(g) => Some(g),
            GradeOrScore::Score(_) => None,
        }
    }

    /// Numeric mark, if this subject carries one.
    pub fn score(&self) -> Option<f64> {
        match self.performance {
            GradeOrScore::Score(s) => Some(s),
            GradeOrScore::Grade(_) => None,
        }
    }
}

/// A subject with its computed urgency score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSubject {
    /// The scored subject.
    pub subject: Subject,
    /// Urgency score (higher = revise first).
    pub score: f64,
}

impl RankedSubject {
    /// Subject name.
    pub fn name(&self) -> &str {
        &self.subject.name
    }
}
