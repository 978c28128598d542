//! Report persistence.
//!
//! A planning run may hand its result to a [`ReportSink`]. Sinks are
//! append-only: each run writes one new record and nothing is updated or
//! deleted. Whether a sink is usable is decided when it is constructed and
//! exposed through [`ReportSink::is_ready`].

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::models::GradeOrScore;
use crate::planner::{PlanOutcome, SessionRow};

/// One row of the priority report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScoreRecord {
    pub subject: String,
    pub performance: GradeOrScore,
    pub confidence: i32,
    pub tuition: bool,
    pub priority_score: f64,
}

/// Record written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistencePayload {
    /// Run date (ISO-8601).
    pub date: NaiveDate,
    /// Subjects ranked by urgency.
    pub report: Vec<SubjectScoreRecord>,
    /// Sessions in start order.
    #[serde(alias = "timetable")]
    pub schedule: Vec<SessionRow>,
}

impl PersistencePayload {
    /// Builds the payload for a finished outcome.
    pub fn from_outcome(outcome: &PlanOutcome, date: NaiveDate) -> Self {
        let report = outcome
            .report
            .iter()
            .map(|r| SubjectScoreRecord {
                subject: r.subject.name.clone(),
                performance: r.subject.performance,
                confidence: r.subject.confidence,
                tuition: r.subject.has_tuition,
                priority_score: r.score,
            })
            .collect();
        Self {
            date,
            report,
            schedule: outcome.table(),
        }
    }
}

/// Append-only destination for run records.
pub trait ReportSink {
    /// Whether the sink initialized successfully and accepts records.
    fn is_ready(&self) -> bool;

    /// Appends one record.
    fn append(&mut self, payload: &PersistencePayload) -> Result<(), PersistenceError>;
}

/// In-process sink that keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<PersistencePayload>,
    offline: bool,
}

impl MemorySink {
    /// Creates a ready, empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that reports itself as not ready.
    pub fn offline() -> Self {
        Self {
            records: Vec::new(),
            offline: true,
        }
    }

    /// Records appended so far, oldest first.
    pub fn records(&self) -> &[PersistencePayload] {
        &self.records
    }
}

impl ReportSink for MemorySink {
    fn is_ready(&self) -> bool {
        !self.offline
    }

    fn append(&mut self, payload: &PersistencePayload) -> Result<(), PersistenceError> {
        if self.offline {
            return Err(PersistenceError::NotReady("memory sink is offline".into()));
        }
        self.records.push(payload.clone());
        debug!("stored record {} for {}", self.records.len(), payload.date);
        Ok(())
    }
}

/// Sink writing one JSON document per line to a file.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Opens (or creates) the file in append mode.
    ///
    /// # Errors
    /// `Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("appending plan records to {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every record in a JSON lines file.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<PersistencePayload>, PersistenceError> {
        let content = std::fs::read_to_string(path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(PersistenceError::from))
            .collect()
    }
}

impl ReportSink for JsonLinesSink {
    fn is_ready(&self) -> bool {
        true
    }

    fn append(&mut self, payload: &PersistencePayload) -> Result<(), PersistenceError> {
        serde_json::to_writer(&mut self.writer, payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, Subject};
    use crate::planner::{DayPlan, Planner};
    use chrono::NaiveTime;

    fn outcome() -> PlanOutcome {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let day = DayPlan::free_period(t(15, 30), t(18, 30));
        Planner::default()
            .plan(
                &day,
                &[
                    Subject::graded("Math", Grade::F9, 1),
                    Subject::graded("Art", Grade::A1, 5).with_tuition(true),
                ],
            )
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let payload = PersistencePayload::from_outcome(&outcome(), date());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["date"], "2026-10-18");
        assert_eq!(json["report"][0]["subject"], "Math");
        assert_eq!(json["report"][0]["priority_score"], 1.0);
        assert_eq!(json["report"][1]["tuition"], true);
        assert_eq!(json["schedule"][0]["start_label"], "15:30");
        assert_eq!(json["schedule"][0]["end_label"], "16:30");
        assert_eq!(json["schedule"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_payload_timetable_alias() {
        let json = r#"{
            "date": "2026-10-18",
            "report": [],
            "timetable": [{"subject": "Math", "start_label": "17:00", "end_label": "18:00"}]
        }"#;
        let payload: PersistencePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.schedule[0].subject, "Math");
    }

    #[test]
    fn test_memory_sink_appends() {
        let payload = PersistencePayload::from_outcome(&outcome(), date());
        let mut sink = MemorySink::new();
        assert!(sink.is_ready());
        sink.append(&payload).unwrap();
        sink.append(&payload).unwrap();
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn test_offline_sink_rejects() {
        let payload = PersistencePayload::from_outcome(&outcome(), date());
        let mut sink = MemorySink::offline();
        assert!(!sink.is_ready());
        assert!(matches!(
            sink.append(&payload),
            Err(PersistenceError::NotReady(_))
        ));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_json_lines_sink_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "u-studyplan-sink-{}.jsonl",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let payload = PersistencePayload::from_outcome(&outcome(), date());
        {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            assert!(sink.is_ready());
            assert_eq!(sink.path(), path.as_path());
            sink.append(&payload).unwrap();
            sink.append(&payload).unwrap();
        }

        let records = JsonLinesSink::read_all(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, payload.date);
        assert_eq!(records[0].schedule, payload.schedule);
        assert!((records[1].report[0].priority_score - 1.0).abs() < 1e-12);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_lines_sink_open_failure() {
        let dir = std::env::temp_dir();
        // A directory cannot be opened as an append-mode file.
        assert!(matches!(
            JsonLinesSink::open(&dir),
            Err(PersistenceError::Io(_))
        ));
    }
}
