//! Per-student attendance over a set of time blocks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::query::{resolve, BlockQuery};
use crate::schedule::{BlockRef, Schedule};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
}

impl Student {
    /// Creates a student.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: String,
    pub session_id: String,
    pub block_id: String,
    pub present: bool,
}

impl AttendanceRecord {
    /// Creates a record.
    pub fn new(student: &str, session: &str, block: &str, present: bool) -> Self {
        Self {
            student_id: student.to_string(),
            session_id: session.to_string(),
            block_id: block.to_string(),
            present,
        }
    }
}

/// Whether a student attended a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// A student's status for one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockAttendance {
    pub block: BlockRef,
    pub status: AttendanceStatus,
}

/// A student's attendance over the selected blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub student_id: String,
    pub name: String,
    pub blocks: Vec<BlockAttendance>,
    pub present: usize,
    pub absent: usize,
    /// Share of blocks attended, 0.0 when no block was selected.
    pub ratio: f64,
}

impl StudentAttendance {
    /// Number of blocks considered.
    pub fn total(&self) -> usize {
        self.present + self.absent
    }
}

/// Builds each student's attendance over the blocks `query` selects.
///
/// A block counts as present only when a record marks it so; a missing
/// record is an absence. When a block has several records for the same
/// student, the last one wins. Students keep their input order.
pub fn summarize(
    schedule: &Schedule,
    records: &[AttendanceRecord],
    students: &[Student],
    query: &BlockQuery,
) -> Result<Vec<StudentAttendance>> {
    let blocks = resolve(schedule, query)?;

    let marks: HashMap<(&str, &str, &str), bool> = records
        .iter()
        .map(|r| {
            (
                (
                    r.student_id.as_str(),
                    r.session_id.as_str(),
                    r.block_id.as_str(),
                ),
                r.present,
            )
        })
        .collect();

    let summaries: Vec<StudentAttendance> = students
        .iter()
        .map(|student| {
            let blocks: Vec<BlockAttendance> = blocks
                .iter()
                .map(|block| {
                    let key = (
                        student.id.as_str(),
                        block.session_id.as_str(),
                        block.block_id.as_str(),
                    );
                    let status = if marks.get(&key).copied().unwrap_or(false) {
                        AttendanceStatus::Present
                    } else {
                        AttendanceStatus::Absent
                    };
                    BlockAttendance {
                        block: block.clone(),
                        status,
                    }
                })
                .collect();

            let present = blocks
                .iter()
                .filter(|b| b.status == AttendanceStatus::Present)
                .count();
            let absent = blocks.len() - present;
            let ratio = if blocks.is_empty() {
                0.0
            } else {
                present as f64 / blocks.len() as f64
            };

            StudentAttendance {
                student_id: student.id.clone(),
                name: student.name.clone(),
                blocks,
                present,
                absent,
                ratio,
            }
        })
        .collect();

    debug!(
        students = summaries.len(),
        blocks = blocks.len(),
        records = records.len(),
        "Summarized attendance"
    );

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::schedule::{Session, TimeBlock};

    fn schedule() -> Schedule {
        let block = |id: &str, h: u32| {
            TimeBlock::new(
                id,
                NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(h + 2, 0, 0).unwrap(),
            )
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        Schedule::new("rust-101").session(
            Session::new("s1", date)
                .block(block("am", 9))
                .block(block("pm", 13)),
        )
    }

    fn students() -> Vec<Student> {
        vec![Student::new("ada", "Ada"), Student::new("bob", "Bob")]
    }

    #[test]
    fn test_missing_record_is_absent() {
        let records = vec![
            AttendanceRecord::new("ada", "s1", "am", true),
            AttendanceRecord::new("ada", "s1", "pm", true),
            AttendanceRecord::new("bob", "s1", "am", true),
        ];
        let summary = summarize(&schedule(), &records, &students(), &BlockQuery::new()).unwrap();

        assert_eq!(summary[0].present, 2);
        assert_eq!(summary[0].ratio, 1.0);
        assert_eq!(summary[1].present, 1);
        assert_eq!(summary[1].absent, 1);
        assert_eq!(summary[1].blocks[1].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_last_record_wins() {
        let records = vec![
            AttendanceRecord::new("ada", "s1", "am", true),
            AttendanceRecord::new("ada", "s1", "am", false),
        ];
        let query = BlockQuery::parse("block=am").unwrap();
        let summary = summarize(&schedule(), &records, &students(), &query).unwrap();

        assert_eq!(summary[0].total(), 1);
        assert_eq!(summary[0].present, 0);
    }

    #[test]
    fn test_empty_selection() {
        let query = BlockQuery::parse("date=2026-04-01").unwrap();
        let summary = summarize(&schedule(), &[], &students(), &query).unwrap();

        assert_eq!(summary[0].total(), 0);
        assert_eq!(summary[0].ratio, 0.0);
    }
}
