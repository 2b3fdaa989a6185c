//! # coursedesk-attendance
//!
//! Attendance tracking for course schedules: resolve which time blocks a
//! query selects, mark each student present or absent per block and
//! decide pass/fail against an attendance threshold.
//!
//! ## Quick Start
//!
//! ```rust
//! use coursedesk_attendance::{
//!     summarize, AttendanceRecord, BlockQuery, EligibilityPolicy, Schedule, Student, Verdict,
//! };
//!
//! let schedule = Schedule::from_json(r#"{
//!     "id": "rust-101",
//!     "sessions": [{"id": "s1", "date": "2026-03-02", "blocks": [
//!         {"id": "am", "start": "09:00", "end": "12:00"},
//!         {"id": "pm", "start": "13:00", "end": "16:00"}
//!     ]}]
//! }"#).unwrap();
//!
//! let students = vec![Student::new("ada", "Ada")];
//! let records = vec![
//!     AttendanceRecord::new("ada", "s1", "am", true),
//!     AttendanceRecord::new("ada", "s1", "pm", true),
//! ];
//!
//! let summaries = summarize(&schedule, &records, &students, &BlockQuery::new()).unwrap();
//! let policy = EligibilityPolicy::default();
//! assert_eq!(policy.verdict(&summaries[0]), Verdict::Pass);
//! ```

mod eligibility;
mod error;
mod query;
mod schedule;
mod summary;

pub use eligibility::{EligibilityPolicy, StudentVerdict, Verdict};
pub use error::{AttendanceError, Result};
pub use query::{resolve, BlockQuery};
pub use schedule::{BlockRef, Schedule, Session, TimeBlock};
pub use summary::{
    summarize, AttendanceRecord, AttendanceStatus, BlockAttendance, Student, StudentAttendance,
};
