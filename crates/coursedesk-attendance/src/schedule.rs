//! Course schedules: sessions split into time blocks.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AttendanceError, Result};

/// Clock times as `HH:MM`, also accepting `HH:MM:SS` on input.
mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(d)?;
        NaiveTime::parse_from_str(&text, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&text, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// A contiguous slot within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock")]
    pub end: NaiveTime,
}

impl TimeBlock {
    /// Creates a time block.
    pub fn new(id: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Length of the block in minutes.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// One dated meeting of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub blocks: Vec<TimeBlock>,
}

impl Session {
    /// Creates a session without blocks.
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            title: None,
            blocks: Vec::new(),
        }
    }

    /// Adds a time block.
    #[must_use]
    pub fn block(mut self, block: TimeBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Returns the block with the given id.
    pub fn find_block(&self, id: &str) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }
}

/// A course schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub sessions: Vec<Session>,
}

/// A time block together with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRef {
    pub session_id: String,
    pub block_id: String,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock")]
    pub end: NaiveTime,
}

impl BlockRef {
    pub(crate) fn new(session: &Session, block: &TimeBlock) -> Self {
        Self {
            session_id: session.id.clone(),
            block_id: block.id.clone(),
            date: session.date,
            start: block.start,
            end: block.end,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sessions: Vec::new(),
        }
    }

    /// Adds a session.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Parses a schedule from JSON and checks it.
    pub fn from_json(json: &str) -> Result<Self> {
        let schedule: Self = serde_json::from_str(json)?;
        schedule.check()?;
        Ok(schedule)
    }

    /// Returns the session with the given id.
    pub fn find_session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Every block of every session, in schedule order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockRef> + '_ {
        self.sessions
            .iter()
            .flat_map(|s| s.blocks.iter().map(move |b| BlockRef::new(s, b)))
    }

    /// Checks ids and block times.
    ///
    /// Session ids are unique in the schedule, block ids unique within
    /// their session, and every block ends after it starts.
    pub fn check(&self) -> Result<()> {
        let mut sessions = HashSet::new();
        for session in &self.sessions {
            if !sessions.insert(session.id.as_str()) {
                return Err(AttendanceError::InvalidSchedule(format!(
                    "duplicate session {}",
                    session.id
                )));
            }
            let mut blocks = HashSet::new();
            for block in &session.blocks {
                if !blocks.insert(block.id.as_str()) {
                    return Err(AttendanceError::InvalidSchedule(format!(
                        "duplicate block {} in session {}",
                        block.id, session.id
                    )));
                }
                if block.end <= block.start {
                    return Err(AttendanceError::InvalidSchedule(format!(
                        "block {} in session {} ends before it starts",
                        block.id, session.id
                    )));
                }
            }
        }
        Ok(())
    }
}
