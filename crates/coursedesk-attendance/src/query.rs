//! Selecting time blocks from query parameters.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{AttendanceError, Result};
use crate::schedule::{BlockRef, Schedule};

/// Which blocks of a schedule to look at.
///
/// Unset criteria match everything; set criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockQuery {
    /// Session id.
    pub session: Option<String>,
    /// Time block id.
    pub block: Option<String>,
    /// Session date.
    pub date: Option<NaiveDate>,
}

impl BlockQuery {
    /// Creates a query selecting every block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `session`, `block` and `date` (`YYYY-MM-DD`) parameters.
    ///
    /// Empty values and other parameters are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

        let date = match get("date") {
            Some(text) => Some(NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|_| {
                AttendanceError::InvalidQuery {
                    param: "date".to_string(),
                    value: text.clone(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            session: get("session"),
            block: get("block"),
            date,
        })
    }

    /// Parses a URL query string such as `session=s1&block=am`.
    pub fn parse(query_string: &str) -> Result<Self> {
        let params: HashMap<String, String> = query_string
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (urldecode(k), urldecode(v))
            })
            .collect();
        Self::from_params(&params)
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.block.is_none() && self.date.is_none()
    }
}

fn urldecode(s: &str) -> String {
    let bytes = urlencoding::decode_binary(s.replace('+', " ").as_bytes()).into_owned();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Lists the blocks a query selects, in schedule order.
///
/// A session or block id that does not exist is an error rather than an
/// empty selection. A date with no sessions selects nothing.
pub fn resolve(schedule: &Schedule, query: &BlockQuery) -> Result<Vec<BlockRef>> {
    if query.is_empty() {
        return Ok(schedule.blocks().collect());
    }

    let sessions: Vec<_> = match &query.session {
        Some(id) => {
            let session = schedule
                .find_session(id)
                .ok_or_else(|| AttendanceError::UnknownSession(id.clone()))?;
            vec![session]
        }
        None => schedule.sessions.iter().collect(),
    };

    if let Some(block) = &query.block {
        if !sessions.iter().any(|s| s.find_block(block).is_some()) {
            return Err(AttendanceError::UnknownBlock(block.clone()));
        }
    }

    let selected: Vec<BlockRef> = sessions
        .into_iter()
        .filter(|s| query.date.map_or(true, |d| d == s.date))
        .flat_map(|s| {
            s.blocks
                .iter()
                .filter(move |b| query.block.as_ref().map_or(true, |id| *id == b.id))
                .map(move |b| BlockRef::new(s, b))
        })
        .collect();

    debug!(
        schedule = %schedule.id,
        blocks = selected.len(),
        "Resolved time blocks"
    );

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::schedule::{Session, TimeBlock};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn schedule() -> Schedule {
        let am = || {
            TimeBlock::new(
                "am",
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )
        };
        let pm = || {
            TimeBlock::new(
                "pm",
                NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            )
        };
        Schedule::new("rust-101")
            .session(Session::new("s1", date(2)).block(am()).block(pm()))
            .session(Session::new("s2", date(3)).block(am()))
    }

    #[test]
    fn test_no_filters_selects_everything() {
        let blocks = resolve(&schedule(), &BlockQuery::new()).unwrap();
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_session_and_block() {
        let query = BlockQuery::parse("session=s1&block=pm").unwrap();
        let blocks = resolve(&schedule(), &query).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_id, "pm");
    }

    #[test]
    fn test_block_across_sessions() {
        let query = BlockQuery::parse("block=am").unwrap();
        let blocks = resolve(&schedule(), &query).unwrap();
        let sessions: Vec<_> = blocks.iter().map(|b| b.session_id.as_str()).collect();
        assert_eq!(sessions, vec!["s1", "s2"]);
    }

    #[test]
    fn test_date_filter() {
        let query = BlockQuery::parse("date=2026-03-03").unwrap();
        assert_eq!(resolve(&schedule(), &query).unwrap().len(), 1);

        let query = BlockQuery::parse("date=2026-03-09").unwrap();
        assert!(resolve(&schedule(), &query).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_ids() {
        let query = BlockQuery::parse("session=s9").unwrap();
        assert!(matches!(
            resolve(&schedule(), &query),
            Err(AttendanceError::UnknownSession(_))
        ));

        let query = BlockQuery::parse("session=s2&block=pm").unwrap();
        assert!(matches!(
            resolve(&schedule(), &query),
            Err(AttendanceError::UnknownBlock(_))
        ));
    }

    #[test]
    fn test_parse_decodes_values() {
        let query = BlockQuery::parse("?session=intro%20rust&date=2026%2D03%2D02&block").unwrap();
        assert_eq!(query.session.as_deref(), Some("intro rust"));
        assert_eq!(query.date, Some(date(2)));
        assert_eq!(query.block, None);

        let schedule = Schedule::new("rust-101").session(
            Session::new("intro rust", date(2)).block(TimeBlock::new(
                "am",
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )),
        );
        let blocks = resolve(&schedule, &query).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].session_id, "intro rust");
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            BlockQuery::parse("date=March"),
            Err(AttendanceError::InvalidQuery { .. })
        ));
    }
}
