//! Pass/fail decisions from attendance ratios.

use serde::Serialize;

use crate::error::{AttendanceError, Result};
use crate::summary::StudentAttendance;

/// Outcome of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// A student's attendance summary with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentVerdict {
    pub student_id: String,
    pub name: String,
    pub present: usize,
    pub total: usize,
    pub ratio: f64,
    pub verdict: Verdict,
}

/// Minimum share of attended blocks needed to pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityPolicy {
    pass_threshold: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl EligibilityPolicy {
    /// Threshold used when none is configured.
    pub const DEFAULT_THRESHOLD: f64 = 0.8;

    /// Creates a policy; the threshold must lie in `0.0..=1.0`.
    pub fn new(pass_threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&pass_threshold) {
            return Err(AttendanceError::InvalidThreshold(pass_threshold));
        }
        Ok(Self { pass_threshold })
    }

    /// The configured threshold.
    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    /// Passes a student whose ratio reaches the threshold.
    ///
    /// A student with no selected blocks fails.
    pub fn verdict(&self, summary: &StudentAttendance) -> Verdict {
        if summary.total() > 0 && summary.ratio >= self.pass_threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Judges every summary.
    pub fn evaluate(&self, summaries: &[StudentAttendance]) -> Vec<StudentVerdict> {
        summaries
            .iter()
            .map(|s| StudentVerdict {
                student_id: s.student_id.clone(),
                name: s.name.clone(),
                present: s.present,
                total: s.total(),
                ratio: s.ratio,
                verdict: self.verdict(s),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(present: usize, absent: usize) -> StudentAttendance {
        let total = present + absent;
        StudentAttendance {
            student_id: "ada".to_string(),
            name: "Ada".to_string(),
            blocks: Vec::new(),
            present,
            absent,
            ratio: if total == 0 {
                0.0
            } else {
                present as f64 / total as f64
            },
        }
    }

    #[test]
    fn test_default_threshold() {
        let policy = EligibilityPolicy::default();
        assert_eq!(policy.pass_threshold(), 0.8);
        assert_eq!(policy.verdict(&summary(8, 2)), Verdict::Pass);
        assert_eq!(policy.verdict(&summary(7, 3)), Verdict::Fail);
    }

    #[test]
    fn test_no_blocks_fails() {
        let policy = EligibilityPolicy::new(0.0).unwrap();
        assert_eq!(policy.verdict(&summary(0, 0)), Verdict::Fail);
        assert_eq!(policy.verdict(&summary(0, 1)), Verdict::Pass);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(matches!(
            EligibilityPolicy::new(1.5),
            Err(AttendanceError::InvalidThreshold(_))
        ));
        assert!(EligibilityPolicy::new(f64::NAN).is_err());
    }

    #[test]
    fn test_evaluate() {
        let verdicts = EligibilityPolicy::default().evaluate(&[summary(4, 1)]);
        assert_eq!(verdicts[0].total, 5);
        assert_eq!(verdicts[0].verdict, Verdict::Pass);
    }
}
