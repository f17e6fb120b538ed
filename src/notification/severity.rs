//! Severity classification for workflow runs
//!
//! Reduces the outcomes of a run's jobs to one of three levels:
//! - GOOD: every job succeeded (or was skipped)
//! - WARNING: nothing failed, but at least one job was cancelled
//! - DANGER: anything else, including conclusions we do not recognize

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::github::types::{Conclusion, Job, JobStatus};

/// Overall health of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Good,
    Warning,
    Danger,
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SeverityLevel {
    /// Tag understood by Slack attachments as a built-in color
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Good => "good",
            SeverityLevel::Warning => "warning",
            SeverityLevel::Danger => "danger",
        }
    }
}

/// When per-job fields are attached to the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobInclusion {
    #[default]
    Always,
    Never,
    OnFailure,
}

impl FromStr for JobInclusion {
    type Err = String;

    /// Accepts the action input spellings (`true`/`false`/`on-failure`)
    /// as well as `always`/`never`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "true" | "always" => Ok(JobInclusion::Always),
            "false" | "never" => Ok(JobInclusion::Never),
            "on-failure" => Ok(JobInclusion::OnFailure),
            other => Err(format!(
                "invalid job inclusion policy '{}', expected one of: true, false, on-failure",
                other
            )),
        }
    }
}

/// Jobs that take part in aggregation: completed and not skipped, in fetch order
pub fn reportable_jobs(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter()
        .filter(|job| job.status == JobStatus::Completed)
        .filter(|job| job.conclusion != Some(Conclusion::Skipped))
        .collect()
}

/// Classify a set of job conclusions, first matching rule wins
///
/// An empty set is GOOD. A failure anywhere beats a cancellation.
pub fn aggregate<'a, I>(conclusions: I) -> SeverityLevel
where
    I: IntoIterator<Item = Option<&'a Conclusion>>,
{
    let conclusions: Vec<Option<&Conclusion>> = conclusions.into_iter().collect();

    let all_passed = conclusions
        .iter()
        .all(|c| matches!(c, Some(Conclusion::Success) | Some(Conclusion::Skipped)));
    if all_passed {
        return SeverityLevel::Good;
    }

    let any_danger = conclusions.iter().any(|c| {
        !matches!(
            c,
            Some(Conclusion::Success) | Some(Conclusion::Skipped) | Some(Conclusion::Cancelled)
        )
    });
    if !any_danger {
        return SeverityLevel::Warning;
    }

    SeverityLevel::Danger
}

/// Whether job fields should be rendered for the given level
pub fn should_include_jobs(policy: JobInclusion, level: SeverityLevel) -> bool {
    match policy {
        JobInclusion::Never => false,
        JobInclusion::OnFailure => level == SeverityLevel::Danger,
        JobInclusion::Always => true,
    }
}

/// Aggregate the reportable jobs of a run and apply the inclusion policy
pub fn classify(jobs: &[Job], policy: JobInclusion) -> (SeverityLevel, bool) {
    let level = aggregate(reportable_jobs(jobs).into_iter().map(|j| j.conclusion.as_ref()));
    (level, should_include_jobs(policy, level))
}
