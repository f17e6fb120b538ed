//! GitHub REST API 数据模型（只保留通知需要的字段）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job 运行状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Completed,
    /// queued / in_progress / waiting 等
    Other(String),
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => JobStatus::Completed,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Completed => "completed".to_string(),
            JobStatus::Other(s) => s,
        }
    }
}

/// Job 结论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Conclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    /// neutral / timed_out / action_required 等未识别的结论
    Other(String),
}

impl From<String> for Conclusion {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Conclusion::Success,
            "failure" => Conclusion::Failure,
            "cancelled" => Conclusion::Cancelled,
            "skipped" => Conclusion::Skipped,
            _ => Conclusion::Other(s),
        }
    }
}

impl From<Conclusion> for String {
    fn from(conclusion: Conclusion) -> Self {
        match conclusion {
            Conclusion::Success => "success".to_string(),
            Conclusion::Failure => "failure".to_string(),
            Conclusion::Cancelled => "cancelled".to_string(),
            Conclusion::Skipped => "skipped".to_string(),
            Conclusion::Other(s) => s,
        }
    }
}

/// 单个 Job 的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub html_url: String,
    pub status: JobStatus,
    #[serde(default)]
    pub conclusion: Option<Conclusion>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// `GET /repos/{owner}/{repo}/actions/runs/{run_id}/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
    pub url: String,
}

/// 分支引用（PR 的 head / base）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub repo: Option<RepoLink>,
}

/// PR 引用里的仓库只带 API url
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoLink {
    pub url: String,
}

/// Run 关联的 PR
///
/// Actions API 返回的 `pull_requests` 不带 title，缺失时为空字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
    pub head: BranchRef,
    pub base: BranchRef,
    #[serde(default)]
    pub title: String,
}

/// `GET /repos/{owner}/{repo}/actions/runs/{run_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub run_number: u64,
    pub html_url: String,
    pub head_branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub name: Option<String>,
    pub repository: Repository,
    #[serde(default)]
    pub pull_requests: Vec<PullRequestRef>,
}

impl WorkflowRun {
    /// 只保留 base 仓库就是本仓库的 PR，保持原顺序
    pub fn same_repo_pull_requests(&self) -> Vec<&PullRequestRef> {
        self.pull_requests
            .iter()
            .filter(|pr| {
                pr.base
                    .repo
                    .as_ref()
                    .map(|r| r.url == self.repository.url)
                    .unwrap_or(true)
            })
            .collect()
    }
}

/// `GET /repos/{owner}/{repo}/commits/{sha}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub html_url: String,
    #[serde(default)]
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
}

impl CommitRef {
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn message(&self) -> Option<&str> {
        self.commit
            .as_ref()
            .map(|c| c.message.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// Pull request 详情，用于补全 title
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestDetail {
    pub title: String,
}

/// API 错误响应
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}
