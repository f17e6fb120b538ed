//! GitHub REST API 客户端
//!
//! 依次拉取 run、commit、jobs，每个请求完成后才发下一个。

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::context::InvocationContext;
use super::types::{ApiError, CommitRef, Job, JobList, PullRequestDetail, PullRequestRef, WorkflowRun};
use crate::config::Secret;
use crate::error::{NotifyError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// 默认每次拉取的 job 数量
pub const DEFAULT_JOBS_TO_FETCH: u8 = 30;

/// 客户端配置
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Secret,
    pub timeout_secs: u64,
}

/// 组装通知所需的全部上游数据
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run: WorkflowRun,
    pub commit: CommitRef,
    pub jobs: Vec<Job>,
    /// 同仓库的 PR，按 API 返回顺序；第一个已补全 title
    pub pull_requests: Vec<PullRequestRef>,
}

pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Secret,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ci-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifyError::transport("creating HTTP client", e))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &'static str, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        debug!(resource, path, "GitHub API request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| NotifyError::transport(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(resource, status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NotifyError::decode(resource, e))
    }

    pub async fn workflow_run(&self, repository: &str, run_id: u64) -> Result<WorkflowRun> {
        self.get_json("workflow run", &format!("/repos/{}/actions/runs/{}", repository, run_id))
            .await
    }

    pub async fn commit(&self, repository: &str, sha: &str) -> Result<CommitRef> {
        self.get_json("commit", &format!("/repos/{}/commits/{}", repository, sha))
            .await
    }

    pub async fn jobs(&self, repository: &str, run_id: u64, per_page: u8) -> Result<Vec<Job>> {
        let list: JobList = self
            .get_json(
                "jobs",
                &format!(
                    "/repos/{}/actions/runs/{}/jobs?per_page={}",
                    repository, run_id, per_page
                ),
            )
            .await?;
        Ok(list.jobs)
    }

    pub async fn pull_request(&self, repository: &str, number: u64) -> Result<PullRequestDetail> {
        self.get_json("pull request", &format!("/repos/{}/pulls/{}", repository, number))
            .await
    }

    /// 拉取本次 run 的全部数据
    pub async fn fetch_report(&self, ctx: &InvocationContext, jobs_to_fetch: u8) -> Result<RunReport> {
        let run = self.workflow_run(&ctx.repository, ctx.run_id).await?;
        let commit = self.commit(&ctx.repository, &ctx.sha).await?;
        let jobs = self.jobs(&ctx.repository, ctx.run_id, jobs_to_fetch).await?;

        let mut pull_requests: Vec<PullRequestRef> =
            run.same_repo_pull_requests().into_iter().cloned().collect();
        if let Some(first) = pull_requests.first_mut() {
            if first.title.is_empty() {
                first.title = self.pull_request(&ctx.repository, first.number).await?.title;
            }
        }

        debug!(
            run_id = run.id,
            jobs = jobs.len(),
            pull_requests = pull_requests.len(),
            "Fetched workflow run"
        );

        Ok(RunReport {
            run,
            commit,
            jobs,
            pull_requests,
        })
    }
}

async fn fetch_error(resource: &'static str, status: StatusCode, response: reqwest::Response) -> NotifyError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });
    NotifyError::Fetch {
        resource,
        status: status.as_u16(),
        message,
    }
}
