//! GitHub 上游数据：调用上下文、REST 模型与客户端

pub mod client;
pub mod context;
pub mod types;

pub use client::{GitHubClient, GitHubConfig, RunReport};
pub use context::InvocationContext;
pub use types::{CommitRef, Conclusion, Job, JobStatus, PullRequestRef, WorkflowRun};
