//! CI Notify - 把 GitHub Actions workflow run 的结果发送到 Slack webhook

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod notification;

pub use config::{ComposeOptions, NotifyConfig, RawConfig, Secret};
pub use error::NotifyError;
pub use github::{GitHubClient, InvocationContext, RunReport};
pub use notification::{MessageComposer, SendResult, SeverityLevel, SlackPayload, WebhookClient};
