//! notify 命令处理
//!
//! 校验配置 -> 读取上下文 -> 拉取 run / commit / jobs -> 组装 -> 发送。

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::config::{NotifyConfig, RawConfig};
use crate::github::{GitHubClient, InvocationContext};
use crate::notification::{MessageComposer, SendResult, WebhookClient, WebhookConfig};

/// notify 命令参数
///
/// 每个参数都可以由 action input 对应的 `INPUT_*` 环境变量提供。
#[derive(Args, Debug, Default)]
pub struct NotifyArgs {
    /// GitHub API token（缺省时读取 GITHUB_TOKEN）
    #[arg(long, env = "INPUT_REPO_TOKEN", hide_env_values = true)]
    pub repo_token: Option<String>,
    /// Slack incoming webhook URL
    #[arg(long, env = "INPUT_SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,
    /// 是否附带 job 明细: true | false | on-failure
    #[arg(long, env = "INPUT_INCLUDE_JOBS")]
    pub include_jobs: Option<String>,
    /// 在正文里附带 commit message
    #[arg(long, env = "INPUT_INCLUDE_COMMIT_MESSAGE")]
    pub include_commit_message: Option<String>,
    /// 拉取的 job 数量 (1-100)
    #[arg(long, env = "INPUT_JOBS_TO_FETCH")]
    pub jobs_to_fetch: Option<String>,
    /// 覆盖目标频道
    #[arg(long, env = "INPUT_CHANNEL")]
    pub channel: Option<String>,
    /// 覆盖发送者名称
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,
    /// 覆盖发送者 emoji 图标
    #[arg(long, env = "INPUT_ICON_EMOJI")]
    pub icon_emoji: Option<String>,
    /// 覆盖发送者图片图标
    #[arg(long, env = "INPUT_ICON_URL")]
    pub icon_url: Option<String>,
    /// 成功时的颜色 (默认 good)
    #[arg(long, env = "INPUT_COLOR_GOOD")]
    pub color_good: Option<String>,
    /// 取消时的颜色 (默认 warning)
    #[arg(long, env = "INPUT_COLOR_WARNING")]
    pub color_warning: Option<String>,
    /// 失败时的颜色 (默认 danger)
    #[arg(long, env = "INPUT_COLOR_DANGER")]
    pub color_danger: Option<String>,
    /// GitHub REST API 地址
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
    /// HTTP 超时（秒，默认 30）
    #[arg(long, env = "INPUT_TIMEOUT_SECS")]
    pub timeout_secs: Option<String>,
    /// Dry-run 模式（只打印不发送）
    #[arg(long)]
    pub dry_run: bool,
}

impl NotifyArgs {
    /// 转成未校验的配置，token 回退到 GITHUB_TOKEN
    pub fn into_raw(self) -> RawConfig {
        let fallback = std::env::var("GITHUB_TOKEN").ok();
        self.into_raw_with_token_fallback(fallback)
    }

    /// 显式 token 为空时使用 `fallback`
    pub fn into_raw_with_token_fallback(self, fallback: Option<String>) -> RawConfig {
        let repo_token = self
            .repo_token
            .filter(|t| !t.is_empty())
            .or(fallback);

        RawConfig {
            repo_token,
            webhook_url: self.webhook_url,
            include_jobs: self.include_jobs,
            include_commit_message: self.include_commit_message,
            jobs_to_fetch: self.jobs_to_fetch,
            channel: self.channel,
            name: self.name,
            icon_emoji: self.icon_emoji,
            icon_url: self.icon_url,
            color_good: self.color_good,
            color_warning: self.color_warning,
            color_danger: self.color_danger,
            api_url: self.api_url,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// 处理 notify 命令
pub async fn handle_notify(args: NotifyArgs) -> Result<SendResult> {
    let dry_run = args.dry_run;

    // 配置错误必须在任何网络请求之前返回
    let config = NotifyConfig::from_raw(args.into_raw())?;
    let ctx = InvocationContext::from_env()?;
    let webhook = WebhookClient::new(WebhookConfig {
        url: config.webhook_url.clone(),
        timeout_secs: config.github.timeout_secs,
        dry_run,
    })?;

    info!(
        repository = %ctx.repository,
        run_id = ctx.run_id,
        event = %ctx.event_name,
        "Fetching workflow run"
    );

    let github = GitHubClient::new(config.github.clone())?;
    let report = github
        .fetch_report(&ctx, config.jobs_to_fetch)
        .await
        .context("fetching workflow run report")?;

    let (level, payload) = MessageComposer::new(&ctx, &config.compose).build(&report);
    info!(
        severity = %level,
        jobs = report.jobs.len(),
        fields = payload.attachments.first().map(|a| a.fields.len()).unwrap_or(0),
        "Composed notification"
    );

    let result = webhook
        .send(&payload)
        .await
        .context("delivering notification")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NotifyConfig, DEFAULT_TIMEOUT_SECS};
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        notify: NotifyArgs,
    }

    #[test]
    fn test_into_raw_keeps_explicit_token() {
        let args = NotifyArgs {
            repo_token: Some("explicit".to_string()),
            timeout_secs: Some("10".to_string()),
            channel: Some("#ci".to_string()),
            ..Default::default()
        };
        let raw = args.into_raw_with_token_fallback(Some("from-env".to_string()));
        assert_eq!(raw.repo_token.as_deref(), Some("explicit"));
        assert_eq!(raw.channel.as_deref(), Some("#ci"));
        assert_eq!(raw.timeout_secs.as_deref(), Some("10"));
    }

    #[test]
    fn test_token_falls_back_to_github_token() {
        let fallback = Some("ghs_from_env".to_string());

        let raw = NotifyArgs::default().into_raw_with_token_fallback(fallback.clone());
        assert_eq!(raw.repo_token.as_deref(), Some("ghs_from_env"));

        let args = NotifyArgs {
            repo_token: Some(String::new()),
            ..Default::default()
        };
        let raw = args.into_raw_with_token_fallback(fallback);
        assert_eq!(raw.repo_token.as_deref(), Some("ghs_from_env"));

        let raw = NotifyArgs::default().into_raw_with_token_fallback(None);
        assert_eq!(raw.repo_token, None);
    }

    #[test]
    fn test_empty_timeout_argument_is_accepted() {
        let cli = TestCli::try_parse_from(["ci-notify", "--timeout-secs", ""]).unwrap();
        let mut raw = cli.notify.into_raw_with_token_fallback(Some("t".to_string()));
        raw.webhook_url = Some("https://hooks.slack.com/services/T/B/X".to_string());

        let config = NotifyConfig::from_raw(raw).unwrap();
        assert_eq!(config.github.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_timeout_is_a_config_error() {
        let cli = TestCli::try_parse_from(["ci-notify", "--timeout-secs", "soon"]).unwrap();
        let mut raw = cli.notify.into_raw_with_token_fallback(Some("t".to_string()));
        raw.webhook_url = Some("https://hooks.slack.com/services/T/B/X".to_string());

        let err = NotifyConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn test_handle_notify_fails_fast_without_webhook() {
        let args = NotifyArgs {
            repo_token: Some("t".to_string()),
            webhook_url: None,
            ..Default::default()
        };
        let err = handle_notify(args).await.unwrap_err();
        assert!(err.to_string().contains("webhook URL is required"));
    }
}
