//! 运行配置
//!
//! 由 CLI 参数（及其环境变量回退）构建，校验失败时在任何网络请求之前返回。

use std::fmt;

use crate::error::{NotifyError, Result};
use crate::github::client::{GitHubConfig, DEFAULT_API_URL, DEFAULT_JOBS_TO_FETCH};
use crate::notification::payload::{non_empty, ChannelOverrides};
use crate::notification::severity::{JobInclusion, SeverityLevel};

/// 默认 HTTP 超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 敏感值，Debug/Display 不输出内容
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// 每个级别可选的字面颜色值（如 `#2eb886`），未设置时使用级别标签
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOverrides {
    pub good: Option<String>,
    pub warning: Option<String>,
    pub danger: Option<String>,
}

impl ColorOverrides {
    pub fn resolve(&self, level: SeverityLevel) -> String {
        let custom = match level {
            SeverityLevel::Good => &self.good,
            SeverityLevel::Warning => &self.warning,
            SeverityLevel::Danger => &self.danger,
        };
        custom
            .clone()
            .unwrap_or_else(|| level.as_str().to_string())
    }
}

/// 消息组装选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub include_jobs: JobInclusion,
    pub include_commit_message: bool,
    pub overrides: ChannelOverrides,
    pub colors: ColorOverrides,
}

/// 未校验的原始输入
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub repo_token: Option<String>,
    pub webhook_url: Option<String>,
    pub include_jobs: Option<String>,
    pub include_commit_message: Option<String>,
    pub jobs_to_fetch: Option<String>,
    pub channel: Option<String>,
    pub name: Option<String>,
    pub icon_emoji: Option<String>,
    pub icon_url: Option<String>,
    pub color_good: Option<String>,
    pub color_warning: Option<String>,
    pub color_danger: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<String>,
}

/// 校验后的配置
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub github: GitHubConfig,
    pub webhook_url: Secret,
    pub jobs_to_fetch: u8,
    pub compose: ComposeOptions,
}

impl NotifyConfig {
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let token = non_empty(raw.repo_token)
            .ok_or_else(|| NotifyError::Config("repo token is required".to_string()))?;
        let webhook_url = non_empty(raw.webhook_url)
            .ok_or_else(|| NotifyError::Config("webhook URL is required".to_string()))?;
        if !(webhook_url.starts_with("https://") || webhook_url.starts_with("http://")) {
            // 不回显 URL 本身
            return Err(NotifyError::Config(
                "webhook URL must start with http:// or https://".to_string(),
            ));
        }

        let include_jobs = match non_empty(raw.include_jobs) {
            Some(v) => v.parse::<JobInclusion>().map_err(NotifyError::Config)?,
            None => JobInclusion::default(),
        };

        let include_commit_message = match non_empty(raw.include_commit_message) {
            Some(v) => parse_bool("include commit message", &v)?,
            None => false,
        };

        let jobs_to_fetch = match non_empty(raw.jobs_to_fetch) {
            Some(v) => match v.trim().parse::<u8>() {
                Ok(n) if (1..=100).contains(&n) => n,
                _ => {
                    return Err(NotifyError::Config(format!(
                        "jobs to fetch must be between 1 and 100, got '{}'",
                        v
                    )))
                }
            },
            None => DEFAULT_JOBS_TO_FETCH,
        };

        let timeout_secs = match non_empty(raw.timeout_secs) {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(NotifyError::Config(format!(
                        "timeout must be a positive number of seconds, got '{}'",
                        v
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            github: GitHubConfig {
                api_url: non_empty(raw.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                token: Secret::new(token),
                timeout_secs,
            },
            webhook_url: Secret::new(webhook_url),
            jobs_to_fetch,
            compose: ComposeOptions {
                include_jobs,
                include_commit_message,
                overrides: ChannelOverrides::new(raw.channel, raw.name, raw.icon_emoji, raw.icon_url),
                colors: ColorOverrides {
                    good: non_empty(raw.color_good),
                    warning: non_empty(raw.color_warning),
                    danger: non_empty(raw.color_danger),
                },
            },
        })
    }
}

fn parse_bool(what: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(NotifyError::Config(format!(
            "{} must be true or false, got '{}'",
            what, other
        ))),
    }
}
