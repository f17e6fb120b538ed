//! Webhook 请求载荷
//!
//! 与 Slack incoming webhook 的 attachment 格式一致：
//! ```json
//! {
//!   "channel": "#ci",
//!   "attachments": [{
//!     "mrkdwn_in": ["text"],
//!     "color": "good",
//!     "author_icon": "...", "author_link": "...", "author_name": "...",
//!     "title": "...", "text": "...",
//!     "fields": [{ "title": "", "short": true, "value": "✓ <url|build> (1m 5s)" }],
//!     "footer_icon": "...", "footer": "..."
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// 顶层载荷，未配置的覆盖项不出现在 JSON 中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub mrkdwn_in: Vec<String>,
    pub color: String,
    pub author_icon: String,
    pub author_link: String,
    pub author_name: String,
    pub title: String,
    pub text: String,
    pub fields: Vec<Field>,
    pub footer_icon: String,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub short: bool,
    pub value: String,
}

impl Field {
    /// 短字段，title 固定为空
    pub fn short(value: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            short: true,
            value: value.into(),
        }
    }
}

/// 频道 / 用户名 / 图标覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelOverrides {
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_emoji: Option<String>,
    pub icon_url: Option<String>,
}

impl ChannelOverrides {
    /// 空字符串视为未配置
    pub fn new(
        channel: Option<String>,
        username: Option<String>,
        icon_emoji: Option<String>,
        icon_url: Option<String>,
    ) -> Self {
        Self {
            channel: non_empty(channel),
            username: non_empty(username),
            icon_emoji: non_empty(icon_emoji),
            icon_url: non_empty(icon_url),
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SlackPayload {
    pub fn new(attachment: Attachment, overrides: &ChannelOverrides) -> Self {
        Self {
            channel: overrides.channel.clone(),
            username: overrides.username.clone(),
            icon_emoji: overrides.icon_emoji.clone(),
            icon_url: overrides.icon_url.clone(),
            attachments: vec![attachment],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
