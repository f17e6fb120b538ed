//! Webhook 客户端模块
//!
//! 把组装好的载荷 POST 到配置的 webhook，只尝试一次，不重试。

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::channel::SendResult;
use super::payload::SlackPayload;
use crate::config::Secret;
use crate::error::{NotifyError, Result};

/// Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 目标 URL（敏感，不写日志）
    pub url: Secret,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
    /// 只打印不发送
    pub dry_run: bool,
}

/// Webhook 客户端
#[derive(Debug)]
pub struct WebhookClient {
    client: Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: WebhookConfig) -> Result<Self> {
        if config.url.expose().is_empty() {
            return Err(NotifyError::Config("webhook URL is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::transport("creating HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// 发送通知
    ///
    /// 2xx 视为成功，其余状态码连同响应体一起返回错误。
    pub async fn send(&self, payload: &SlackPayload) -> Result<SendResult> {
        if self.config.dry_run {
            let json = serde_json::to_string_pretty(payload).map_err(NotifyError::Encode)?;
            println!("{}", json);
            info!("Dry-run: notification not sent");
            return Ok(SendResult::Skipped("dry-run".to_string()));
        }

        debug!(attachments = payload.attachments.len(), "Sending notification");

        let response = self
            .client
            .post(self.config.url.expose())
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::transport("sending notification", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        info!(status = status.as_u16(), "Notification sent");
        Ok(SendResult::Sent)
    }
}
