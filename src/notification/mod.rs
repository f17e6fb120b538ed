//! 通知层 - 分级、耗时格式化、消息组装与 webhook 发送
//!
//! 数据只向前流动：jobs -> severity -> composer -> webhook。
//!
//! # 使用示例
//! ```ignore
//! use ci_notify::notification::{MessageComposer, WebhookClient};
//!
//! let (level, payload) = MessageComposer::new(&ctx, &options).build(&report);
//! client.send(&payload).await?;
//! ```

pub mod channel;
pub mod composer;
pub mod duration;
pub mod payload;
pub mod severity;
pub mod webhook;

pub use channel::SendResult;
pub use composer::{conclusion_icon, job_fields, MessageComposer};
pub use duration::{format_duration, format_seconds};
pub use payload::{Attachment, ChannelOverrides, Field, SlackPayload};
pub use severity::{aggregate, classify, should_include_jobs, JobInclusion, SeverityLevel};
pub use webhook::{WebhookClient, WebhookConfig};
