//! 错误分类
//!
//! 每条失败路径都终止本次调用，错误消息中不得出现 token 或 webhook URL。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// 缺少必填输入或输入非法，在任何网络请求之前返回
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API 返回非 2xx
    #[error("failed to fetch {resource}: HTTP {status}: {message}")]
    Fetch {
        resource: &'static str,
        status: u16,
        message: String,
    },

    /// 响应体无法解析
    #[error("failed to decode {resource}")]
    Decode {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 网络层失败（连接、超时等）
    #[error("{operation} failed")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 载荷无法序列化
    #[error("failed to encode notification payload")]
    Encode(#[source] serde_json::Error),

    /// webhook 拒绝了消息
    #[error("webhook rejected notification: HTTP {status}: {body}")]
    Delivery { status: u16, body: String },
}

impl NotifyError {
    /// 构造网络层错误，去掉 URL 以免泄露 webhook 地址
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        NotifyError::Transport {
            operation,
            source: source.without_url(),
        }
    }

    pub fn decode(resource: &'static str, source: reqwest::Error) -> Self {
        NotifyError::Decode {
            resource,
            source: source.without_url(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
