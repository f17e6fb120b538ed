//! 调用上下文 - GitHub Actions 注入的 `GITHUB_*` 环境变量
//!
//! 只在入口读取一次，之后作为普通值传给 composer。

use crate::error::{NotifyError, Result};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// 本次调用的身份与位置信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// owner/repo
    pub repository: String,
    pub run_id: u64,
    /// 触发 commit
    pub sha: String,
    pub event_name: String,
    pub workflow: String,
    pub actor: String,
    pub server_url: String,
}

impl InvocationContext {
    /// 从进程环境读取
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key -> value 查找函数读取（测试用）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &'static str| {
            get(key).ok_or_else(|| NotifyError::Config(format!("{} is not set", key)))
        };

        let repository = require("GITHUB_REPOSITORY")?;
        if repository.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(NotifyError::Config(format!(
                "GITHUB_REPOSITORY must be owner/repo, got '{}'",
                repository
            )));
        }

        let run_id = require("GITHUB_RUN_ID")?;
        let run_id = run_id.parse::<u64>().map_err(|_| {
            NotifyError::Config(format!("GITHUB_RUN_ID is not a number: '{}'", run_id))
        })?;

        Ok(Self {
            repository,
            run_id,
            sha: require("GITHUB_SHA")?,
            event_name: require("GITHUB_EVENT_NAME")?,
            workflow: get("GITHUB_WORKFLOW").unwrap_or_default(),
            actor: require("GITHUB_ACTOR")?,
            server_url: get("GITHUB_SERVER_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
        })
    }

    pub fn actor_link(&self) -> String {
        format!("{}/{}", self.server_url, self.actor)
    }

    pub fn actor_avatar(&self) -> String {
        format!("{}/{}.png?size=32", self.server_url, self.actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_RUN_ID", "42"),
            ("GITHUB_SHA", "deadbeefcafe"),
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_WORKFLOW", "CI"),
            ("GITHUB_ACTOR", "mona"),
        ])
    }

    #[test]
    fn test_from_lookup() {
        let vars = full_env();
        let ctx = InvocationContext::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(ctx.repository, "octo/widgets");
        assert_eq!(ctx.run_id, 42);
        assert_eq!(ctx.server_url, DEFAULT_SERVER_URL);
        assert_eq!(ctx.actor_link(), "https://github.com/mona");
        assert_eq!(ctx.actor_avatar(), "https://github.com/mona.png?size=32");
    }

    #[test]
    fn test_missing_variable() {
        let mut vars = full_env();
        vars.remove("GITHUB_RUN_ID");
        let err = InvocationContext::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("GITHUB_RUN_ID"));
    }

    #[test]
    fn test_invalid_run_id_and_repository() {
        let mut vars = full_env();
        vars.insert("GITHUB_RUN_ID".to_string(), "abc".to_string());
        assert!(InvocationContext::from_lookup(|k| vars.get(k).cloned()).is_err());

        let mut vars = full_env();
        vars.insert("GITHUB_REPOSITORY".to_string(), "widgets".to_string());
        assert!(InvocationContext::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn test_enterprise_server_url() {
        let mut vars = full_env();
        vars.insert(
            "GITHUB_SERVER_URL".to_string(),
            "https://ghe.example.com/".to_string(),
        );
        let ctx = InvocationContext::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(ctx.actor_link(), "https://ghe.example.com/mona");
    }
}
