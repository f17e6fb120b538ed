//! 消息组装 - 把 run / commit / jobs 渲染成一个 Slack attachment
//!
//! 纯函数，不做 I/O：同样的输入总是得到同样的输出。

use super::duration::format_duration;
use super::payload::{Attachment, Field, SlackPayload};
use super::severity::{classify, reportable_jobs, SeverityLevel};
use crate::config::ComposeOptions;
use crate::github::client::RunReport;
use crate::github::context::InvocationContext;
use crate::github::types::{Conclusion, Job, PullRequestRef};

pub const FOOTER_ICON: &str = "https://github.githubassets.com/favicon.ico";

/// Job 结论对应的图标
pub fn conclusion_icon(conclusion: Option<&Conclusion>) -> &'static str {
    match conclusion {
        Some(Conclusion::Success) => "✓",
        Some(Conclusion::Cancelled) => "⃠",
        Some(Conclusion::Skipped) => "✗",
        Some(Conclusion::Failure) | Some(Conclusion::Other(_)) | None => "✗",
    }
}

/// Job 自身的耗时；缺失的时间戳用另一端补齐
fn job_duration(job: &Job) -> String {
    match (job.started_at, job.completed_at) {
        (Some(start), Some(end)) => format_duration(start, end),
        (Some(t), None) | (None, Some(t)) => format_duration(t, t),
        (None, None) => "0s".to_string(),
    }
}

/// 每个 job 一个短字段，顺序与输入一致
pub fn job_fields(jobs: &[&Job]) -> Vec<Field> {
    jobs.iter()
        .map(|job| {
            Field::short(format!(
                "{} <{}|{}> ({})",
                conclusion_icon(job.conclusion.as_ref()),
                job.html_url,
                job.name,
                job_duration(job)
            ))
        })
        .collect()
}

fn pull_request_title(repo_html: &str, pr: &PullRequestRef) -> String {
    let label = if pr.title.is_empty() {
        format!("#{}", pr.number)
    } else {
        format!("#{} {}", pr.number, pr.title)
    };
    format!(
        "<{}/pull/{}|{}> from `{}` to `{}`",
        repo_html, pr.number, label, pr.head.git_ref, pr.base.git_ref
    )
}

pub struct MessageComposer<'a> {
    context: &'a InvocationContext,
    options: &'a ComposeOptions,
}

impl<'a> MessageComposer<'a> {
    pub fn new(context: &'a InvocationContext, options: &'a ComposeOptions) -> Self {
        Self { context, options }
    }

    /// 标题：有 PR 时只用第一个 PR，否则为 事件 + 分支 + commit
    pub fn title(&self, report: &RunReport) -> String {
        let repo_html = &report.run.repository.html_url;
        if let Some(pr) = report.pull_requests.first() {
            return pull_request_title(repo_html, pr);
        }

        let branch = &report.run.head_branch;
        format!(
            "`{}` on <{}/tree/{}|{}> <{}|{}>",
            self.context.event_name,
            repo_html,
            branch,
            branch,
            report.commit.html_url,
            report.commit.short_sha()
        )
    }

    pub fn text(&self, report: &RunReport) -> String {
        let run = &report.run;
        let workflow = if self.context.workflow.is_empty() {
            run.name.as_deref().unwrap_or_default()
        } else {
            self.context.workflow.as_str()
        };
        let mut text = format!(
            "{} <{}|#{}> completed in *{}*",
            workflow,
            run.html_url,
            run.run_number,
            format_duration(run.created_at, run.updated_at)
        );

        if self.options.include_commit_message {
            if let Some(message) = report.commit.message() {
                text.push_str("\nCommit: ");
                text.push_str(message);
            }
        }
        text
    }

    /// 组装最终载荷；`fields` 为空表示不展示 job 明细
    pub fn compose(&self, report: &RunReport, level: SeverityLevel, fields: Vec<Field>) -> SlackPayload {
        let repo = &report.run.repository;
        let attachment = Attachment {
            mrkdwn_in: vec!["text".to_string()],
            color: self.options.colors.resolve(level),
            author_icon: self.context.actor_avatar(),
            author_link: self.context.actor_link(),
            author_name: self.context.actor.clone(),
            title: self.title(report),
            text: self.text(report),
            fields,
            footer_icon: FOOTER_ICON.to_string(),
            footer: format!("<{}|{}>", repo.html_url, repo.full_name),
        };
        SlackPayload::new(attachment, &self.options.overrides)
    }

    /// 分级、按策略决定是否带 job 字段，然后组装
    pub fn build(&self, report: &RunReport) -> (SeverityLevel, SlackPayload) {
        let (level, include) = classify(&report.jobs, self.options.include_jobs);
        let fields = if include {
            job_fields(&reportable_jobs(&report.jobs))
        } else {
            Vec::new()
        };
        (level, self.compose(report, level, fields))
    }
}
