//! CI Notify CLI
//!
//! 在 workflow 的最后一个 job 中运行，把本次 run 的结果发到 Slack。

use clap::Parser;
use ci_notify::cli::{handle_notify, install_panic_hook, is_informational, report_fatal, NotifyArgs};
use ci_notify::SendResult;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ci-notify")]
#[command(about = "CI Notify - 发送 GitHub Actions workflow 结果到 Slack")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    notify: NotifyArgs,
}

#[tokio::main]
async fn main() {
    // 初始化 tracing 日志系统
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ci_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    install_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => report_fatal(e.to_string().trim()),
    };

    match handle_notify(cli.notify).await {
        Ok(SendResult::Sent) => info!("Done"),
        Ok(SendResult::Skipped(reason)) => info!(%reason, "Done without sending"),
        Err(e) => report_fatal(&format!("{:#}", e)),
    }
}
