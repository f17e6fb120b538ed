//! 统一的失败出口
//!
//! 任何错误或 panic 都归一成一条 GitHub Actions `::error::` 注解并以退出码 1 结束。

use std::any::Any;
use tracing::error;

pub const UNKNOWN_ERROR: &str = "unknown error";

/// 转义成 workflow command 可接受的单行文本
pub fn annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}

/// 从 panic payload 中取出消息
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        UNKNOWN_ERROR
    }
}

/// `--help` / `--version` 不算失败，交给 clap 正常退出
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
    )
}

/// 输出失败报告并退出进程
pub fn report_fatal(message: &str) -> ! {
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR
    } else {
        message
    };
    error!(error = %message, "Notification failed");
    println!("{}", annotation(message));
    std::process::exit(1);
}

/// 安装 panic hook，panic 同样走统一出口
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        report_fatal(panic_message(info.payload()));
    }));
}
