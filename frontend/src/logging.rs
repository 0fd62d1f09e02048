//! 浏览器日志
//!
//! 安装 `tracing-subscriber` 的 fmt 订阅器，写入端用 `tracing-web`，
//! 每一行日志按级别转发到 `console.error` / `console.warn` / `console.log` 等。

use tracing::Level;
use tracing_web::MakeWebConsoleWriter;

/// 解析日志级别，无法识别时使用 INFO
pub fn parse_level(value: &str) -> Level {
    value.trim().parse().unwrap_or(Level::INFO)
}

/// 安装全局订阅器，重复调用是安全的
pub fn init_logging(level: &str) {
    // 浏览器里没有 std::time，省略时间戳
    let _ = tracing_subscriber::fmt()
        .with_writer(MakeWebConsoleWriter::new())
        .with_max_level(parse_level(level))
        .without_time()
        .with_target(false)
        .try_init();
}
