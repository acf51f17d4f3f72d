// ==========================================
// 批次腌制排产系统 - 日志输出
// ==========================================
// 过滤器取自 RUST_LOG，未设置时为 info
// 例如: RUST_LOG=lot_intake_aps::engine=debug
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 终端可读格式（命令行默认）
///
/// ```no_run
/// lot_intake_aps::logging::init();
/// tracing::info!(lots = 12, "开始排产");
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// JSON 行格式，附带当前 span 字段（run_id 等）
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(true)
        .init();
}

/// 测试用: debug 级别，输出交给测试框架捕获；可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("lot_intake_aps=debug"))
        .with_test_writer()
        .try_init();
}
