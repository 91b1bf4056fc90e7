//! tracing 初始化

use tracing_subscriber::EnvFilter;

/// 初始化日志输出
///
/// 优先使用 `RUST_LOG`，否则详细模式为 debug、普通模式为 info。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
