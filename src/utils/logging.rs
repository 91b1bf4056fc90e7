//! 日志工具模块
//!
//! 提供启动横幅、统计输出和运行日志文件的辅助函数

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::models::Manifest;
use crate::orchestrator::RunStats;
use crate::workflow::ProblemCtx;

/// 初始化运行日志文件（覆盖旧内容）
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &Path) -> Result<()> {
    let log_header = format!(
        "{}\n作业部署日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向运行日志追加一行
pub fn append_log(log_file_path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, base_dir: &Path, marker_extensions: &[String]) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 作业部署");
    info!("📂 基准目录: {}", base_dir.display());
    info!("🔧 标记处理工具: {}", config.marker_tool);
    if !config.extra_defines.is_empty() {
        info!("🔧 额外宏定义: {}", config.extra_defines.join(", "));
    }
    info!("📄 标记处理的扩展名: {}", marker_extensions.join(", "));
    info!("{}", "=".repeat(60));
}

/// 记录清单加载信息
pub fn log_manifest_loaded(manifest: &Manifest, assignment_root: &Path, working_path: &Path) {
    info!("📁 在 '{}' 中查找题目", assignment_root.display());
    info!("📁 工作目录: {}", working_path.display());
    info!("✓ 清单中共有 {} 道题目\n", manifest.problems.len());
}

/// 记录单道题目开始
pub fn log_problem_start(ctx: &ProblemCtx, problem_dir: &Path) {
    info!("\n{}", "─".repeat(60));
    info!("{} 📦 开始处理 {}", ctx, problem_dir.display());
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 本次运行统计
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &RunStats, log_file_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.succeeded, stats.total);
    info!("❌ 失败: {}", stats.failed);
    if stats.migrated > 0 {
        info!("📁 旧布局改名: {}", stats.migrated);
    }
    info!("📝 标记处理文件: {}", stats.resolved);
    info!("📋 原样复制文件: {}", stats.copied);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path.display());
}
