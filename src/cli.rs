//! 命令行参数

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// 从带标记的答案生成 mastersolution / templates / mysolution
#[derive(Debug, Parser)]
#[command(name = "assignment-deploy", version)]
pub struct Cli {
    /// 作业清单（JSON）
    pub manifest: Option<PathBuf>,

    /// 相对路径的基准目录，默认为清单所在目录
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// 标记处理工具
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// 额外传给工具的宏定义，可重复
    #[arg(short = 'D', long = "define", value_name = "NAME[=VALUE]")]
    pub defines: Vec<String>,

    /// 扩展名策略文件（TOML）
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// 只处理指定题目，可重复
    #[arg(short, long = "problem", value_name = "NAME")]
    pub problems: Vec<String>,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(manifest) = self.manifest {
            config.manifest_path = manifest;
        }
        if let Some(base_dir) = self.base_dir {
            config.base_dir = Some(base_dir);
        }
        if let Some(tool) = self.tool {
            config.marker_tool = tool;
        }
        if !self.defines.is_empty() {
            config.extra_defines = self.defines;
        }
        if let Some(policy) = self.policy {
            config.policy_file = Some(policy);
        }
        config.problem_filter = self.problems;
        config.verbose_logging |= self.verbose;
        config
    }
}
