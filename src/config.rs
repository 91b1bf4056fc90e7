use crate::error::ConfigError;
use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 清单文件路径（相对路径基于 base_dir 解析）
    pub manifest_path: PathBuf,
    /// 所有相对路径的基准目录，未设置时取清单文件所在目录
    pub base_dir: Option<PathBuf>,
    /// 外部标记处理工具
    pub marker_tool: String,
    /// 额外传给工具的宏定义（NAME 或 NAME=VALUE）
    pub extra_defines: Vec<String>,
    /// 扩展名策略文件（TOML）
    pub policy_file: Option<PathBuf>,
    /// 只处理这些题目，空表示全部
    pub problem_filter: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("assignment_list.json"),
            base_dir: None,
            marker_tool: "unifdef".to_string(),
            extra_defines: Vec::new(),
            policy_file: None,
            problem_filter: Vec::new(),
            verbose_logging: false,
            output_log_file: "deploy_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            manifest_path: std::env::var("ASSIGNMENT_MANIFEST").map(PathBuf::from).unwrap_or(default.manifest_path),
            base_dir: std::env::var("DEPLOY_BASE_DIR").ok().map(PathBuf::from).or(default.base_dir),
            marker_tool: std::env::var("MARKER_TOOL").unwrap_or(default.marker_tool),
            extra_defines: std::env::var("MARKER_DEFINES").ok().map(|v| split_list(&v)).unwrap_or(default.extra_defines),
            policy_file: std::env::var("POLICY_FILE").ok().map(PathBuf::from).or(default.policy_file),
            problem_filter: default.problem_filter,
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 校验额外宏定义
    pub fn validate(&self) -> Result<()> {
        let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(=.*)?$")?;
        for define in &self.extra_defines {
            if !pattern.is_match(define) {
                return Err(ConfigError::InvalidDefine(define.clone()).into());
            }
            let name = define.split('=').next().unwrap_or_default();
            if name == "SOLUTION" {
                return Err(ConfigError::ReservedDefine.into());
            }
        }
        Ok(())
    }

    /// 解析基准目录
    ///
    /// 显式配置优先；否则使用清单文件所在目录（清单路径相对于进程当前目录）。
    /// 不修改进程的当前工作目录。
    pub fn resolve_base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => match self.manifest_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    /// 清单文件的实际位置
    pub fn resolve_manifest_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => resolve_against(base, &self.manifest_path),
            None => self.manifest_path.clone(),
        }
    }

    /// 策略文件的实际位置
    pub fn resolve_policy_path(&self) -> Option<PathBuf> {
        let base = self.resolve_base_dir();
        self.policy_file
            .as_ref()
            .map(|path| resolve_against(&base, path))
    }
}

/// 相对路径拼接到基准目录上，绝对路径保持不变
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
