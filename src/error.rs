use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 清单相关错误
    #[error("清单错误: {0}")]
    Manifest(#[from] ManifestError),
    /// 题目目录错误
    #[error("题目错误: {0}")]
    Problem(#[from] ProblemError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 外部标记处理工具错误
    #[error("工具错误: {0}")]
    Tool(#[from] ToolError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 清单加载错误
#[derive(Debug, Error)]
pub enum ManifestError {
    /// 清单文件不存在
    #[error("清单文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取清单失败
    #[error("读取清单失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败（包括缺少必需字段）
    #[error("清单解析失败 ({}): {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 题目目录错误
#[derive(Debug, Error)]
pub enum ProblemError {
    /// mastersolution_tagged 与 mastersolution 均不存在
    #[error("找不到带标记的源目录: {}", problem_dir.display())]
    TaggedSourceMissing { problem_dir: PathBuf },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取目录失败
    #[error("读取目录失败 ({}): {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 删除失败
    #[error("删除失败 ({}): {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 复制失败
    #[error("复制失败 ({} -> {}): {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 重命名失败
    #[error("重命名失败 ({} -> {}): {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 目标已存在（整树复制要求目标不存在）
    #[error("目标已存在: {}", path.display())]
    AlreadyExists { path: PathBuf },
}

/// 外部工具错误
#[derive(Debug, Error)]
pub enum ToolError {
    /// 找不到工具可执行文件
    #[error("找不到外部工具 '{program}'，请先安装")]
    NotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 启动进程失败
    #[error("启动 '{program}' 失败: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 工具返回错误状态
    #[error("'{program}' 处理 {} 失败 (状态: {status}): {stderr}", input.display())]
    Failed {
        program: String,
        input: PathBuf,
        status: String,
        stderr: String,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 宏定义格式不合法
    #[error("宏定义 '{0}' 不合法，应为 NAME 或 NAME=VALUE")]
    InvalidDefine(String),
    /// SOLUTION 由程序自身控制
    #[error("宏 SOLUTION 由程序控制，不能通过额外定义覆盖")]
    ReservedDefine,
    /// 清单中不存在的题目
    #[error("清单中没有题目: {0}")]
    UnknownProblem(String),
    /// 策略文件错误
    #[error("策略文件 {} 无效: {message}", path.display())]
    InvalidPolicyFile { path: PathBuf, message: String },
}

impl AppError {
    /// 是否为启动阶段的"工具缺失"错误
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, AppError::Tool(ToolError::NotFound { .. }))
    }
}

impl FileError {
    pub(crate) fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::ListFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::CreateFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn delete(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::DeleteFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn copy(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        FileError::CopyFailed {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
