//! # Assignment Deploy
//!
//! 从带 SOLUTION 标记的答案目录生成三份作业目录：
//! `mastersolution`（保留答案）、`templates`（删除答案）、`mysolution`（与模板相同）。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部工具调用与文件系统操作，只暴露能力
//! - `MarkerTool` - 唯一调用 unifdef 的地方
//! - `fs_ops` - 删除重建、递归复制、保留元数据的复制
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个条目
//! - `FileDeployer` - 按扩展名策略做标记处理或原样复制
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `ProblemCtx` - 上下文封装（题目名 + 序号）
//! - `ProblemFlow` - 流程编排（改名 → 重建目录 → 逐条目部署）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 加载清单，逐题处理并汇总统计
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::MarkerTool;
pub use models::{FileEntry, HandlingPolicy, Manifest, PolicyTable, Problem, Variant};
pub use orchestrator::{App, RunStats};
pub use services::{DeployOutcome, FileDeployer};
pub use workflow::{ProblemCtx, ProblemFlow, ProblemStats};
