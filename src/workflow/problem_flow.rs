//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 确认 mastersolution_tagged 存在（必要时由旧的 mastersolution 改名而来）
//! 2. 删除并重建 templates / mysolution / mastersolution
//! 3. 列出 mastersolution_tagged 下的条目
//! 4. 每个条目部署三次：答案版（SOLUTION=1）、模板版与个人版（SOLUTION=0）

use tracing::{debug, info, warn};

use crate::error::{AppResult, ProblemError};
use crate::infrastructure::fs_ops;
use crate::models::{FileEntry, Problem, Variant};
use crate::services::{DeployOutcome, FileDeployer};
use crate::workflow::problem_ctx::ProblemCtx;

/// 单道题目的处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemStats {
    /// 本次是否把旧布局改名成了 mastersolution_tagged
    pub migrated: bool,
    /// 源目录中的条目数
    pub entries: usize,
    /// 经过标记处理的输出文件数
    pub resolved: usize,
    /// 原样复制的文件数（目录按其中的文件计）
    pub copied: usize,
}

impl ProblemStats {
    fn record(&mut self, outcome: DeployOutcome) {
        match outcome {
            DeployOutcome::Resolved { .. } => self.resolved += 1,
            DeployOutcome::CopiedFile { .. } => self.copied += 1,
            DeployOutcome::CopiedTree { files } => self.copied += files,
        }
    }
}

/// 题目处理流程
///
/// - 编排单道题的目录准备与条目部署
/// - 只依赖业务能力（FileDeployer）
pub struct ProblemFlow {
    deployer: FileDeployer,
}

impl ProblemFlow {
    pub fn new(deployer: FileDeployer) -> Self {
        Self { deployer }
    }

    pub async fn run(&self, problem: &Problem, ctx: &ProblemCtx) -> AppResult<ProblemStats> {
        let mut stats = ProblemStats {
            migrated: self.ensure_tagged_source(problem, ctx).await?,
            ..Default::default()
        };

        // 输出目录必须在任何部署之前重建
        for variant in Variant::RESET_ORDER {
            let dir = problem.output_dir(variant);
            fs_ops::recreate_dir(&dir).await?;
            debug!("{} 已重建 {}", ctx, dir.display());
        }

        let source_dir = problem.tagged_dir();
        let entries: Vec<FileEntry> = fs_ops::list_entries(&source_dir)
            .await?
            .into_iter()
            .map(|listed| {
                if listed.is_dir {
                    FileEntry::Directory(listed.name)
                } else {
                    FileEntry::File(listed.name)
                }
            })
            .collect();
        stats.entries = entries.len();

        if entries.is_empty() {
            warn!("{} ⚠️ {} 为空", ctx, source_dir.display());
        }

        for entry in &entries {
            for variant in Variant::DEPLOY_ORDER {
                let outcome = self
                    .deployer
                    .deploy(entry, &source_dir, &problem.output_dir(variant), variant)
                    .await?;
                stats.record(outcome);
            }
        }

        info!(
            "{} ✓ 完成: {} 个条目, 标记处理 {} 个文件, 复制 {} 个文件",
            ctx, stats.entries, stats.resolved, stats.copied
        );

        Ok(stats)
    }

    /// 确保 mastersolution_tagged 存在
    ///
    /// 返回是否发生了改名
    async fn ensure_tagged_source(&self, problem: &Problem, ctx: &ProblemCtx) -> AppResult<bool> {
        let tagged = problem.tagged_dir();
        if fs_ops::exists(&tagged).await {
            return Ok(false);
        }

        let legacy = problem.legacy_dir();
        if !fs_ops::exists(&legacy).await {
            return Err(ProblemError::TaggedSourceMissing {
                problem_dir: problem.dir.clone(),
            }
            .into());
        }

        info!(
            "{} 📁 将 '{}' 改名为 '{}'",
            ctx,
            legacy.display(),
            tagged.display()
        );
        fs_ops::rename(&legacy, &tagged).await?;
        Ok(true)
    }
}
