//! 文件部署服务 - 业务能力层
//!
//! 只负责"把一个条目部署到一个输出目录"，不关心题目流程

use std::path::Path;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::{fs_ops, MarkerTool};
use crate::models::{FileEntry, HandlingPolicy, PolicyTable, Variant};

/// 单次部署的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// 经过标记处理，写入的字节数
    Resolved { bytes: usize },
    /// 原样复制了一个文件
    CopiedFile { bytes: u64 },
    /// 原样复制了一棵目录树
    CopiedTree { files: usize },
}

/// 文件部署服务
///
/// 职责：
/// - 按扩展名策略决定标记处理还是原样复制
/// - 处理单个条目到单个输出目录
/// - 不创建 / 清空输出目录
pub struct FileDeployer {
    tool: MarkerTool,
    policies: PolicyTable,
}

impl FileDeployer {
    pub fn new(tool: MarkerTool, policies: PolicyTable) -> Self {
        Self { tool, policies }
    }

    /// 把 `source_dir` 中的 `entry` 部署到 `dest_dir`
    ///
    /// # 参数
    /// - `entry`: 条目
    /// - `source_dir`: mastersolution_tagged 目录
    /// - `dest_dir`: 输出目录（已存在）
    /// - `variant`: 输出版本，决定 SOLUTION 开关
    pub async fn deploy(
        &self,
        entry: &FileEntry,
        source_dir: &Path,
        dest_dir: &Path,
        variant: Variant,
    ) -> AppResult<DeployOutcome> {
        match self.policies.classify(entry) {
            HandlingPolicy::ResolveMarkers => {
                self.resolve(entry, source_dir, dest_dir, variant).await
            }
            HandlingPolicy::Verbatim => self.copy(entry, source_dir, dest_dir).await,
        }
    }

    async fn resolve(
        &self,
        entry: &FileEntry,
        source_dir: &Path,
        dest_dir: &Path,
        variant: Variant,
    ) -> AppResult<DeployOutcome> {
        let input = source_dir.join(entry.name());
        let output = dest_dir.join(entry.name());
        let keep_solution = variant.keeps_solution();

        info!("正在生成 {} 中的 '{}'", variant, entry);
        info!("{}", self.tool.command_line(&input, keep_solution));

        let bytes = self.tool.resolve(&input, keep_solution, &output).await?;
        Ok(DeployOutcome::Resolved { bytes })
    }

    async fn copy(
        &self,
        entry: &FileEntry,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> AppResult<DeployOutcome> {
        let from = source_dir.join(entry.name());
        let to = dest_dir.join(entry.name());
        info!("复制 '{}' 到 '{}'", from.display(), to.display());

        let outcome = match entry {
            FileEntry::WholeTree => DeployOutcome::CopiedTree {
                files: fs_ops::copy_tree(source_dir, dest_dir).await?,
            },
            FileEntry::Directory(_) => {
                if fs_ops::remove_dir_if_exists(&to).await? {
                    debug!("已删除旧目录: {}", to.display());
                }
                DeployOutcome::CopiedTree {
                    files: fs_ops::copy_tree(&from, &to).await?,
                }
            }
            FileEntry::File(_) => DeployOutcome::CopiedFile {
                bytes: fs_ops::copy_file_preserving(&from, &to).await?,
            },
        };

        Ok(outcome)
    }
}
