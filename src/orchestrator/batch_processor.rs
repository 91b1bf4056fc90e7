//! 批量题目处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责按清单逐题处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、检查外部工具、加载扩展名策略
//! 2. **加载清单**：读取 JSON 清单并解析题目目录
//! 3. **顺序处理**：逐题委托 ProblemFlow，一题失败不影响后续题目
//! 4. **全局统计**：汇总所有题目的处理结果，写入运行日志
//!
//! 所有操作都是顺序执行的，同一作业目录不支持并发运行。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::{resolve_against, Config};
use crate::error::{AppError, ConfigError};
use crate::infrastructure::MarkerTool;
use crate::models::{load_manifest, load_policy_overrides, Manifest, PolicyTable, Problem};
use crate::services::FileDeployer;
use crate::utils::logging;
use crate::workflow::{ProblemCtx, ProblemFlow, ProblemStats};

/// 应用主结构
pub struct App {
    config: Config,
    base_dir: PathBuf,
    log_file: PathBuf,
    flow: ProblemFlow,
}

/// 一次运行的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub migrated: usize,
    pub resolved: usize,
    pub copied: usize,
}

impl RunStats {
    fn record(&mut self, stats: &ProblemStats) {
        self.succeeded += 1;
        self.migrated += usize::from(stats.migrated);
        self.resolved += stats.resolved;
        self.copied += stats.copied;
    }
}

impl App {
    /// 初始化应用
    ///
    /// 外部工具不可用时返回 `ToolError::NotFound`，此时尚未触碰任何题目目录
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        let tool = MarkerTool::new(config.marker_tool.clone(), config.extra_defines.clone());
        tool.check_available().await.map_err(AppError::from)?;

        let policies = match config.resolve_policy_path() {
            Some(path) => PolicyTable::with_overrides(load_policy_overrides(&path).await?),
            None => PolicyTable::new(),
        };

        let base_dir = config.resolve_base_dir();
        let log_file = resolve_against(&base_dir, Path::new(&config.output_log_file));
        logging::init_log_file(&log_file)
            .with_context(|| format!("无法创建运行日志: {}", log_file.display()))?;

        logging::log_startup(&config, &base_dir, &policies.marker_extensions());

        Ok(Self {
            config,
            base_dir,
            log_file,
            flow: ProblemFlow::new(FileDeployer::new(tool, policies)),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        let manifest_path = self.config.resolve_manifest_path();
        let manifest = load_manifest(&manifest_path).await.map_err(AppError::from)?;

        logging::log_manifest_loaded(
            &manifest,
            &manifest.assignment_root(&self.base_dir),
            &manifest.working_path(&self.base_dir),
        );

        let problems = self.select_problems(&manifest)?;
        if problems.is_empty() {
            warn!("⚠️ 清单中没有需要处理的题目，程序结束");
            return Ok(RunStats::default());
        }

        let stats = self.process_all(&problems).await?;
        logging::print_final_stats(&stats, &self.log_file);

        Ok(stats)
    }

    /// 按 `--problem` 过滤清单中的题目
    fn select_problems(&self, manifest: &Manifest) -> Result<Vec<Problem>> {
        let problems = manifest.problems(&self.base_dir);
        if self.config.problem_filter.is_empty() {
            return Ok(problems);
        }

        let key = |name: &str| name.trim_end_matches('/').to_string();
        for wanted in &self.config.problem_filter {
            if !problems.iter().any(|p| key(&p.name) == key(wanted)) {
                return Err(AppError::from(ConfigError::UnknownProblem(wanted.clone())).into());
            }
        }

        Ok(problems
            .into_iter()
            .filter(|p| {
                self.config
                    .problem_filter
                    .iter()
                    .any(|wanted| key(wanted) == key(&p.name))
            })
            .collect())
    }

    /// 逐题处理
    async fn process_all(&self, problems: &[Problem]) -> Result<RunStats> {
        let mut stats = RunStats {
            total: problems.len(),
            ..Default::default()
        };

        for (idx, problem) in problems.iter().enumerate() {
            let ctx = ProblemCtx::new(problem.name.clone(), idx + 1, problems.len());
            logging::log_problem_start(&ctx, &problem.dir);

            match self.flow.run(problem, &ctx).await {
                Ok(problem_stats) => {
                    stats.record(&problem_stats);
                    logging::append_log(
                        &self.log_file,
                        &format!(
                            "✓ {} 标记处理 {} / 复制 {}",
                            problem.name, problem_stats.resolved, problem_stats.copied
                        ),
                    )?;
                }
                Err(e) => {
                    error!("{} ❌ 处理失败: {}", ctx, e);
                    stats.failed += 1;
                    logging::append_log(&self.log_file, &format!("✗ {} {}", problem.name, e))?;
                }
            }
        }

        info!(
            "共 {} 道题目, 成功 {}, 失败 {}",
            stats.total, stats.succeeded, stats.failed
        );
        Ok(stats)
    }
}
