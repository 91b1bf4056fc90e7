//! 作业清单与题目目录模型

use serde::Deserialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::config::resolve_against;

/// 带标记的源目录名
pub const TAGGED_DIR: &str = "mastersolution_tagged";

/// 旧布局下的源目录名（与答案输出目录同名）
pub const LEGACY_DIR: &str = "mastersolution";

/// 作业清单
///
/// 对应 JSON 中的 `assignment_dir` / `working_dir` / `Problems`，其他字段忽略。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// 作业根目录（以 `/` 结尾）
    pub assignment_dir: String,
    /// 工作目录（以 `/` 结尾）
    pub working_dir: String,
    /// 题目子目录名，按清单顺序
    #[serde(rename = "Problems")]
    pub problems: Vec<String>,
}

impl Manifest {
    /// 让两个目录字符串都以路径分隔符结尾
    pub fn normalized(mut self) -> Self {
        ensure_trailing_separator(&mut self.assignment_dir);
        ensure_trailing_separator(&mut self.working_dir);
        self
    }

    /// 作业根目录的实际路径
    pub fn assignment_root(&self, base: &Path) -> PathBuf {
        resolve_against(base, Path::new(&self.assignment_dir))
    }

    /// 工作目录的实际路径
    pub fn working_path(&self, base: &Path) -> PathBuf {
        resolve_against(base, Path::new(&self.working_dir))
    }

    /// 清单中的全部题目
    pub fn problems(&self, base: &Path) -> Vec<Problem> {
        let root = self.assignment_root(base);
        self.problems
            .iter()
            .map(|name| Problem::new(name.clone(), root.join(name)))
            .collect()
    }
}

fn ensure_trailing_separator(dir: &mut String) {
    if !dir.ends_with('/') {
        dir.push('/');
    }
}

/// 一道题目（一个题目目录）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub name: String,
    pub dir: PathBuf,
}

impl Problem {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    pub fn tagged_dir(&self) -> PathBuf {
        self.dir.join(TAGGED_DIR)
    }

    pub fn legacy_dir(&self) -> PathBuf {
        self.dir.join(LEGACY_DIR)
    }

    pub fn output_dir(&self, variant: Variant) -> PathBuf {
        self.dir.join(variant.dir_name())
    }
}

/// 输出版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 答案版本：保留 SOLUTION 代码块
    Solution,
    /// 模板版本：删除 SOLUTION 代码块
    Template,
    /// 学生个人版本：与模板相同
    Personal,
}

impl Variant {
    /// 目录重建顺序
    pub const RESET_ORDER: [Variant; 3] = [Variant::Template, Variant::Personal, Variant::Solution];

    /// 部署顺序
    pub const DEPLOY_ORDER: [Variant; 3] = [Variant::Solution, Variant::Template, Variant::Personal];

    pub fn dir_name(self) -> &'static str {
        match self {
            Variant::Solution => LEGACY_DIR,
            Variant::Template => "templates",
            Variant::Personal => "mysolution",
        }
    }

    /// 是否保留答案代码块（对应 `-DSOLUTION=1`）
    pub fn keeps_solution(self) -> bool {
        matches!(self, Variant::Solution)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}
