//! 题目处理上下文
//!
//! 封装"正在处理清单中的第几道题"这一信息，仅用于日志

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct ProblemCtx {
    /// 题目名（清单中的原始写法）
    pub name: String,

    /// 在本次运行中的序号（从1开始）
    pub index: usize,

    /// 本次运行的题目总数
    pub total: usize,
}

impl ProblemCtx {
    pub fn new(name: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            name: name.into(),
            index,
            total,
        }
    }
}

impl Display for ProblemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 {}/{} {}]", self.index, self.total, self.name)
    }
}
