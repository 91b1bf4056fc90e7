//! 扩展名 → 处理策略

use phf::phf_map;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::models::entry::FileEntry;

/// 条目的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingPolicy {
    /// 原样复制
    Verbatim,
    /// 交给外部工具处理 SOLUTION 标记
    ResolveMarkers,
}

/// 内置策略表，未列出的扩展名一律原样复制
static BUILTIN_POLICIES: phf::Map<&'static str, HandlingPolicy> = phf_map! {
    // C / C++ 源文件
    "c" => HandlingPolicy::ResolveMarkers,
    "cc" => HandlingPolicy::ResolveMarkers,
    "cpp" => HandlingPolicy::ResolveMarkers,
    // 头文件
    "h" => HandlingPolicy::ResolveMarkers,
    "hpp" => HandlingPolicy::ResolveMarkers,
    // 构建脚本
    "cmake" => HandlingPolicy::ResolveMarkers,
    // 脚本
    "py" => HandlingPolicy::ResolveMarkers,
};

/// 策略表：内置表加上配置文件中的覆盖项
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    overrides: HashMap<String, HandlingPolicy>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, HandlingPolicy>) -> Self {
        Self { overrides }
    }

    /// 查询扩展名（区分大小写，不含 `.`）
    pub fn policy_for_extension(&self, extension: &str) -> HandlingPolicy {
        self.overrides
            .get(extension)
            .or_else(|| BUILTIN_POLICIES.get(extension))
            .copied()
            .unwrap_or(HandlingPolicy::Verbatim)
    }

    /// 条目分类：目录和整树总是原样复制
    pub fn classify(&self, entry: &FileEntry) -> HandlingPolicy {
        match entry {
            FileEntry::File(name) => Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| self.policy_for_extension(ext))
                .unwrap_or(HandlingPolicy::Verbatim),
            FileEntry::Directory(_) | FileEntry::WholeTree => HandlingPolicy::Verbatim,
        }
    }

    /// 所有需要标记处理的扩展名（用于启动日志）
    pub fn marker_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = BUILTIN_POLICIES
            .keys()
            .map(|ext| ext.to_string())
            .chain(self.overrides.keys().cloned())
            .filter(|ext| self.policy_for_extension(ext) == HandlingPolicy::ResolveMarkers)
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }
}
