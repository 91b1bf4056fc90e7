use std::ffi::{OsStr, OsString};
use std::fmt::Display;

/// 待部署的条目（相对于 mastersolution_tagged）
///
/// 名字保留操作系统原样的字节，非 UTF-8 的文件名也能找回原文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// 整个源目录树，字面形式为空字符串
    WholeTree,
    /// 子目录，字面形式以 `/` 结尾
    Directory(OsString),
    /// 普通文件
    File(OsString),
}

impl FileEntry {
    /// 按字面形式解析条目名
    pub fn parse(name: &str) -> Self {
        if name.is_empty() {
            FileEntry::WholeTree
        } else if let Some(dir) = name.strip_suffix('/') {
            FileEntry::Directory(dir.into())
        } else {
            FileEntry::File(name.into())
        }
    }

    /// 不带尾部分隔符的名字，整树时为空
    pub fn name(&self) -> &OsStr {
        match self {
            FileEntry::WholeTree => OsStr::new(""),
            FileEntry::Directory(name) | FileEntry::File(name) => name,
        }
    }
}

impl Display for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileEntry::WholeTree => Ok(()),
            FileEntry::Directory(name) => write!(f, "{}/", name.to_string_lossy()),
            FileEntry::File(name) => f.write_str(&name.to_string_lossy()),
        }
    }
}
