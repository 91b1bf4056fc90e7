//! 文件系统操作 - 基础设施层
//!
//! 递归复制、删除重建、保留元数据的单文件复制。所有操作都是破坏性的覆盖写入，
//! 没有临时文件再改名的原子保证。

use std::ffi::OsString;
use std::fs::FileTimes;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

use crate::error::FileError;

/// 目录中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub is_dir: bool,
}

/// 路径是否存在（不跟随符号链接）
pub async fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

/// 目录存在时递归删除
///
/// 返回是否真的删除了内容
pub async fn remove_dir_if_exists(path: &Path) -> Result<bool, FileError> {
    if !exists(path).await {
        return Ok(false);
    }
    fs::remove_dir_all(path)
        .await
        .map_err(|e| FileError::delete(path, e))?;
    Ok(true)
}

/// 删除后重新创建一个空目录
pub async fn recreate_dir(path: &Path) -> Result<(), FileError> {
    remove_dir_if_exists(path).await?;
    fs::create_dir_all(path)
        .await
        .map_err(|e| FileError::create(path, e))
}

/// 重命名目录
pub async fn rename(from: &Path, to: &Path) -> Result<(), FileError> {
    fs::rename(from, to)
        .await
        .map_err(|source| FileError::RenameFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}

/// 列出目录的直接子项，按名字排序
pub async fn list_entries(dir: &Path) -> Result<Vec<ListedEntry>, FileError> {
    let mut read_dir = fs::read_dir(dir).await.map_err(|e| FileError::list(dir, e))?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| FileError::list(dir, e))?
    {
        // 跟随符号链接判断类型，与递归复制的行为一致
        let is_dir = fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .map_err(|e| FileError::list(entry.path(), e))?;
        entries.push(ListedEntry {
            name: entry.file_name(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// 复制单个文件，保留权限和修改时间
///
/// 目标已存在时被覆盖。返回复制的字节数。
pub async fn copy_file_preserving(src: &Path, dst: &Path) -> Result<u64, FileError> {
    let bytes = fs::copy(src, dst)
        .await
        .map_err(|e| FileError::copy(src, dst, e))?;

    let metadata = fs::metadata(src)
        .await
        .map_err(|e| FileError::copy(src, dst, e))?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    let file = fs::File::open(dst)
        .await
        .map_err(|e| FileError::copy(src, dst, e))?
        .into_std()
        .await;
    file.set_times(times)
        .map_err(|e| FileError::copy(src, dst, e))?;

    Ok(bytes)
}

/// 递归复制整棵目录树，`dst` 必须不存在
///
/// 跟随符号链接，链接成环时报错。返回复制的文件数
pub async fn copy_tree(src: &Path, dst: &Path) -> Result<usize, FileError> {
    if exists(dst).await {
        return Err(FileError::AlreadyExists {
            path: dst.to_path_buf(),
        });
    }

    let mut created: Vec<(PathBuf, PathBuf)> = Vec::new();
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            FileError::list(path, e.into())
        })?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = if rel.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(rel)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(|e| FileError::create(&target, e))?;
            created.push((entry.path().to_path_buf(), target));
        } else {
            copy_file_preserving(entry.path(), &target).await?;
            copied += 1;
        }
    }

    // 目录权限最后再复制，避免只读目录挡住子项的写入
    for (from_dir, to_dir) in created.iter().rev() {
        let permissions = fs::metadata(from_dir)
            .await
            .map_err(|e| FileError::copy(from_dir, to_dir, e))?
            .permissions();
        fs::set_permissions(to_dir, permissions)
            .await
            .map_err(|e| FileError::copy(from_dir, to_dir, e))?;
    }

    Ok(copied)
}
