use crate::error::ManifestError;
use crate::models::manifest::Manifest;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载作业清单
///
/// 缺少 `assignment_dir` / `working_dir` / `Problems` 中任一字段都视为解析失败，
/// 多余字段忽略。两个目录字符串会补齐结尾的 `/`。
pub async fn load_manifest(manifest_path: &Path) -> Result<Manifest, ManifestError> {
    if !fs::try_exists(manifest_path).await.unwrap_or(false) {
        return Err(ManifestError::NotFound {
            path: manifest_path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(manifest_path)
        .await
        .map_err(|source| ManifestError::ReadFailed {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::ParseFailed {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let manifest = manifest.normalized();
    tracing::debug!(
        "清单已加载: {} 个题目, 作业目录 {}",
        manifest.problems.len(),
        manifest.assignment_dir
    );

    Ok(manifest)
}
