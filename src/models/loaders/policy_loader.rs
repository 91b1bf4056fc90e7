use crate::error::ConfigError;
use crate::models::policy::HandlingPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    extensions: HashMap<String, HandlingPolicy>,
}

/// 从 TOML 文件加载扩展名策略覆盖项
///
/// ```toml
/// [extensions]
/// cxx = "resolve_markers"
/// py = "verbatim"
/// ```
pub async fn load_policy_overrides(policy_path: &Path) -> Result<HashMap<String, HandlingPolicy>> {
    let content = fs::read_to_string(policy_path)
        .await
        .with_context(|| format!("无法读取策略文件: {}", policy_path.display()))?;

    let file: PolicyFile = toml::from_str(&content).map_err(|e| ConfigError::InvalidPolicyFile {
        path: policy_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut overrides = HashMap::with_capacity(file.extensions.len());
    for (extension, policy) in file.extensions {
        // 允许写成 ".cxx"
        let extension = extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(ConfigError::InvalidPolicyFile {
                path: policy_path.to_path_buf(),
                message: "扩展名不能为空".to_string(),
            }
            .into());
        }
        overrides.insert(extension, policy);
    }

    tracing::info!("已加载 {} 条扩展名策略覆盖", overrides.len());
    Ok(overrides)
}
