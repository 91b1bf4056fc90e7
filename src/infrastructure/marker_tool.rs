//! 标记处理工具 - 基础设施层
//!
//! 持有外部工具（默认 unifdef）的调用方式，只暴露"按 SOLUTION 开关处理一个文件"的能力

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppResult, FileError, ToolError};

/// unifdef 的退出码：0 表示未改动，1 表示有改动，2 表示出错
const ACCEPTED_EXIT_CODES: [i32; 2] = [0, 1];

/// 标记处理工具
///
/// 职责：
/// - 持有工具名和额外宏定义
/// - 启动时检查工具是否存在
/// - 不认识题目 / 输出版本
pub struct MarkerTool {
    program: String,
    extra_defines: Vec<String>,
}

impl MarkerTool {
    pub fn new(program: impl Into<String>, extra_defines: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_defines,
        }
    }

    /// 以 `--help` 调用一次工具，只关心能否启动
    pub async fn check_available(&self) -> Result<(), ToolError> {
        let status = Command::new(&self.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => {
                debug!("{} --help 退出状态: {}", self.program, status);
                Ok(())
            }
            Err(source) => Err(ToolError::NotFound {
                program: self.program.clone(),
                source,
            }),
        }
    }

    /// 工具参数（不含程序名）
    pub fn args(&self, input: &Path, keep_solution: bool) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.extra_defines.len() + 2);
        args.push(format!("-DSOLUTION={}", u8::from(keep_solution)).into());
        args.extend(
            self.extra_defines
                .iter()
                .map(|define| OsString::from(format!("-D{}", define))),
        );
        args.push(input.as_os_str().to_os_string());
        args
    }

    /// 完整命令行，仅用于日志
    pub fn command_line(&self, input: &Path, keep_solution: bool) -> String {
        std::iter::once(self.program.clone())
            .chain(
                self.args(input, keep_solution)
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string()),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 处理 `input`，把工具的标准输出整体写入 `output`
    ///
    /// 返回写入的字节数
    pub async fn resolve(
        &self,
        input: &Path,
        keep_solution: bool,
        output: &Path,
    ) -> AppResult<usize> {
        let result = Command::new(&self.program)
            .args(self.args(input, keep_solution))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ToolError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        let accepted = result
            .status
            .code()
            .map(|code| ACCEPTED_EXIT_CODES.contains(&code))
            .unwrap_or(false);

        if !accepted {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                input: input.to_path_buf(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            }
            .into());
        }

        fs::write(output, &result.stdout)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: output.to_path_buf(),
                source,
            })?;

        Ok(result.stdout.len())
    }
}
