//! 集成测试公共工具：临时课程目录 + 假的 unifdef

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assert_cmd::Command;
use assignment_deploy::Config;
use tempfile::TempDir;
use walkdir::WalkDir;

/// 只理解 `#if SOLUTION` / `#else` / `#endif` 的最小替身，参数形式与 unifdef 相同
const FAKE_UNIFDEF: &str = r#"#!/bin/sh
sol=0
for arg; do
  case "$arg" in
    -DSOLUTION=1) sol=1 ;;
  esac
  last="$arg"
done
awk -v sol="$sol" '
/^#if SOLUTION/ { inblk = 1; keep = (sol == 1); next }
/^#else/ && inblk { keep = !keep; next }
/^#endif/ && inblk { inblk = 0; next }
!inblk || keep { print }
' "$last"
"#;

/// 输入路径含 `@MARKER@` 时像 unifdef 出错那样以状态 2 退出，否则交给 `@INNER@`
const FAILING_UNIFDEF: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  *@MARKER@*) echo "unifdef: $last: cannot open" >&2; exit 2 ;;
esac
exec "@INNER@" "$@"
"#;

pub const MAIN_CC: &str = "\
#include <iostream>

int main() {
#if SOLUTION
  std::cout << 42 << std::endl;
#else
  // TODO: your code here
#endif
  return 0;
}
";

pub const PLOT_PY: &str = "\
import numpy as np
#if SOLUTION
print(np.linspace(0, 1, 5))
#endif
";

pub const HELPER_H: &str = "#pragma once\nint helper();\n";
pub const CMAKE_LISTS: &str = "set(SOURCES main.cc helper.h)\n";
pub const VALUES_CSV: &str = "x,y\n0,1\n1,2\n";

/// 源目录布局
#[derive(Debug, Clone, Copy)]
pub enum Layout {
    /// 已有 mastersolution_tagged
    Tagged,
    /// 只有旧的 mastersolution
    Legacy,
}

/// 临时课程目录
pub struct Course {
    pub temp_dir: TempDir,
    pub tool: PathBuf,
}

impl Course {
    pub fn new(problems: &[(&str, Layout)]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tool = temp_dir.path().join("fake-unifdef");
        fs::write(&tool, FAKE_UNIFDEF).expect("Failed to write fake tool");
        make_executable(&tool);

        let course = Self { temp_dir, tool };
        course.write_manifest(&problems.iter().map(|(name, _)| *name).collect::<Vec<_>>());
        for (name, layout) in problems {
            course.add_problem(name, *layout);
        }
        course
    }

    /// 换成处理路径含 `marker` 的文件时失败的工具
    pub fn failing_on(mut self, marker: &str) -> Self {
        let tool = self.path().join("failing-unifdef");
        let script = FAILING_UNIFDEF
            .replace("@MARKER@", marker)
            .replace("@INNER@", &self.tool.to_string_lossy());
        fs::write(&tool, script).expect("Failed to write failing tool");
        make_executable(&tool);
        self.tool = tool;
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn problem_dir(&self, name: &str) -> PathBuf {
        self.path().join("homeworks").join(name)
    }

    pub fn write_manifest(&self, problems: &[&str]) {
        let manifest = serde_json::json!({
            "assignment_dir": "homeworks",
            "working_dir": "./",
            "Problems": problems,
        });
        fs::write(self.path().join("assignment_list.json"), manifest.to_string())
            .expect("Failed to write manifest");
    }

    pub fn add_problem(&self, name: &str, layout: Layout) {
        let source = match layout {
            Layout::Tagged => self.problem_dir(name).join("mastersolution_tagged"),
            Layout::Legacy => self.problem_dir(name).join("mastersolution"),
        };
        fs::create_dir_all(source.join("data")).unwrap();
        fs::write(source.join("main.cc"), MAIN_CC).unwrap();
        fs::write(source.join("plot.py"), PLOT_PY).unwrap();
        fs::write(source.join("helper.h"), HELPER_H).unwrap();
        fs::write(source.join("CMakeLists.txt"), CMAKE_LISTS).unwrap();
        fs::write(source.join("data/values.csv"), VALUES_CSV).unwrap();
    }

    pub fn config(&self) -> Config {
        Config {
            base_dir: Some(self.path().to_path_buf()),
            marker_tool: self.tool.to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    /// 在课程目录中运行二进制
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("assignment-deploy").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("DEPLOY_BASE_DIR")
            .env_remove("ASSIGNMENT_MANIFEST")
            .env("MARKER_TOOL", &self.tool)
            .env("RUST_LOG", "info");
        cmd
    }
}

/// 目录树快照：相对路径 → 内容
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(entry.path()).unwrap())
        })
        .collect()
}

fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();

    // 并行测试中别的线程 fork 时可能还持有写句柄，先等脚本可以执行
    for _ in 0..100 {
        match std::process::Command::new(path)
            .arg("--help")
            .stdin(std::process::Stdio::null())
            .output()
        {
            Ok(_) => return,
            Err(e) if e.raw_os_error() == Some(26) => std::thread::sleep(Duration::from_millis(10)),
            Err(e) => panic!("fake tool not runnable: {}", e),
        }
    }
    panic!("fake tool stayed busy");
}
