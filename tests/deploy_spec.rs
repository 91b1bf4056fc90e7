#![cfg(unix)]

mod common;

use assignment_deploy::{App, Variant};
use common::{snapshot, Course, Layout, CMAKE_LISTS, HELPER_H, VALUES_CSV};
use std::fs;
use std::path::PathBuf;

async fn deploy(course: &Course) -> assignment_deploy::RunStats {
    App::initialize(course.config())
        .await
        .expect("initialize")
        .run()
        .await
        .expect("run")
}

fn output(course: &Course, problem: &str, variant: Variant) -> PathBuf {
    course.problem_dir(problem).join(variant.dir_name())
}

#[tokio::test]
async fn templates_and_mysolution_are_identical() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    let stats = deploy(&course).await;
    assert_eq!(stats.succeeded, 1);

    let templates = snapshot(&output(&course, "Poisson/", Variant::Template));
    let mysolution = snapshot(&output(&course, "Poisson/", Variant::Personal));
    let master = snapshot(&output(&course, "Poisson/", Variant::Solution));

    assert_eq!(templates, mysolution);
    assert_eq!(templates.len(), 5);

    // 只有带标记的文件与答案版本不同
    let differing: Vec<_> = templates
        .iter()
        .filter(|(path, content)| master.get(*path) != Some(content))
        .map(|(path, _)| path.to_string_lossy().to_string())
        .collect();
    assert_eq!(differing, vec!["main.cc", "plot.py"]);
}

#[tokio::test]
async fn markers_are_resolved_per_variant() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    deploy(&course).await;

    let master = fs::read_to_string(output(&course, "Poisson/", Variant::Solution).join("main.cc")).unwrap();
    let template = fs::read_to_string(output(&course, "Poisson/", Variant::Template).join("main.cc")).unwrap();

    assert!(master.contains("std::cout << 42 << std::endl;"));
    assert!(!master.contains("TODO"));
    assert!(template.contains("// TODO: your code here"));
    assert!(!template.contains("std::cout"));

    for variant in [&master, &template] {
        assert!(!variant.contains("#if SOLUTION"));
        assert!(variant.starts_with("#include <iostream>\n\nint main() {\n"));
        assert!(variant.ends_with("  return 0;\n}\n"));
    }

    let plot = fs::read_to_string(output(&course, "Poisson/", Variant::Personal).join("plot.py")).unwrap();
    assert_eq!(plot, "import numpy as np\n");
}

#[tokio::test]
async fn verbatim_files_are_byte_identical() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    deploy(&course).await;

    let source = course.problem_dir("Poisson/").join("mastersolution_tagged");
    for variant in Variant::DEPLOY_ORDER {
        let dir = output(&course, "Poisson/", variant);
        assert_eq!(fs::read_to_string(dir.join("CMakeLists.txt")).unwrap(), CMAKE_LISTS);
        assert_eq!(fs::read_to_string(dir.join("data/values.csv")).unwrap(), VALUES_CSV);
        // 无标记的头文件经过工具处理后内容不变
        assert_eq!(fs::read_to_string(dir.join("helper.h")).unwrap(), HELPER_H);
        assert_eq!(
            fs::metadata(dir.join("CMakeLists.txt")).unwrap().modified().unwrap(),
            fs::metadata(source.join("CMakeLists.txt")).unwrap().modified().unwrap()
        );
    }
}

#[tokio::test]
async fn running_twice_gives_identical_trees() {
    let course = Course::new(&[("Poisson/", Layout::Legacy), ("Stokes/", Layout::Tagged)]);

    deploy(&course).await;
    let first = snapshot(&course.path().join("homeworks"));

    let stats = deploy(&course).await;
    let second = snapshot(&course.path().join("homeworks"));

    assert_eq!(first, second);
    // 第二次运行时已经是新布局
    assert_eq!(stats.migrated, 0);
}

#[tokio::test]
async fn legacy_layout_is_renamed_and_rebuilt() {
    let course = Course::new(&[("Poisson/", Layout::Legacy)]);
    let legacy_master = course.problem_dir("Poisson/").join("mastersolution/main.cc");
    assert!(legacy_master.is_file());
    assert!(!course.problem_dir("Poisson/").join("mastersolution_tagged").exists());

    let stats = deploy(&course).await;

    assert_eq!(stats.migrated, 1);
    let tagged = course.problem_dir("Poisson/").join("mastersolution_tagged/main.cc");
    assert!(fs::read_to_string(tagged).unwrap().contains("#if SOLUTION"));
    // 新的 mastersolution 是部署结果，不再含标记
    let rebuilt = fs::read_to_string(legacy_master).unwrap();
    assert!(!rebuilt.contains("#if SOLUTION"));
    assert!(rebuilt.contains("std::cout"));
}

#[tokio::test]
async fn stale_output_content_is_removed() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    let stale_dir = output(&course, "Poisson/", Variant::Template).join("data");
    fs::create_dir_all(&stale_dir).unwrap();
    fs::write(stale_dir.join("old.csv"), "stale").unwrap();
    fs::write(output(&course, "Poisson/", Variant::Template).join("removed.cc"), "gone").unwrap();

    deploy(&course).await;

    assert!(!stale_dir.join("old.csv").exists());
    assert!(stale_dir.join("values.csv").is_file());
    assert!(!output(&course, "Poisson/", Variant::Template).join("removed.cc").exists());
}

#[tokio::test]
async fn missing_source_fails_only_that_problem() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    course.write_manifest(&["Empty/", "Poisson/"]);
    fs::create_dir_all(course.problem_dir("Empty/")).unwrap();

    let stats = deploy(&course).await;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.succeeded, 1);
    assert!(!course.problem_dir("Empty/").join("templates").exists());
    assert!(output(&course, "Poisson/", Variant::Template).join("main.cc").is_file());
}

#[tokio::test]
async fn tool_error_fails_only_that_problem() {
    let course = Course::new(&[("Poisson/", Layout::Tagged), ("Stokes/", Layout::Tagged)])
        .failing_on("Stokes");

    let stats = deploy(&course).await;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.succeeded, 1);

    // 出错的文件不留下半成品
    let stokes = output(&course, "Stokes/", Variant::Solution);
    assert!(!stokes.join("helper.h").exists());
    assert!(!stokes.join("main.cc").exists());
    assert!(output(&course, "Poisson/", Variant::Personal).join("main.cc").is_file());

    let log = fs::read_to_string(course.path().join("deploy_log.txt")).unwrap();
    assert!(log.contains("✗ Stokes/"));
    assert!(log.contains("cannot open"));
}

#[tokio::test]
#[ignore] // 需要本机安装 unifdef：cargo test -- --ignored
async fn real_unifdef_resolves_markers() {
    let course = Course::new(&[("Poisson/", Layout::Tagged)]);
    let config = assignment_deploy::Config {
        marker_tool: "unifdef".to_string(),
        ..course.config()
    };

    let stats = App::initialize(config).await.unwrap().run().await.unwrap();
    assert_eq!(stats.failed, 0);

    let template = fs::read_to_string(output(&course, "Poisson/", Variant::Template).join("main.cc")).unwrap();
    assert!(template.contains("// TODO: your code here"));
    assert!(!template.contains("std::cout"));
}
