use std::fs;
use std::path::{Path, PathBuf};

use sprout::answers::Answers;
use sprout::config::{TreeRules, UserConfig};
use sprout::error::SproutError;
use sprout::render::{bundled_tree, execute_plan, materialize, plan_render, read_tree};
use sprout::{execute_generation, plan_generation_with_config, GenerateOptions};
use walkdir::WalkDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn demo_answers() -> Answers {
    [("projectName", "demo"), ("description", "d")]
        .into_iter()
        .collect()
}

fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn relative_entries(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn test_end_to_end_scenario() {
    let src = tempfile::tempdir().unwrap();
    write_files(
        src.path(),
        &[
            ("template/README.md.hbs", "# {{projectName}}"),
            ("template/.gitkeep", ""),
            ("template/src/index.js", "console.log(1)"),
        ],
    );
    let out = tempfile::tempdir().unwrap();

    materialize(src.path(), out.path(), &demo_answers()).unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("demo/README.md")).unwrap(),
        "# demo"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("demo/src/index.js")).unwrap(),
        "console.log(1)"
    );
    assert_eq!(
        relative_entries(out.path()),
        vec![
            PathBuf::from("demo"),
            PathBuf::from("demo/README.md"),
            PathBuf::from("demo/src"),
            PathBuf::from("demo/src/index.js"),
        ]
    );
}

#[test]
fn test_fixture_matches_expected_tree() {
    let out = tempfile::tempdir().unwrap();
    let dest = out.path().join("demo");
    materialize(&fixture_path("basic-template"), &dest, &demo_answers()).unwrap();

    let expected = tempfile::tempdir().unwrap();
    write_files(
        expected.path(),
        &[
            ("README.md", "# demo\n\nd\n"),
            ("docs/notes.txt", "Raw {{projectName}} stays as-is\n"),
            ("src/index.js", "console.log(1)\n"),
            ("src/demo.js", "module.exports = 'template';\n"),
            (
                "demo-config/settings.json",
                "{ \"name\": \"demo\", \"missing\": \"\" }\n",
            ),
        ],
    );
    fs::create_dir_all(expected.path().join("empty/nested")).unwrap();

    assert!(
        !dir_diff::is_different(&dest, expected.path()).unwrap(),
        "generated tree differs: {:?}",
        relative_entries(&dest)
    );
}

#[test]
fn test_sentinel_never_emitted() {
    let out = tempfile::tempdir().unwrap();
    materialize(&fixture_path("basic-template"), out.path(), &demo_answers()).unwrap();

    let sentinels: Vec<_> = relative_entries(out.path())
        .into_iter()
        .filter(|p| p.file_name().is_some_and(|n| n == ".gitkeep"))
        .collect();
    assert!(sentinels.is_empty(), "found {sentinels:?}");
    assert!(out.path().join("empty/nested").is_dir());
}

#[test]
fn test_binary_file_is_byte_identical() {
    let src = tempfile::tempdir().unwrap();
    let png: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\xff\xfe";
    fs::create_dir_all(src.path().join("assets")).unwrap();
    fs::write(src.path().join("assets/logo.png"), png).unwrap();
    let out = tempfile::tempdir().unwrap();

    materialize(src.path(), out.path(), &demo_answers()).unwrap();

    assert_eq!(fs::read(out.path().join("assets/logo.png")).unwrap(), png);
}

#[test]
fn test_rerun_overwrites_without_error() {
    let out = tempfile::tempdir().unwrap();
    let template = fixture_path("basic-template");

    materialize(&template, out.path(), &demo_answers()).unwrap();
    fs::write(out.path().join("README.md"), "edited").unwrap();

    let second = materialize(&template, out.path(), &demo_answers()).unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("README.md")).unwrap(),
        "# demo\n\nd\n"
    );
    assert_eq!(second.files_created.len(), 2);
    assert_eq!(second.files_copied.len(), 3);
}

#[test]
fn test_source_not_found() {
    let out = tempfile::tempdir().unwrap();
    let err = materialize(
        &fixture_path("does-not-exist"),
        out.path(),
        &demo_answers(),
    )
    .unwrap_err();
    assert!(matches!(err, SproutError::SourceNotFound { .. }));
}

#[test]
fn test_render_error_writes_nothing() {
    let src = tempfile::tempdir().unwrap();
    write_files(
        src.path(),
        &[("a.txt", "fine"), ("b.txt.hbs", "{{projectName")],
    );
    let out = tempfile::tempdir().unwrap();
    let dest = out.path().join("demo");

    let err = materialize(src.path(), &dest, &demo_answers()).unwrap_err();

    assert!(matches!(err, SproutError::TemplateRender { .. }));
    assert!(!dest.exists());
}

#[test]
fn test_plan_then_execute() {
    let tree = read_tree(&fixture_path("basic-template")).unwrap();
    let plan = plan_render(&tree, &demo_answers(), &TreeRules::default()).unwrap();

    assert_eq!(plan.files().filter(|f| !f.is_copy).count(), 2);
    assert_eq!(plan.files().filter(|f| f.is_copy).count(), 3);

    let out = tempfile::tempdir().unwrap();
    let result = execute_plan(&plan, out.path()).unwrap();
    assert!(result
        .files_created
        .contains(&PathBuf::from("demo-config/settings.json")));
}

#[test]
fn test_bundled_template() {
    let out = tempfile::tempdir().unwrap();
    let dest = out.path().join("demo");
    let answers: Answers = [
        ("projectName", "demo"),
        ("description", "Orders & billing"),
    ]
    .into_iter()
    .collect();

    let plan = plan_render(&bundled_tree(), &answers, &TreeRules::default()).unwrap();
    execute_plan(&plan, &dest).unwrap();

    let package = fs::read_to_string(dest.join("package.json")).unwrap();
    assert!(package.contains("\"name\": \"demo\""));
    assert!(package.contains("\"description\": \"Orders & billing\""));

    let readme = fs::read_to_string(dest.join("README.md")).unwrap();
    assert!(readme.starts_with("# demo\n"));
    assert!(readme.contains("Orders &amp; billing"));

    assert!(dest.join("src/config/demo.config.js").is_file());
    assert!(dest.join("src/controllers").is_dir());
    assert!(!dest.join("src/controllers/.gitkeep").exists());
    assert!(dest.join("prisma/schema.prisma").is_file());
}

#[test]
fn test_headless_generation() {
    let out = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        template: Some(fixture_path("basic-template")),
        output: Some(out.path().to_path_buf()),
        data: vec![
            ("projectName".to_string(), "headless".to_string()),
            ("description".to_string(), "no prompts".to_string()),
        ],
        defaults: true,
    };

    let plan = plan_generation_with_config(options, None).unwrap();
    assert_eq!(plan.output_dir, out.path().join("headless"));
    assert_eq!(plan.answers.get("description"), Some("no prompts"));

    execute_generation(plan).unwrap();

    let readme = fs::read_to_string(out.path().join("headless/README.md")).unwrap();
    assert_eq!(readme, "# headless\n\nno prompts\n");
    assert!(out.path().join("headless/src/headless.js").is_file());
}

#[test]
fn test_generation_without_template_uses_bundled_tree() {
    let out = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        output: Some(out.path().to_path_buf()),
        data: vec![("projectName".to_string(), "api".to_string())],
        defaults: true,
        ..Default::default()
    };

    let plan = plan_generation_with_config(options, None).unwrap();
    assert!(plan.template_dir.is_none());

    execute_generation(plan).unwrap();

    let package = fs::read_to_string(out.path().join("api/package.json")).unwrap();
    assert!(package.contains("\"name\": \"api\""));
    assert!(out.path().join("api/src/config/api.config.js").is_file());
}

#[test]
fn test_user_config_rules_and_defaults_apply() {
    let out = tempfile::tempdir().unwrap();
    let user: UserConfig = toml::from_str(
        r#"
[defaults]
projectName = "configured"

[rules]
sentinel = ".placeholder"
"#,
    )
    .unwrap();
    let options = GenerateOptions {
        template: Some(fixture_path("basic-template")),
        output: Some(out.path().to_path_buf()),
        defaults: true,
        ..Default::default()
    };

    let plan = plan_generation_with_config(options, Some(&user)).unwrap();
    execute_generation(plan).unwrap();

    let project = out.path().join("configured");
    assert!(project.join("src/configured.js").is_file());
    // `.gitkeep` is no longer the sentinel, so it is copied like any other file
    assert!(project.join("empty/nested/.gitkeep").is_file());
}
