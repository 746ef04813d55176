use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

const LOOP: &str = "for (let i = 0; i < a.length; i++) { f(a[i]); }\n";

#[test]
fn test_empty_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), LOOP)?;
    std::fs::write(directory.join("forof.toml"), "[lint]\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name()
            .normalize_temp_paths(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    test.js [1:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.

    Found 1 error.

    ----- stderr -----

    ----- args -----
    check . --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_exclude_in_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir(directory.join("generated"))?;
    std::fs::write(directory.join("generated/api.ts"), LOOP)?;
    std::fs::write(directory.join("legacy.js"), LOOP)?;
    std::fs::write(directory.join("test.js"), LOOP)?;
    std::fs::write(
        directory.join("forof.toml"),
        r#"
[lint]
exclude = ["generated/", "legacy.js"]
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .run();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.contains("test.js [1:1]"));
    assert!(!output.stdout.contains("legacy.js"));
    assert!(!output.stdout.contains("api.ts"));

    Ok(())
}

#[test]
fn test_hidden_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("legacy.js"), LOOP)?;
    std::fs::write(
        directory.join(".forof.toml"),
        "[lint]\nexclude = [\"legacy.js\"]\n",
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert!(output.status.success());
    assert!(output.stdout.contains("No JavaScript or TypeScript files found"));

    Ok(())
}

#[test]
fn test_invalid_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), LOOP)?;
    std::fs::write(
        directory.join("forof.toml"),
        "[lint]\nselect = [\"prefer_for_of\"]\n",
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run()
        .normalize_temp_paths();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.starts_with("forof failed\n  Cause: Failed to parse "));
    assert!(output.stderr.contains("forof.toml"));
    assert!(output.stderr.contains("unknown field `select`"));

    Ok(())
}

#[test]
fn test_toml_in_parent_directory() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir(directory.join("src"))?;
    std::fs::write(directory.join("src/test.js"), LOOP)?;
    std::fs::write(directory.join("forof.toml"), "[lint]\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory.join("src"))
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .run();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.contains("test.js [1:1]"));
    assert!(output.stdout.contains("Used '"));
    assert!(output.stdout.trim_end().ends_with("forof.toml'"));

    // Structured formats are left untouched
    let output = Command::new(binary_path())
        .current_dir(directory.join("src"))
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("json")
        .run();

    assert!(!output.stdout.contains("Used '"));

    Ok(())
}
