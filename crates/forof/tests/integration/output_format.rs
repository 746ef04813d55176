use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

const LOOP: &str = "for (let i = 0; i < a.length; i++) {\n  f(a[i]);\n}\n";

#[test]
fn test_output_full() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), LOOP)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.contains("warning: prefer_for_of"));
    assert!(output.stdout.contains("test.js:1:1"));
    assert!(output.stdout.contains("for (let i = 0; i < a.length; i++) {"));
    assert!(output.stdout.contains(
        "Expected a for-each loop instead of a counted for loop with this simple iteration."
    ));
    assert!(output.stdout.contains("help: Use `for (const item of a)` instead."));
    // The header span, drawn as a warning annotation
    assert!(output.stdout.contains(&format!(
        "| {} Expected a for-each loop",
        "-".repeat(34)
    )));
    assert!(!output.stdout.contains(&"-".repeat(35)));
    assert!(output.stdout.trim_end().ends_with("Found 1 error."));

    Ok(())
}

#[test]
fn test_output_json() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), LOOP)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("json")
            .run()
            .normalize_os_executable_name(),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {
      "diagnostics": [
        {
          "message": {
            "name": "prefer_for_of",
            "body": "Expected a for-each loop instead of a counted for loop with this simple iteration.",
            "suggestion": "Use `for (const item of a)` instead."
          },
          "filename": "test.js",
          "range": {
            "start": 0,
            "end": 34
          },
          "location": {
            "row": 1,
            "column": 0
          }
        }
      ],
      "errors": []
    }

    ----- stderr -----

    ----- args -----
    check . --output-format json
    "#
    );

    Ok(())
}

#[test]
fn test_output_json_with_errors() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("broken.ts"), "for (")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("json")
        .run();

    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(json["diagnostics"], serde_json::json!([]));
    assert_eq!(json["errors"][0]["file"], "broken.ts");
    assert_eq!(
        json["errors"][0]["error"],
        "Failed to get checks for file: broken.ts: Failed to parse broken.ts due to syntax errors."
    );

    Ok(())
}

#[test]
fn test_output_github() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), format!("// loops\n{LOOP}"))?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("github")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ::warning title=forof (prefer_for_of),file=test.js,line=2,col=1::test.js:2:1 [prefer_for_of] Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.

    ----- stderr -----

    ----- args -----
    check . --output-format github
    "
    );

    Ok(())
}

#[test]
fn test_output_no_color() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), LOOP)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("--no-color")
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .env_remove("NO_COLOR")
        .env("CLICOLOR_FORCE", "1")
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains('\x1b'));
    assert!(stdout.starts_with("test.js [1:1] prefer_for_of"));

    Ok(())
}

#[test]
fn test_no_color_applies_to_logs() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    // A missing path is logged as a warning on stderr
    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("--no-color")
        .arg("check")
        .arg("does_not_exist.js")
        .env_remove("NO_COLOR")
        .env_remove("FOROF_LOG")
        .output()?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to discover files"));
    assert!(!stderr.contains('\x1b'));

    Ok(())
}
