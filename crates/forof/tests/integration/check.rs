use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

#[test]
fn test_no_lints() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.js"),
        "for (const item of items) {\n  console.log(item);\n}\n",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    All checks passed!

    ----- stderr -----

    ----- args -----
    check .
    "
    );

    Ok(())
}

#[test]
fn test_one_lint() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.js"),
        "const items = [1, 2, 3];
for (let i = 0; i < items.length; i++) {
  console.log(items[i]);
}
",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    test.js [2:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of items)` instead.

    Found 1 error.

    ----- stderr -----

    ----- args -----
    check . --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_index_used_for_something_else() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.ts"),
        "for (let i = 0; i < items.length; i++) {
  console.log(i, items[i]);
}
for (let i = 0; i < items.length; i++) {
  items[i] = 0;
}
for (let i = 1; i < items.length; i++) {
  console.log(items[i]);
}
",
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .run();

    assert!(output.status.success());
    assert_eq!(output.stdout, "All checks passed!\n");

    Ok(())
}

#[test]
fn test_several_files_are_sorted() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    let lint = "for (let i = 0; i < a.length; i++) { f(a[i]); }\n";
    std::fs::create_dir(directory.join("src"))?;
    std::fs::write(directory.join("src/b.ts"), lint)?;
    std::fs::write(directory.join("src/a.jsx"), format!("\n{lint}{lint}"))?;
    std::fs::write(directory.join("src/c.md"), lint)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg("src")
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    src/a.jsx [2:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.
    src/a.jsx [3:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.
    src/b.ts [1:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.

    Found 3 errors.

    ----- stderr -----

    ----- args -----
    check src --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_nested_loops_are_reported_in_source_order() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.js"),
        "for (let i = 0; i < rows.length; i++) {
  for (let j = 0; j < rows[i].length; j++) {
    console.log(rows[i][j]);
  }
}
",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg("test.js")
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    test.js [1:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of rows)` instead.
    test.js [2:3] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of rows[i])` instead.

    Found 2 errors.

    ----- stderr -----

    ----- args -----
    check test.js --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_parse_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("broken.js"), "for (let i = 0; i < a.length; i++ {")?;
    std::fs::write(
        directory.join("good.js"),
        "for (let i = 0; i < a.length; i++) { f(a[i]); }\n",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----
    good.js [1:1] prefer_for_of Expected a for-each loop instead of a counted for loop with this simple iteration. Use `for (const item of a)` instead.

    Found 1 error.

    ----- stderr -----
    Error: Failed to parse broken.js due to syntax errors.

    ----- args -----
    check . --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_no_js_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("notes.md"), "# Notes")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Warning: No JavaScript or TypeScript files found under the given path(s).

    ----- stderr -----

    ----- args -----
    check .
    "
    );

    Ok(())
}

#[test]
fn test_missing_path_is_logged() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg("does_not_exist.js")
        .run();

    assert!(output.status.success());
    assert!(output.stderr.contains("Failed to discover files"));
    assert!(output.stdout.contains("No JavaScript or TypeScript files found"));

    // Silenced with a stricter log level
    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg("does_not_exist.js")
        .arg("--log-level")
        .arg("error")
        .run();

    assert!(output.stderr.is_empty());

    Ok(())
}

#[test]
fn test_with_timing() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("test.js"), "const x = 1;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--with-timing")
            .run()
            .normalize_os_executable_name()
            .normalize_timing(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    All checks passed!

    Checked files in: [DURATION]

    ----- stderr -----

    ----- args -----
    check . --with-timing
    "
    );

    Ok(())
}
