use annotate_snippets::{Level, Renderer, Snippet};
use clap::ValueEnum;
use colored::Colorize;
use forof_core::diagnostic::Diagnostic;
use forof_core::error::ParseError;
use forof_core::fs::relativize_path;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print diagnostics with full context using annotated code snippets
    Full,
    /// Print diagnostics in a concise format, one per line
    Concise,
    /// Print diagnostics as GitHub format
    Github,
    /// Print diagnostics as JSON
    Json,
}

/// Takes the diagnostics and the errors in each file and then displays
/// them in different ways depending on the `--output-format` provided by the
/// user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

/// Print file errors on stderr. Parse errors are shown without their
/// context chain since they already name the file.
fn print_errors(errors: &[(String, anyhow::Error)]) {
    for (_path, err) in errors {
        let root_cause = err.root_cause();
        if root_cause.is::<ParseError>() {
            eprintln!("{}: {}", "Error".red().bold(), root_cause);
        } else {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
        }
    }
}

fn print_summary(total_diagnostics: usize, errors: &[(String, anyhow::Error)]) {
    if total_diagnostics > 1 {
        println!("Found {total_diagnostics} errors.");
    } else if total_diagnostics == 1 {
        println!("Found 1 error.");
    } else if errors.is_empty() {
        println!("All checks passed!");
    }
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        print_errors(errors);

        let mut path_cache: FxHashMap<&Path, String> = FxHashMap::default();

        for diagnostic in diagnostics {
            let Some(location) = diagnostic.location else {
                continue;
            };

            let relative_path = path_cache
                .entry(diagnostic.filename.as_path())
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            writeln!(
                writer,
                "{} [{}:{}] {} {}",
                relative_path.white(),
                location.row(),
                // 1-based for display
                location.column() + 1,
                diagnostic.message.name.red(),
                diagnostic.message.full_message()
            )?;
        }

        writer.flush()?;

        if !diagnostics.is_empty() {
            println!();
        }
        print_summary(diagnostics.len(), errors);

        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{err:#}") })
            .collect();

        let output = JsonOutput {
            diagnostics: diagnostics.to_vec(),
            errors: json_errors,
        };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub struct GithubEmitter;

impl Emitter for GithubEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        for diagnostic in diagnostics {
            let Some(location) = diagnostic.location else {
                continue;
            };
            let (row, col) = (location.row(), location.column() + 1);

            // We want a message like this:
            // ::warning title=forof (prefer_for_of),file=src/a.js,line=4,col=1::src/a.js:4:1: [prefer_for_of] Expected ...
            //
            // The location appears twice: the first one is for the annotation
            // in the PR diff, the second one for the workflow log.
            write!(
                writer,
                "::warning title=forof ({}),file={file},line={row},col={col}::{file}:{row}:{col} ",
                diagnostic.message.name,
                file = diagnostic.filename.to_string_lossy()
            )?;

            writeln!(
                writer,
                "[{}] {}",
                diagnostic.message.name,
                diagnostic.message.full_message()
            )?;
        }

        for (path, err) in errors {
            writeln!(writer, "::error file={path}::{}", err.root_cause())?;
        }

        writer.flush()?;
        Ok(())
    }
}

pub struct FullEmitter;

impl Emitter for FullEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        // Use plain renderer when colors are disabled or in snapshots
        let renderer = if colored::control::SHOULD_COLORIZE.should_colorize() {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        print_errors(errors);
        if !errors.is_empty() && !diagnostics.is_empty() {
            eprintln!();
        }

        let mut file_cache: FxHashMap<&Path, String> = FxHashMap::default();
        let mut path_cache: FxHashMap<&Path, String> = FxHashMap::default();

        for diagnostic in diagnostics {
            let filename = diagnostic.filename.as_path();
            if file_cache.contains_key(filename) {
                continue;
            }
            match fs::read_to_string(filename) {
                Ok(content) => {
                    file_cache.insert(filename, content);
                }
                Err(err) => {
                    writer.flush()?;
                    eprintln!(
                        "Warning: Could not read source file {}: {}",
                        filename.display(),
                        err
                    );
                }
            }
        }

        let mut total_diagnostics = 0;

        for diagnostic in diagnostics {
            let filename = diagnostic.filename.as_path();

            let Some(source) = file_cache.get(filename) else {
                continue;
            };

            let file_path = path_cache
                .entry(filename)
                .or_insert_with(|| relativize_path(filename));

            let snippet = Snippet::source(source)
                .origin(file_path)
                .fold(true)
                .annotation(
                    Level::Warning
                        .span(diagnostic.range.start..diagnostic.range.end)
                        .label(&diagnostic.message.body),
                );

            let mut message = Level::Warning
                .title(&diagnostic.message.name)
                .snippet(snippet);

            if let Some(suggestion_text) = &diagnostic.message.suggestion {
                message = message.footer(Level::Help.title(suggestion_text));
            }

            let rendered = renderer.render(message);
            writeln!(writer, "{rendered}\n")?;

            total_diagnostics += 1;
        }

        writer.flush()?;

        print_summary(total_diagnostics, errors);

        Ok(())
    }
}
