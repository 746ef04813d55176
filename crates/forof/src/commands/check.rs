use forof_core::config::{ArgsConfig, build_config, resolve_settings};
use forof_core::diagnostic::Diagnostic;
use forof_core::discovery::{discover_js_file_paths, discover_settings};

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::args::CheckCommand;
use crate::output_format::{self, GithubEmitter};
use crate::status::ExitStatus;

use output_format::{ConciseEmitter, Emitter, FullEmitter, JsonEmitter, OutputFormat};

pub fn check(args: CheckCommand) -> Result<ExitStatus> {
    let start = if args.with_timing {
        Some(Instant::now())
    } else {
        None
    };

    let discovered = discover_settings(&args.files)?;
    let settings = resolve_settings(&discovered);

    // Track if we're using a config from a parent directory
    let cwd = env::current_dir().ok();
    let parent_config_path: Option<PathBuf> = settings
        .and_then(|ds| ds.config_path.as_ref())
        .filter(|config_path| {
            matches!(
                (config_path.parent(), &cwd),
                (Some(config_dir), Some(current_dir)) if config_dir != current_dir
            )
        })
        .cloned();

    let mut paths = Vec::new();
    for path in discover_js_file_paths(&args.files, settings, args.no_default_exclude) {
        match path {
            Ok(path) => paths.push(path),
            Err(err) => tracing::warn!("Failed to discover files: {err}"),
        }
    }

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No JavaScript or TypeScript files found under the given path(s).".white().bold()
        );
        return Ok(ExitStatus::Success);
    }

    let check_config = ArgsConfig {
        files: args.files.iter().map(PathBuf::from).collect(),
        no_default_exclude: args.no_default_exclude,
    };

    let config = build_config(&check_config, paths)?;

    let file_results = forof_core::check::check(config);

    let mut all_errors = Vec::new();
    let mut all_diagnostics: Vec<Diagnostic> = Vec::new();

    for (path, result) in file_results {
        match result {
            Ok(diagnostics) => all_diagnostics.extend(diagnostics),
            Err(e) => all_errors.push((path, e)),
        }
    }

    // Files are checked in parallel, and within a file the inner loops are
    // reported first: sort globally by file, then position.
    let mut all_diagnostics_flat: Vec<&Diagnostic> = all_diagnostics.iter().collect();
    all_diagnostics_flat.sort();
    all_errors.sort_by(|a, b| a.0.cmp(&b.0));

    let mut stdout = std::io::stdout();

    match args.output_format {
        OutputFormat::Concise => {
            ConciseEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Github => {
            GithubEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Full => {
            FullEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
    }

    // Skip for JSON/GitHub to avoid corrupting structured output
    let is_structured_format = matches!(
        args.output_format,
        OutputFormat::Json | OutputFormat::Github
    );

    if !is_structured_format {
        if let Some(config_path) = parent_config_path {
            println!("\nUsed '{}'", config_path.display());
        }

        if let Some(start) = start {
            let duration = start.elapsed();
            println!("\nChecked files in: {duration:?}");
        }
    }

    if !all_errors.is_empty() {
        return Ok(ExitStatus::Error);
    }

    if all_diagnostics.is_empty() {
        return Ok(ExitStatus::Success);
    }

    Ok(ExitStatus::Failure)
}
