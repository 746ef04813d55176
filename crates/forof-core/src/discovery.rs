//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/discovery.rs
//
// MIT License - Posit PBC

use ignore::DirEntry;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::fs;
use crate::fs::has_js_extension;
use crate::settings::Settings;
use crate::toml::find_forof_toml_in_directory;
use crate::toml::parse_forof_toml;
use etcetera::BaseStrategy;

/// Default patterns to exclude from linting
/// These match dependency folders and generated files of JS projects
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git/",
    "node_modules/",
    "dist/",
    "build/",
    "coverage/",
    "*.min.js",
    "*.d.ts",
];

#[derive(Debug, Clone)]
pub struct DiscoveredSettings {
    pub directory: PathBuf,
    pub settings: Settings,
    /// Path to the config file that was used
    pub config_path: Option<PathBuf>,
}

/// Get the user config directory for forof
fn get_user_config_dir() -> Option<PathBuf> {
    let strategy = etcetera::base_strategy::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("forof"))
}

/// This is the core function for walking a set of `paths` looking for `forof.toml`s.
///
/// For each `path`, we:
/// - Walk up its ancestors until the user config directory, looking for a `forof.toml`
/// - If no config found in ancestors, fall back to checking the user config directory
pub fn discover_settings<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<DiscoveredSettings>> {
    discover_settings_with_user_dir(paths, get_user_config_dir())
}

fn discover_settings_with_user_dir<P: AsRef<Path>>(
    paths: &[P],
    user_config_dir: Option<PathBuf>,
) -> anyhow::Result<Vec<DiscoveredSettings>> {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let mut seen = FxHashSet::default();
    let mut discovered_settings = Vec::with_capacity(paths.len());

    for path in &paths {
        let mut found_config = false;

        for ancestor in path.ancestors() {
            if !seen.insert(ancestor) {
                // We already visited this ancestor, we can stop here.
                break;
            }

            if let Some(toml) = find_forof_toml_in_directory(ancestor) {
                tracing::debug!("Using configuration file {}", toml.display());
                let settings = parse_forof_toml(&toml)?.into_settings();
                discovered_settings.push(DiscoveredSettings {
                    directory: ancestor.to_path_buf(),
                    settings,
                    config_path: Some(toml),
                });
                found_config = true;
                break;
            }

            // Stop at user config directory if we have one
            if let Some(ref config_dir) = user_config_dir
                && ancestor == config_dir
            {
                break;
            }
        }

        if !found_config
            && let Some(ref config_dir) = user_config_dir
            && seen.insert(config_dir.as_path())
            && let Some(toml) = find_forof_toml_in_directory(config_dir)
        {
            tracing::debug!("Using user configuration file {}", toml.display());
            let settings = parse_forof_toml(&toml)?.into_settings();
            discovered_settings.push(DiscoveredSettings {
                directory: config_dir.clone(),
                settings,
                config_path: Some(toml),
            });
        }
    }

    Ok(discovered_settings)
}

type DiscoveredFiles = Vec<Result<PathBuf, ignore::Error>>;

/// For each provided `path`, recursively search for any JavaScript or
/// TypeScript files within that `path` that match our inclusion criteria.
///
/// Exclude patterns come from `settings` (the first discovered configuration,
/// if any) and are resolved relative to the directory of its `forof.toml`.
pub fn discover_js_file_paths<P: AsRef<Path>>(
    paths: &[P],
    settings: Option<&DiscoveredSettings>,
    no_default_exclude: bool,
) -> DiscoveredFiles {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let Some((first_path, paths)) = paths.split_first() else {
        // No paths provided
        return Vec::new();
    };

    let mut builder = ignore::WalkBuilder::new(first_path);

    for path in paths {
        builder.add(path);
    }

    builder.hidden(true);
    builder.parents(true);
    builder.ignore(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);
    // Honor `.gitignore` files even outside of a git repository
    builder.require_git(false);

    let mut patterns: Vec<&str> = Vec::new();
    let mut use_default_exclude = !no_default_exclude;

    // Default root directory if no settings found
    let mut root = Path::new(".");

    if let Some(discovered) = settings {
        root = discovered.directory.as_path();

        if let Some(exclude_patterns) = &discovered.settings.linter.exclude {
            patterns.extend(exclude_patterns.iter().map(String::as_str));
        }
        if discovered.settings.linter.default_exclude == Some(false) {
            use_default_exclude = false;
        }
    }

    if use_default_exclude {
        patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
    }

    if !patterns.is_empty() {
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in patterns {
            // Add as negation pattern (exclude)
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("Failed to add exclude pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("Failed to build exclude patterns: {}", e),
        }
    }

    // Prefer `available_parallelism()`, with a max of 12 threads
    builder.threads(
        std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(12),
    );

    let walker = builder.build_parallel();

    let state = FilesState::new();
    let mut visitor_builder = FilesVisitorBuilder::new(&state);
    walker.visit(&mut visitor_builder);

    state.finish()
}

/// Shared state across the threads of the walker
struct FilesState {
    files: std::sync::Mutex<DiscoveredFiles>,
}

impl FilesState {
    fn new() -> Self {
        Self { files: std::sync::Mutex::new(Vec::new()) }
    }

    fn finish(self) -> DiscoveredFiles {
        // A poisoned mutex still holds the files collected so far
        self.files
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Object capable of building a [FilesVisitor]
///
/// Implements the `build()` method of [ignore::ParallelVisitorBuilder], which
/// [ignore::WalkParallel] utilizes to create one [FilesVisitor] per thread.
struct FilesVisitorBuilder<'state> {
    state: &'state FilesState,
}

impl<'state> FilesVisitorBuilder<'state> {
    fn new(state: &'state FilesState) -> Self {
        Self { state }
    }
}

impl<'state> ignore::ParallelVisitorBuilder<'state> for FilesVisitorBuilder<'state> {
    fn build(&mut self) -> Box<dyn ignore::ParallelVisitor + 'state> {
        Box::new(FilesVisitor { files: vec![], state: self.state })
    }
}

/// Each thread pushes to its own `files` while visiting. On `Drop`, they are
/// appended to the shared `state.files`.
struct FilesVisitor<'state> {
    files: DiscoveredFiles,
    state: &'state FilesState,
}

impl ignore::ParallelVisitor for FilesVisitor<'_> {
    /// Rejected directories are never entered, so `exclude = ["generated/"]`
    /// also excludes everything below `generated/` without matching each
    /// child path.
    fn visit(&mut self, result: std::result::Result<DirEntry, ignore::Error>) -> ignore::WalkState {
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                // Store error but continue walking
                self.files.push(Err(error));
                return ignore::WalkState::Continue;
            }
        };

        let path = entry.path();

        // An entry is explicit if it was provided directly, not discovered by looking into a directory
        let is_explicit = entry.depth() == 0;
        let is_directory = entry.file_type().is_none_or(|ft| ft.is_dir());

        if is_explicit && !is_directory {
            // Accept explicitly provided files regardless of exclusion
            // criteria or extension, i.e. `forof check bundle.min.js`.
            tracing::trace!(
                "Included file due to explicit provision {path}",
                path = path.display()
            );
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        if !is_directory && has_js_extension(path) {
            tracing::trace!("Included JS file {path}", path = path.display());
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        tracing::trace!(
            "Excluded file due to fallthrough {path}",
            path = path.display()
        );
        ignore::WalkState::Continue
    }
}

impl Drop for FilesVisitor<'_> {
    fn drop(&mut self) {
        let mut files = match self.state.files.lock() {
            Ok(files) => files,
            Err(poisoned) => poisoned.into_inner(),
        };

        if files.is_empty() {
            *files = std::mem::take(&mut self.files);
        } else {
            files.append(&mut self.files);
        }
    }
}
