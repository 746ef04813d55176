use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::language::SourceLanguage;

/// Does this file have an extension that one of our grammars can parse?
pub fn has_js_extension(path: &Path) -> bool {
    SourceLanguage::from_path(path).is_some()
}

/// Convert a path to an absolute path without touching the file system,
/// resolving `.` and `..` components.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize() {
        Ok(path) => path.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Express `path` relative to the current working directory when it lives
/// below it, for shorter output.
pub fn relativize_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    let Ok(cwd) = std::env::current_dir() else {
        return path.display().to_string();
    };

    match normalize_path(path).strip_prefix(&cwd) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}
