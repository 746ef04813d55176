use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

/// The file could not be parsed, so no rule was applied to it.
#[derive(Debug)]
pub struct ParseError {
    pub filename: PathBuf,
}

impl std::error::Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse {} due to syntax errors.",
            self.filename.display()
        )
    }
}

/// The file extension doesn't map to a grammar we know about.
#[derive(Debug)]
pub struct UnsupportedLanguageError {
    pub filename: PathBuf,
}

impl std::error::Error for UnsupportedLanguageError {}

impl Display for UnsupportedLanguageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Don't know how to parse {}: expected a JavaScript or TypeScript file.",
            self.filename.display()
        )
    }
}
