/// Resolved configuration settings used within forof
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub linter: LinterSettings,
}

#[derive(Debug, Default, Clone)]
pub struct LinterSettings {
    /// Additional gitignore-style patterns of files to exclude.
    pub exclude: Option<Vec<String>>,
    /// Whether to apply `DEFAULT_EXCLUDE_PATTERNS`. `None` means yes.
    pub default_exclude: Option<bool>,
}
