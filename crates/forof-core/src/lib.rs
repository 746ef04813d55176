//! Core functionality for the forof JavaScript/TypeScript linter
//!
//! This crate provides the core linting functionality including:
//! - Parsing with tree-sitter and the syntax tree walk
//! - Detection of counted `for` loops that can be written as `for...of`
//! - Diagnostic generation and reporting
//! - Configuration management
//! - File discovery and processing

pub mod analyze;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod language;
pub mod lints;
pub mod location;
pub mod settings;
pub mod suppression;
pub mod toml;
pub mod utils_ast;


pub use check::check;
pub use config::{ArgsConfig, Config, build_config, resolve_settings};
pub use diagnostic::Diagnostic;
pub use discovery::{DiscoveredSettings, discover_js_file_paths, discover_settings};
pub use location::Location;
pub use settings::Settings;
