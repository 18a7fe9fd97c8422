//! escape-fix is a maintenance tool for documentation corpora built with a
//! template-driven static site renderer. It finds fenced code blocks whose
//! literal `{{ ... }}` / `{% ... %}` sequences the renderer would interpret
//! as directives, and wraps them in raw/endraw marker lines so the build
//! stops breaking. Re-running the tool is always safe: already-escaped
//! regions are detected and left untouched.

/// Scoped per-file backups with rollback on write failure
pub mod backup;

/// Command-line interface module for the escape-fix application
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (escapefix.json, escapefix.yml, escapefix.yaml)
pub mod config;

/// Template-conflict detection for fenced code regions
pub mod detector;

/// Error types and handling for the escape-fix application
pub mod error;

/// Marker injection around conflicting regions
pub mod injector;

/// Core per-file processing orchestration
/// Combines all components into a single pass over each file
pub mod processor;

/// Fence scanning state machine producing code regions
pub mod scanner;

/// Downstream build invocation used to confirm a fix
pub mod validator;

/// Candidate file enumeration with exclusion patterns
pub mod walker;
