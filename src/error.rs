#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SproutError {
    #[error("Template directory not found: {path}")]
    #[diagnostic(help("Pass --template or set template_dir in the user config"))]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read template entry {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    #[diagnostic(help("Check permissions and free space in the output directory"))]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {file} at line {line}, column {column}: {message}")]
    #[diagnostic(help("Look for an unclosed mustache marker in the template file"))]
    TemplateRender {
        file: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid answer for '{name}': {reason}")]
    AnswerValidation { name: String, reason: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the TOML syntax in your sprout config file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid data override '{input}'")]
    #[diagnostic(help("Overrides must look like -d key=value"))]
    InvalidData { input: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SproutError>;
