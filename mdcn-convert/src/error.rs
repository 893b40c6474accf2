//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting Markdown to HTML or DOCX
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Error while parsing Markdown or the intermediate HTML
    ParseError(String),
    /// CSS inlining could not resolve or apply a rule
    StyleInliningError(String),
    /// Error while serializing the HTML tree or the Word document
    SerializationError(String),
    /// An I/O boundary failure surfaced by a collaborator
    IoError(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::StyleInliningError(msg) => write!(f, "Style inlining error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
