//! Error types for planning an insertion and loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why an insertion plan could not be built.
///
/// All of these come from the line heuristics failing to find an anchor
/// they rely on.  The server reports them to the user instead of applying
/// a partial edit.  Lines are stored zero-based and displayed one-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("no class declaration found in the document")]
    ClassNotFound,

    #[error("line {} is past the end of the document", .line + 1)]
    LineOutOfRange { line: u32 },

    #[error("the constructor on line {} has no closing brace", .line + 1)]
    UnterminatedConstructor { line: u32 },

    #[error("no constructor signature found from line {} on", .line + 1)]
    SignatureNotFound { line: u32 },

    #[error("the constructor signature on line {} has no parameter list", .line + 1)]
    MalformedConstructorSignature { line: u32 },

    #[error("`{0}` is not a valid property name")]
    InvalidPropertyName(String),
}

/// Failure reading one of the configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
