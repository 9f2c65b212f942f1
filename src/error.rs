use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a repository scan before any package is read.
///
/// Per-file read problems are not errors: they are logged and the scan
/// moves on to the next file.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path '{}' is not a valid directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to list '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Problems with the metadata tables or the configuration file overriding them.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid category '{path}': expected a list of package names or a table")]
    InvalidCategory { path: String },

    #[error("invalid package name in '{path}': expected a string")]
    InvalidPackageName { path: String },

    #[error("unknown Emacs version '{version}' (known: {})", known.join(", "))]
    UnknownVersion { version: String, known: Vec<String> },
}

/// Failures of the external Graphviz layout engine. These are fatal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write graph source '{}': {source}", path.display())]
    WriteSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}
