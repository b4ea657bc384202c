//! Error types for UniversalSpeech operations

use std::path::PathBuf;

use crate::params::Capability;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing library files in {}: {}", .dir.display(), .missing.join(", "))]
    MissingDependency { dir: PathBuf, missing: Vec<String> },
    #[error("failed to load {}: {message}", .path.display())]
    LibraryLoad { path: PathBuf, message: String },
    #[error("export not found in UniversalSpeech library: {0}")]
    MissingExport(&'static str),
    #[error("UniversalSpeech is only available on Windows")]
    UnsupportedPlatform,
    #[error("setting {0} is not supported with the current engine")]
    UnsupportedCapability(Capability),
    #[error("text contains a NUL character at position {position}")]
    InteriorNul { position: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
