//! Locating and opening the UniversalSpeech binaries

use std::path::PathBuf;

use crate::config::{LoaderConfig, REQUIRED_FILES};
use crate::error::{Error, Result};
use crate::native::NativeLibrary;

/// Checks the binary set for the configured architecture and opens the
/// primary module.
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Verify every required file exists in the architecture folder.
    ///
    /// Returns the folder on success. A missing folder reports all files as
    /// missing.
    pub fn check_files(&self) -> Result<PathBuf> {
        let dir = self.config.lib_dir();
        let missing: Vec<String> = REQUIRED_FILES
            .iter()
            .filter(|name| !dir.join(name).is_file())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            tracing::warn!(dir = %dir.display(), ?missing, "UniversalSpeech files missing");
            return Err(Error::MissingDependency { dir, missing });
        }

        tracing::debug!(dir = %dir.display(), "UniversalSpeech files present");
        Ok(dir)
    }

    pub fn load(&self) -> Result<NativeLibrary> {
        self.check_files()?;
        NativeLibrary::open(&self.config.library_path())
    }
}
