//! Library location settings
//!
//! Resolved once at startup and handed to the [`Loader`](crate::Loader).

use std::io;
use std::path::{Path, PathBuf};

/// Files that must sit next to each other in the architecture folder
pub const REQUIRED_FILES: [&str; 6] = [
    "dolapi.dll",
    "jfwapi.dll",
    "nvdaControllerClient.dll",
    "SAAPI32.dll",
    "UniversalSpeech.dll",
    "UniversalSpeech.tlb",
];

/// Entry point opened by the loader
pub const PRIMARY_MODULE: &str = "UniversalSpeech.dll";

/// Process architecture, selects which binary set is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    pub fn current() -> Self {
        if cfg!(target_pointer_width = "64") {
            Arch::X64
        } else {
            Arch::X86
        }
    }

    pub fn lib_folder(self) -> &'static str {
        match self {
            Arch::X86 => "lib",
            Arch::X64 => "lib64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub install_dir: PathBuf,
    pub arch: Arch,
}

impl LoaderConfig {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            arch: Arch::current(),
        }
    }

    /// Libraries installed alongside the running executable
    pub fn for_current_exe() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(dir))
    }

    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.install_dir.join(self.arch.lib_folder())
    }

    pub fn library_path(&self) -> PathBuf {
        self.lib_dir().join(PRIMARY_MODULE)
    }
}
