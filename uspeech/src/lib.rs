//! Rust bindings for the UniversalSpeech library.
//!
//! UniversalSpeech routes speech and braille output to whichever screen
//! reader is running (NVDA, JAWS, Dolphin, System Access) and can fall back to
//! SAPI. This crate locates the binaries, opens the library and exposes its
//! exports through [`UniversalSpeech`].
//!
//! # Example
//!
//! ```ignore
//! use uspeech::{Error, UniversalSpeech};
//!
//! let speech = UniversalSpeech::new()?;
//! speech.enable_native_speech(true);
//! speech.say("Hello, world.", true)?;
//! speech.braille("Hello, world.")?;
//!
//! println!("Engine: {:?}", speech.engine_used());
//! for engine in speech.get_engines() {
//!     println!("{} (available: {})", engine.name, engine.available);
//! }
//!
//! match speech.set_rate(150, None, None) {
//!     Err(Error::UnsupportedCapability(c)) => eprintln!("{} not adjustable", c),
//!     other => other?,
//! }
//! ```

pub mod config;
mod error;
mod loader;
pub mod native;
pub mod params;
mod speech;
pub mod wide;

pub use config::{Arch, LoaderConfig, REQUIRED_FILES};
pub use error::{Error, Result};
pub use loader::Loader;
pub use native::{NativeLibrary, SpeechApi};
pub use params::{Capability, Param, ParameterId, ParseParameterError, Selector};
pub use speech::{EngineDescriptor, UniversalSpeech};
pub use wide::WideString;
