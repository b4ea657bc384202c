//! High-level UniversalSpeech interface
//!
//! Every method is a synchronous forward to one native export, apart from the
//! composite calls (`speech`, `get_engines`, `set_rate`...) which are built
//! from those forwards.

use serde::Serialize;

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::native::{NativeLibrary, SpeechApi};
use crate::params::{Capability, ParameterId};
use crate::wide::WideString;

/// A speech engine known to the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineDescriptor {
    pub name: String,
    pub available: bool,
    pub id: u16,
}

/// Speech and braille output through UniversalSpeech.
///
/// Owns its library handle exclusively. With the native backend the type is
/// neither `Send` nor `Sync`.
pub struct UniversalSpeech<A: SpeechApi = NativeLibrary> {
    api: A,
}

impl UniversalSpeech<NativeLibrary> {
    /// Load the libraries installed next to the running executable.
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::for_current_exe()?)
    }

    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        let library = Loader::new(config).load()?;
        Ok(Self::from_api(library))
    }
}

impl<A: SpeechApi> UniversalSpeech<A> {
    pub fn from_api(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Release the library handle now rather than when dropped.
    pub fn close(self) {
        tracing::debug!("closing UniversalSpeech");
        drop(self.api);
    }

    /// Speak `text`, cutting off current speech when `interrupt` is set.
    ///
    /// Returns the native status code unchanged.
    pub fn say(&self, text: &str, interrupt: bool) -> Result<i32> {
        let text = WideString::new(text)?;
        tracing::debug!(interrupt, "speechSay");
        Ok(self.api.say(&text, interrupt))
    }

    /// Speak only the first letter of `text`.
    pub fn say_first_letter(&self, text: &str, interrupt: bool) -> Result<i32> {
        let text = WideString::new(text)?;
        tracing::debug!(interrupt, "speechSayA");
        Ok(self.api.say_first_letter(&text, interrupt))
    }

    /// Show `text` on the braille display.
    pub fn braille(&self, text: &str) -> Result<i32> {
        let text = WideString::new(text)?;
        tracing::debug!("brailleDisplay");
        Ok(self.api.braille(&text))
    }

    /// Speak then braille `text`. Braille output is attempted even when
    /// speaking fails; the first error is returned.
    pub fn speech(&self, text: &str) -> Result<()> {
        let said = self.say(text, true);
        let shown = self.braille(text);
        said.and(shown).map(|_| ())
    }

    /// Speak the first letter then braille the whole of `text`.
    pub fn speech_first_letter(&self, text: &str) -> Result<()> {
        let said = self.say_first_letter(text, true);
        let shown = self.braille(text);
        said.and(shown).map(|_| ())
    }

    pub fn stop(&self) -> i32 {
        tracing::debug!("speechStop");
        self.api.stop()
    }

    pub fn get_value(&self, what: impl Into<ParameterId>) -> i32 {
        self.api.get_value(what.into())
    }

    pub fn set_value(&self, what: impl Into<ParameterId>, value: i32) -> i32 {
        let what = what.into();
        tracing::debug!(%what, value, "speechSetValue");
        self.api.set_value(what, value)
    }

    pub fn get_string(&self, what: impl Into<ParameterId>) -> Option<String> {
        self.api.get_string(what.into())
    }

    /// Allow or forbid falling back to native engines such as SAPI when no
    /// screen reader is running.
    pub fn enable_native_speech(&self, enabled: bool) -> i32 {
        self.set_value(ParameterId::ENABLE_NATIVE_SPEECH, enabled as i32)
    }

    /// Id of the engine in use, `None` if the library reports no engine.
    pub fn engine_id(&self) -> Option<u16> {
        u16::try_from(self.get_value(ParameterId::ENGINE)).ok()
    }

    /// Name of the engine in use
    pub fn engine_used(&self) -> Option<String> {
        let id = self.engine_id()?;
        self.get_string(ParameterId::engine(id))
    }

    /// All engines known to the library, in id order. The list ends at the
    /// first id without a name.
    pub fn get_engines(&self) -> Vec<EngineDescriptor> {
        let mut engines = Vec::new();
        for id in 0..=u16::MAX {
            let name = match self.get_string(ParameterId::engine(id)) {
                Some(name) if !name.is_empty() => name,
                _ => break,
            };
            let available = self.get_value(ParameterId::engine_available(id)) != 0;
            engines.push(EngineDescriptor {
                name,
                available,
                id,
            });
        }
        tracing::debug!(count = engines.len(), "enumerated engines");
        engines
    }

    pub fn is_supported(&self, capability: Capability) -> bool {
        self.get_value(capability.supported()) != 0
    }

    pub fn volume_supported(&self) -> bool {
        self.is_supported(Capability::Volume)
    }

    pub fn rate_supported(&self) -> bool {
        self.is_supported(Capability::Rate)
    }

    pub fn pitch_supported(&self) -> bool {
        self.is_supported(Capability::Pitch)
    }

    pub fn inflexion_supported(&self) -> bool {
        self.is_supported(Capability::Inflexion)
    }

    /// Set `capability` and optionally its bounds, in the order value, min,
    /// max. Nothing is written when the current engine lacks the capability.
    pub fn set_capability(
        &self,
        capability: Capability,
        value: i32,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Result<()> {
        if !self.is_supported(capability) {
            tracing::debug!(%capability, "capability not supported by current engine");
            return Err(Error::UnsupportedCapability(capability));
        }

        self.set_value(capability.value(), value);
        if let Some(min) = min {
            self.set_value(capability.min(), min);
        }
        if let Some(max) = max {
            self.set_value(capability.max(), max);
        }
        Ok(())
    }

    pub fn set_volume(&self, value: i32, min: Option<i32>, max: Option<i32>) -> Result<()> {
        self.set_capability(Capability::Volume, value, min, max)
    }

    pub fn set_rate(&self, value: i32, min: Option<i32>, max: Option<i32>) -> Result<()> {
        self.set_capability(Capability::Rate, value, min, max)
    }

    pub fn set_pitch(&self, value: i32, min: Option<i32>, max: Option<i32>) -> Result<()> {
        self.set_capability(Capability::Pitch, value, min, max)
    }

    pub fn set_inflexion(&self, value: i32, min: Option<i32>, max: Option<i32>) -> Result<()> {
        self.set_capability(Capability::Inflexion, value, min, max)
    }
}
