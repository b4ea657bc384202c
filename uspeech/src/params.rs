//! UniversalSpeech parameter identifiers
//!
//! Numeric identifiers accepted by `speechGetValue`, `speechSetValue` and
//! `speechGetString` (UniversalSpeech.h)

use std::fmt;
use std::str::FromStr;

/// Plain engine attributes and switches
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Volume = 0,
    VolumeMax = 1,
    VolumeMin = 2,
    VolumeSupported = 3,
    Rate = 4,
    RateMax = 5,
    RateMin = 6,
    RateSupported = 7,
    Pitch = 8,
    PitchMax = 9,
    PitchMin = 10,
    PitchSupported = 11,
    Inflexion = 12,
    InflexionMax = 13,
    InflexionMin = 14,
    InflexionSupported = 15,
    Paused = 16,
    PauseSupported = 17,
    Busy = 18,
    BusySupported = 19,
    Wait = 20,
    WaitSupported = 21,
    AutoEngine = 0xFFFE,
    EnableNativeSpeech = 0xFFFF,
}

impl Param {
    pub const ALL: [Param; 24] = [
        Param::Volume,
        Param::VolumeMax,
        Param::VolumeMin,
        Param::VolumeSupported,
        Param::Rate,
        Param::RateMax,
        Param::RateMin,
        Param::RateSupported,
        Param::Pitch,
        Param::PitchMax,
        Param::PitchMin,
        Param::PitchSupported,
        Param::Inflexion,
        Param::InflexionMax,
        Param::InflexionMin,
        Param::InflexionSupported,
        Param::Paused,
        Param::PauseSupported,
        Param::Busy,
        Param::BusySupported,
        Param::Wait,
        Param::WaitSupported,
        Param::AutoEngine,
        Param::EnableNativeSpeech,
    ];

    pub const fn id(self) -> ParameterId {
        ParameterId(self as i32)
    }

    pub fn name(self) -> &'static str {
        match self {
            Param::Volume => "volume",
            Param::VolumeMax => "volume_max",
            Param::VolumeMin => "volume_min",
            Param::VolumeSupported => "volume_supported",
            Param::Rate => "rate",
            Param::RateMax => "rate_max",
            Param::RateMin => "rate_min",
            Param::RateSupported => "rate_supported",
            Param::Pitch => "pitch",
            Param::PitchMax => "pitch_max",
            Param::PitchMin => "pitch_min",
            Param::PitchSupported => "pitch_supported",
            Param::Inflexion => "inflexion",
            Param::InflexionMax => "inflexion_max",
            Param::InflexionMin => "inflexion_min",
            Param::InflexionSupported => "inflexion_supported",
            Param::Paused => "paused",
            Param::PauseSupported => "pause_supported",
            Param::Busy => "busy",
            Param::BusySupported => "busy_supported",
            Param::Wait => "wait",
            Param::WaitSupported => "wait_supported",
            Param::AutoEngine => "auto_engine",
            Param::EnableNativeSpeech => "enable_native_speech",
        }
    }
}

/// Offset ranges: `base + n` addresses the n-th voice, language, engine...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Voice,
    Language,
    Subengine,
    Engine,
    EngineAvailable,
    User,
}

impl Selector {
    pub const ALL: [Selector; 6] = [
        Selector::Voice,
        Selector::Language,
        Selector::Subengine,
        Selector::Engine,
        Selector::EngineAvailable,
        Selector::User,
    ];

    pub const fn base(self) -> i32 {
        match self {
            Selector::Voice => VOICE,
            Selector::Language => LANGUAGE,
            Selector::Subengine => SUBENGINE,
            Selector::Engine => ENGINE,
            Selector::EngineAvailable => ENGINE_AVAILABLE,
            Selector::User => USER_PARAM,
        }
    }

    /// Identifier of the `offset`-th entry in this range.
    pub const fn at(self, offset: u16) -> ParameterId {
        ParameterId(self.base() + offset as i32)
    }

    pub fn name(self) -> &'static str {
        match self {
            Selector::Voice => "voice",
            Selector::Language => "language",
            Selector::Subengine => "subengine",
            Selector::Engine => "engine",
            Selector::EngineAvailable => "engine_available",
            Selector::User => "user",
        }
    }

    fn containing(raw: i32) -> Option<(Selector, u16)> {
        Selector::ALL.iter().find_map(|&selector| {
            let offset = raw.checked_sub(selector.base())?;
            u16::try_from(offset).ok().map(|offset| (selector, offset))
        })
    }
}

// Range bases from UniversalSpeech.h
pub const VOICE: i32 = 0x10000;
pub const LANGUAGE: i32 = 0x20000;
pub const SUBENGINE: i32 = 0x30000;
pub const ENGINE: i32 = 0x40000;
pub const ENGINE_AVAILABLE: i32 = 0x50000;
pub const USER_PARAM: i32 = 0x1000000;

// u16 offsets must never reach the next range
const _: () = assert!((Param::EnableNativeSpeech as i32) <= (u16::MAX as i32));
const _: () = assert!(VOICE + (u16::MAX as i32) < LANGUAGE);
const _: () = assert!(LANGUAGE + (u16::MAX as i32) < SUBENGINE);
const _: () = assert!(SUBENGINE + (u16::MAX as i32) < ENGINE);
const _: () = assert!(ENGINE + (u16::MAX as i32) < ENGINE_AVAILABLE);
const _: () = assert!(ENGINE_AVAILABLE + (u16::MAX as i32) < USER_PARAM);

/// Raw identifier passed across the native boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterId(i32);

impl ParameterId {
    pub const VOLUME: Self = Param::Volume.id();
    pub const VOLUME_MAX: Self = Param::VolumeMax.id();
    pub const VOLUME_MIN: Self = Param::VolumeMin.id();
    pub const VOLUME_SUPPORTED: Self = Param::VolumeSupported.id();
    pub const RATE: Self = Param::Rate.id();
    pub const RATE_MAX: Self = Param::RateMax.id();
    pub const RATE_MIN: Self = Param::RateMin.id();
    pub const RATE_SUPPORTED: Self = Param::RateSupported.id();
    pub const PITCH: Self = Param::Pitch.id();
    pub const PITCH_MAX: Self = Param::PitchMax.id();
    pub const PITCH_MIN: Self = Param::PitchMin.id();
    pub const PITCH_SUPPORTED: Self = Param::PitchSupported.id();
    pub const INFLEXION: Self = Param::Inflexion.id();
    pub const INFLEXION_MAX: Self = Param::InflexionMax.id();
    pub const INFLEXION_MIN: Self = Param::InflexionMin.id();
    pub const INFLEXION_SUPPORTED: Self = Param::InflexionSupported.id();
    pub const PAUSED: Self = Param::Paused.id();
    pub const PAUSE_SUPPORTED: Self = Param::PauseSupported.id();
    pub const BUSY: Self = Param::Busy.id();
    pub const BUSY_SUPPORTED: Self = Param::BusySupported.id();
    pub const WAIT: Self = Param::Wait.id();
    pub const WAIT_SUPPORTED: Self = Param::WaitSupported.id();
    pub const AUTO_ENGINE: Self = Param::AutoEngine.id();
    pub const ENABLE_NATIVE_SPEECH: Self = Param::EnableNativeSpeech.id();

    /// Current engine id when read with `get_value`, name of engine 0 with
    /// `get_string`.
    pub const ENGINE: Self = Selector::Engine.at(0);

    pub const fn voice(offset: u16) -> Self {
        Selector::Voice.at(offset)
    }

    pub const fn language(offset: u16) -> Self {
        Selector::Language.at(offset)
    }

    pub const fn subengine(offset: u16) -> Self {
        Selector::Subengine.at(offset)
    }

    pub const fn engine(offset: u16) -> Self {
        Selector::Engine.at(offset)
    }

    pub const fn engine_available(offset: u16) -> Self {
        Selector::EngineAvailable.at(offset)
    }

    pub const fn user(offset: u16) -> Self {
        Selector::User.at(offset)
    }

    /// Escape hatch for identifiers not covered by the named ranges.
    pub const fn from_raw(raw: i32) -> Self {
        ParameterId(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl From<Param> for ParameterId {
    fn from(param: Param) -> Self {
        param.id()
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(param) = Param::ALL.iter().find(|p| p.id() == *self) {
            return f.write_str(param.name());
        }
        match Selector::containing(self.0) {
            Some((selector, offset)) => write!(f, "{}:{}", selector.name(), offset),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter: {0}")]
pub struct ParseParameterError(String);

impl FromStr for ParameterId {
    type Err = ParseParameterError;

    /// Accepts `rate`, `engine:2`, `0x40000` or `7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseParameterError(s.to_string());
        let lower = s.trim().to_ascii_lowercase();

        // Hex is the raw 32-bit pattern, as printed by `Display`
        if let Some(hex) = lower.strip_prefix("0x") {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            return u32::from_str_radix(hex, 16)
                .map(|bits| ParameterId(bits as i32))
                .map_err(|_| err());
        }
        if let Ok(raw) = lower.parse::<i32>() {
            return Ok(ParameterId(raw));
        }
        if let Some(param) = Param::ALL.iter().find(|p| p.name() == lower) {
            return Ok(param.id());
        }

        let (name, offset) = match lower.split_once(':') {
            Some((name, offset)) => (name, offset.parse::<u16>().map_err(|_| err())?),
            None => (lower.as_str(), 0),
        };
        Selector::ALL
            .iter()
            .find(|selector| selector.name() == name)
            .map(|selector| selector.at(offset))
            .ok_or_else(err)
    }
}

/// Engine attributes that can be gated on a `*_SUPPORTED` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Volume,
    Rate,
    Pitch,
    Inflexion,
}

impl Capability {
    pub const fn value(self) -> ParameterId {
        match self {
            Capability::Volume => ParameterId::VOLUME,
            Capability::Rate => ParameterId::RATE,
            Capability::Pitch => ParameterId::PITCH,
            Capability::Inflexion => ParameterId::INFLEXION,
        }
    }

    pub const fn min(self) -> ParameterId {
        match self {
            Capability::Volume => ParameterId::VOLUME_MIN,
            Capability::Rate => ParameterId::RATE_MIN,
            Capability::Pitch => ParameterId::PITCH_MIN,
            Capability::Inflexion => ParameterId::INFLEXION_MIN,
        }
    }

    pub const fn max(self) -> ParameterId {
        match self {
            Capability::Volume => ParameterId::VOLUME_MAX,
            Capability::Rate => ParameterId::RATE_MAX,
            Capability::Pitch => ParameterId::PITCH_MAX,
            Capability::Inflexion => ParameterId::INFLEXION_MAX,
        }
    }

    pub const fn supported(self) -> ParameterId {
        match self {
            Capability::Volume => ParameterId::VOLUME_SUPPORTED,
            Capability::Rate => ParameterId::RATE_SUPPORTED,
            Capability::Pitch => ParameterId::PITCH_SUPPORTED,
            Capability::Inflexion => ParameterId::INFLEXION_SUPPORTED,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Volume => "volume",
            Capability::Rate => "rate",
            Capability::Pitch => "pitch",
            Capability::Inflexion => "inflexion",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_attributes_are_contiguous() {
        for (i, param) in Param::ALL[..22].iter().enumerate() {
            assert_eq!(param.id().raw(), i as i32, "{}", param.name());
        }
        assert_eq!(ParameterId::ENABLE_NATIVE_SPEECH.raw(), 0xFFFF);
        assert_eq!(ParameterId::AUTO_ENGINE.raw(), 0xFFFE);
    }

    #[test]
    fn selectors_add_offsets_to_their_base() {
        assert_eq!(ParameterId::ENGINE.raw(), 0x40000);
        assert_eq!(ParameterId::engine(0), ParameterId::ENGINE);
        assert_eq!(ParameterId::engine(3).raw(), 0x40003);
        assert_eq!(ParameterId::engine_available(3).raw(), 0x50003);
        assert_eq!(ParameterId::voice(1).raw(), 0x10001);
        assert_eq!(ParameterId::language(2).raw(), 0x20002);
        assert_eq!(ParameterId::subengine(4).raw(), 0x30004);
        assert_eq!(ParameterId::user(5).raw(), 0x1000005);
    }

    #[test]
    fn largest_offset_stays_in_its_range() {
        for selector in Selector::ALL {
            let last = selector.at(u16::MAX);
            assert_eq!(Selector::containing(last.raw()), Some((selector, u16::MAX)));
            assert_eq!(last.to_string(), format!("{}:65535", selector.name()));
        }
    }

    #[test]
    fn parse_names_offsets_and_numbers() {
        assert_eq!("rate".parse::<ParameterId>(), Ok(ParameterId::RATE));
        assert_eq!("RATE_SUPPORTED".parse::<ParameterId>(), Ok(ParameterId::RATE_SUPPORTED));
        assert_eq!("engine".parse::<ParameterId>(), Ok(ParameterId::ENGINE));
        assert_eq!("engine:2".parse::<ParameterId>(), Ok(ParameterId::engine(2)));
        assert_eq!("engine_available:1".parse::<ParameterId>(), Ok(ParameterId::engine_available(1)));
        assert_eq!("0xffff".parse::<ParameterId>(), Ok(ParameterId::ENABLE_NATIVE_SPEECH));
        assert_eq!("7".parse::<ParameterId>(), Ok(ParameterId::RATE_SUPPORTED));
        assert!("engine:70000".parse::<ParameterId>().is_err());
        assert!("loudness".parse::<ParameterId>().is_err());
    }

    #[test]
    fn hex_rejects_signs() {
        assert!("0x-5".parse::<ParameterId>().is_err());
        assert!("0x+5".parse::<ParameterId>().is_err());
        assert!("0x".parse::<ParameterId>().is_err());
        assert!("0x100000000".parse::<ParameterId>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for raw in [-1, i32::MIN, 0x7000_0000, 0xFFFE, 0x40002, 0x1000005, 21] {
            let id = ParameterId::from_raw(raw);
            assert_eq!(id.to_string().parse::<ParameterId>(), Ok(id), "{}", id);
        }
        assert_eq!(ParameterId::from_raw(-1).to_string(), "0xffffffff");
    }

    #[test]
    fn display_is_symbolic() {
        assert_eq!(ParameterId::PITCH_MIN.to_string(), "pitch_min");
        assert_eq!(ParameterId::engine(2).to_string(), "engine:2");
        assert_eq!(ParameterId::ENGINE.to_string(), "engine:0");
        assert_eq!(ParameterId::from_raw(0x7000_0000).to_string(), "0x70000000");
    }

    #[test]
    fn capabilities_map_to_their_parameters() {
        assert_eq!(Capability::Rate.value(), ParameterId::RATE);
        assert_eq!(Capability::Rate.min(), ParameterId::RATE_MIN);
        assert_eq!(Capability::Rate.max(), ParameterId::RATE_MAX);
        assert_eq!(Capability::Rate.supported(), ParameterId::RATE_SUPPORTED);
        assert_eq!(Capability::Inflexion.supported().raw(), 15);
    }
}
