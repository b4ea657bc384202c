//! Native call surface
//!
//! [`SpeechApi`] is the set of UniversalSpeech exports used by the facade.
//! [`NativeLibrary`] implements it over the functions resolved from
//! `UniversalSpeech.dll`.

use crate::params::ParameterId;
use crate::wide::WideString;

/// Exported UniversalSpeech functions, one method per export.
///
/// Return codes are the raw `int` produced by the library.
pub trait SpeechApi {
    /// `speechSay`
    fn say(&self, text: &WideString, interrupt: bool) -> i32;
    /// `speechSayA`
    fn say_first_letter(&self, text: &WideString, interrupt: bool) -> i32;
    /// `brailleDisplay`
    fn braille(&self, text: &WideString) -> i32;
    /// `speechStop`
    fn stop(&self) -> i32;
    /// `speechGetValue`
    fn get_value(&self, what: ParameterId) -> i32;
    /// `speechSetValue`
    fn set_value(&self, what: ParameterId, value: i32) -> i32;
    /// `speechGetString`, `None` when the library returns a null pointer
    fn get_string(&self, what: ParameterId) -> Option<String>;
}

impl<A: SpeechApi + ?Sized> SpeechApi for &A {
    fn say(&self, text: &WideString, interrupt: bool) -> i32 {
        (**self).say(text, interrupt)
    }

    fn say_first_letter(&self, text: &WideString, interrupt: bool) -> i32 {
        (**self).say_first_letter(text, interrupt)
    }

    fn braille(&self, text: &WideString) -> i32 {
        (**self).braille(text)
    }

    fn stop(&self) -> i32 {
        (**self).stop()
    }

    fn get_value(&self, what: ParameterId) -> i32 {
        (**self).get_value(what)
    }

    fn set_value(&self, what: ParameterId, value: i32) -> i32 {
        (**self).set_value(what, value)
    }

    fn get_string(&self, what: ParameterId) -> Option<String> {
        (**self).get_string(what)
    }
}

pub use imp::NativeLibrary;

#[cfg(windows)]
mod imp {
    use std::marker::PhantomData;
    use std::os::windows::ffi::OsStrExt;
    use std::path::{Path, PathBuf};

    use windows::core::{s, PCSTR, PCWSTR};
    use windows::Win32::Foundation::{FreeLibrary, HANDLE, HMODULE};
    use windows::Win32::System::LibraryLoader::{
        GetProcAddress, LoadLibraryExW, LOAD_WITH_ALTERED_SEARCH_PATH,
    };

    use super::SpeechApi;
    use crate::error::{Error, Result};
    use crate::params::ParameterId;
    use crate::wide::{from_wide_ptr, WideString};

    type SayFn = unsafe extern "C" fn(text: *const u16, interrupt: i32) -> i32;
    type BrailleFn = unsafe extern "C" fn(text: *const u16) -> i32;
    type StopFn = unsafe extern "C" fn() -> i32;
    type GetValueFn = unsafe extern "C" fn(what: i32) -> i32;
    type SetValueFn = unsafe extern "C" fn(what: i32, value: i32) -> i32;
    type GetStringFn = unsafe extern "C" fn(what: i32) -> *const u16;

    struct Exports {
        say: SayFn,
        say_a: SayFn,
        braille: BrailleFn,
        stop: StopFn,
        get_value: GetValueFn,
        set_value: SetValueFn,
        get_string: GetStringFn,
    }

    /// Opened `UniversalSpeech.dll`, freed on drop
    pub struct NativeLibrary {
        module: Option<HMODULE>,
        exports: Exports,
        path: PathBuf,
        _not_send: PhantomData<*const ()>,
    }

    /// Resolve an export and reinterpret it with its real signature.
    ///
    /// # Safety
    ///
    /// `F` must be the function pointer type matching the export's prototype.
    unsafe fn export<F: Copy>(module: HMODULE, name: PCSTR, label: &'static str) -> Result<F> {
        let proc = GetProcAddress(module, name).ok_or(Error::MissingExport(label))?;
        Ok(std::mem::transmute_copy(&proc))
    }

    impl NativeLibrary {
        /// Open the module at `path`. Companion DLLs are resolved from the
        /// module's own folder.
        pub fn open(path: &Path) -> Result<Self> {
            let wide_path: Vec<u16> = path
                .as_os_str()
                .encode_wide()
                .chain(std::iter::once(0))
                .collect();

            unsafe {
                let module = LoadLibraryExW(
                    PCWSTR(wide_path.as_ptr()),
                    HANDLE::default(),
                    LOAD_WITH_ALTERED_SEARCH_PATH,
                )
                .map_err(|e| Error::LibraryLoad {
                    path: path.to_path_buf(),
                    message: format!("{:?}", e),
                })?;

                let exports = Self::resolve(module);
                let exports = match exports {
                    Ok(exports) => exports,
                    Err(e) => {
                        let _ = FreeLibrary(module);
                        return Err(e);
                    }
                };

                tracing::info!(path = %path.display(), "UniversalSpeech library loaded");
                Ok(Self {
                    module: Some(module),
                    exports,
                    path: path.to_path_buf(),
                    _not_send: PhantomData,
                })
            }
        }

        unsafe fn resolve(module: HMODULE) -> Result<Exports> {
            Ok(Exports {
                say: export(module, s!("speechSay"), "speechSay")?,
                say_a: export(module, s!("speechSayA"), "speechSayA")?,
                braille: export(module, s!("brailleDisplay"), "brailleDisplay")?,
                stop: export(module, s!("speechStop"), "speechStop")?,
                get_value: export(module, s!("speechGetValue"), "speechGetValue")?,
                set_value: export(module, s!("speechSetValue"), "speechSetValue")?,
                get_string: export(module, s!("speechGetString"), "speechGetString")?,
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Free the module now instead of at drop.
        pub fn close(mut self) {
            self.release();
        }

        fn release(&mut self) {
            if let Some(module) = self.module.take() {
                match unsafe { FreeLibrary(module) } {
                    Ok(()) => tracing::info!(path = %self.path.display(), "UniversalSpeech library unloaded"),
                    Err(e) => tracing::warn!(error = ?e, "failed to unload UniversalSpeech library"),
                }
            }
        }
    }

    impl Drop for NativeLibrary {
        fn drop(&mut self) {
            self.release();
        }
    }

    // Export pointers are valid while `module` is loaded; `release` only runs
    // from `close` or drop.
    impl SpeechApi for NativeLibrary {
        fn say(&self, text: &WideString, interrupt: bool) -> i32 {
            unsafe { (self.exports.say)(text.as_ptr(), interrupt as i32) }
        }

        fn say_first_letter(&self, text: &WideString, interrupt: bool) -> i32 {
            unsafe { (self.exports.say_a)(text.as_ptr(), interrupt as i32) }
        }

        fn braille(&self, text: &WideString) -> i32 {
            unsafe { (self.exports.braille)(text.as_ptr()) }
        }

        fn stop(&self) -> i32 {
            unsafe { (self.exports.stop)() }
        }

        fn get_value(&self, what: ParameterId) -> i32 {
            unsafe { (self.exports.get_value)(what.raw()) }
        }

        fn set_value(&self, what: ParameterId, value: i32) -> i32 {
            unsafe { (self.exports.set_value)(what.raw(), value) }
        }

        fn get_string(&self, what: ParameterId) -> Option<String> {
            unsafe { from_wide_ptr((self.exports.get_string)(what.raw())) }
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use std::convert::Infallible;
    use std::marker::PhantomData;
    use std::path::Path;

    use super::SpeechApi;
    use crate::error::{Error, Result};
    use crate::params::ParameterId;
    use crate::wide::WideString;

    /// UniversalSpeech only ships Windows binaries; this type cannot be
    /// constructed elsewhere.
    pub struct NativeLibrary {
        never: Infallible,
        _not_send: PhantomData<*const ()>,
    }

    impl NativeLibrary {
        pub fn open(path: &Path) -> Result<Self> {
            tracing::warn!(path = %path.display(), "native UniversalSpeech requires Windows");
            Err(Error::UnsupportedPlatform)
        }

        pub fn path(&self) -> &Path {
            match self.never {}
        }

        pub fn close(self) {
            match self.never {}
        }
    }

    impl SpeechApi for NativeLibrary {
        fn say(&self, _text: &WideString, _interrupt: bool) -> i32 {
            match self.never {}
        }

        fn say_first_letter(&self, _text: &WideString, _interrupt: bool) -> i32 {
            match self.never {}
        }

        fn braille(&self, _text: &WideString) -> i32 {
            match self.never {}
        }

        fn stop(&self) -> i32 {
            match self.never {}
        }

        fn get_value(&self, _what: ParameterId) -> i32 {
            match self.never {}
        }

        fn set_value(&self, _what: ParameterId, _value: i32) -> i32 {
            match self.never {}
        }

        fn get_string(&self, _what: ParameterId) -> Option<String> {
            match self.never {}
        }
    }
}
