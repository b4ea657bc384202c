//! Wide string conversion for the native boundary
//!
//! UniversalSpeech takes and returns `wchar_t` strings, which are UTF-16 on
//! Windows.

use crate::error::{Error, Result};

/// NUL-terminated UTF-16 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn new(text: &str) -> Result<Self> {
        if let Some(position) = text.find('\0') {
            return Err(Error::InteriorNul { position });
        }
        Ok(Self(text.encode_utf16().chain(std::iter::once(0)).collect()))
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.0.as_ptr()
    }

    /// Code units without the terminator
    pub fn as_units(&self) -> &[u16] {
        &self.0[..self.0.len() - 1]
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }
}

/// Decode a NUL-terminated UTF-16 string owned by the native library.
///
/// # Safety
///
/// `ptr` must be null or point to a readable, NUL-terminated sequence of
/// `u16` that stays valid for the duration of the call.
pub unsafe fn from_wide_ptr(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0;
    while *ptr.add(len) != 0 {
        len += 1;
    }
    let units = std::slice::from_raw_parts(ptr, len);
    Some(String::from_utf16_lossy(units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_terminator() {
        let wide = WideString::new("Hé").unwrap();
        assert_eq!(wide.as_units(), &[0x48, 0xE9]);
        assert_eq!(unsafe { *wide.as_ptr().add(2) }, 0);
    }

    #[test]
    fn rejects_interior_nul() {
        match WideString::new("ab\0c") {
            Err(Error::InteriorNul { position }) => assert_eq!(position, 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn decodes_native_strings() {
        let wide = WideString::new("NVDA 𝄞").unwrap();
        let decoded = unsafe { from_wide_ptr(wide.as_ptr()) };
        assert_eq!(decoded.as_deref(), Some("NVDA 𝄞"));
        assert_eq!(unsafe { from_wide_ptr(std::ptr::null()) }, None);
    }

    #[test]
    fn empty_text_is_just_the_terminator() {
        let wide = WideString::new("").unwrap();
        assert!(wide.as_units().is_empty());
        assert_eq!(wide.to_string_lossy(), "");
    }
}
