//! Error kinds surfaced by mechanism and catalog operations.
//!
//! Only two conditions originate here: a required extension that the
//! registry marked absent, and text that cannot be represented in the
//! configured encoding. Everything the provider reports passes through as a
//! `ProviderError` carrying its status codes unchanged.

use crate::config::TextEncoding;
use crate::registry::Extension;
use std::fmt;

pub type MechResult<T> = Result<T, MechError>;

/// GSS-API major status routine errors used by the providers in this crate.
pub mod status {
    pub const COMPLETE: u32 = 0;
    pub const BAD_MECH: u32 = 1 << 16;
    pub const BAD_NAME: u32 = 2 << 16;
    pub const BAD_NAMETYPE: u32 = 3 << 16;
    pub const FAILURE: u32 = 13 << 16;
    pub const UNAVAILABLE: u32 = 16 << 16;
    pub const BAD_MECH_ATTR: u32 = 19 << 16;

    /// Calling and routine error bits; supplementary info bits are ignored.
    pub fn is_error(major: u32) -> bool {
        major & 0xffff_0000 != 0
    }
}

/// Failure reported by the underlying provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub major: u32,
    pub minor: u32,
    pub message: String,
}

#[derive(Debug)]
pub enum MechError {
    ExtensionUnavailable(Extension),
    Provider(ProviderError),
    Encoding {
        encoding: TextEncoding,
        text: String,
    },
}

impl ProviderError {
    pub fn new(major: u32, minor: u32, message: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            message: message.into(),
        }
    }

    /// Routine error number (`GSS_ROUTINE_ERROR(major) >> 16`).
    pub fn routine_error(&self) -> u32 {
        (self.major >> 16) & 0xff
    }
}

impl MechError {
    pub fn is_extension_unavailable(&self) -> bool {
        matches!(self, MechError::ExtensionUnavailable(_))
    }

    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            MechError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for MechError {
    fn from(err: ProviderError) -> Self {
        MechError::Provider(err)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (major {:#010x}, minor {})",
            self.message, self.major, self.minor
        )
    }
}

impl std::error::Error for ProviderError {}

impl fmt::Display for MechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MechError::ExtensionUnavailable(extension) => write!(
                f,
                "the GSS-API provider does not support {} ({})",
                extension.rfc(),
                extension.as_str()
            ),
            MechError::Provider(err) => write!(f, "GSS-API provider error: {err}"),
            MechError::Encoding { encoding, text } => {
                write!(f, "'{text}' cannot be encoded as {}", encoding.as_str())
            }
        }
    }
}

impl std::error::Error for MechError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MechError::Provider(err) => Some(err),
            _ => None,
        }
    }
}
