//! Runtime configuration read from the environment.
//!
//! Mirrors how the binaries resolve their inputs: an explicit setting wins,
//! empty variables count as unset, and anything left open falls back to the
//! platform defaults in `provider::native`.

use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

pub const ENCODING_ENV: &str = "GSS_MECHS_ENCODING";
pub const LIBRARY_ENV: &str = "GSS_MECHS_LIBRARY";
pub const FIXTURE_ENV: &str = "GSS_MECHS_FIXTURE";

/// Text encoding used when mechanism names cross the provider boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Returns `None` when `text` has characters outside the encoding.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            TextEncoding::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
        }
    }

    /// Lossy decode; undecodable input becomes U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
        }
    }
}

impl TryFrom<&str> for TextEncoding {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            other => bail!("Unknown text encoding: {other}"),
        }
    }
}

/// Settings shared by the catalog and provider loaders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub encoding: TextEncoding,
    /// Explicit GSS-API shared library; `None` tries the platform defaults.
    pub library: Option<PathBuf>,
    /// Static provider description used instead of the native library.
    pub fixture: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_non_empty)
    }

    /// Build a config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let encoding = match non_empty(ENCODING_ENV) {
            Some(value) => TextEncoding::try_from(value.as_str())?,
            None => TextEncoding::default(),
        };
        Ok(Self {
            encoding,
            library: non_empty(LIBRARY_ENV).map(PathBuf::from),
            fixture: non_empty(FIXTURE_ENV).map(PathBuf::from),
        })
    }
}

pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
