//! Object identifiers as handed across the provider boundary.
//!
//! An `Oid` owns the BER-encoded arc bytes (the `elements` of a
//! `gss_OID_desc`) and renders the canonical dotted-decimal form on demand.
//! Equality, ordering and hashing all operate on the raw bytes, so two OIDs
//! compare equal exactly when the provider would consider them the same
//! identifier. Only the arc encoding needed to move between the dotted form
//! and the byte form lives here; full DER handling is out of scope.

mod set;
pub mod well_known;

pub use set::OidSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Immutable object identifier stored in its encoded form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Cow<'static, [u8]>);

/// Reasons an OID could not be built from bytes, arcs or dotted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OidParseError {
    Empty,
    InvalidArc(String),
    TooFewArcs,
    FirstArc(u64),
    SecondArc { first: u64, second: u64 },
    Truncated,
    NonMinimal,
    Overflow,
}

impl Oid {
    /// Wrap an encoding known at compile time. The bytes are trusted, so
    /// only the registered constants in `well_known` use this.
    pub(crate) const fn from_static(bytes: &'static [u8]) -> Self {
        Oid(Cow::Borrowed(bytes))
    }

    /// Wrap encoded arc bytes, rejecting anything that does not decode.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, OidParseError> {
        let bytes = bytes.into();
        decode_arcs(&bytes)?;
        Ok(Oid(Cow::Owned(bytes)))
    }

    /// Encode a list of arcs (`[1, 2, 840, ...]`).
    pub fn from_arcs(arcs: &[u64]) -> Result<Self, OidParseError> {
        let [first, second, rest @ ..] = arcs else {
            return Err(OidParseError::TooFewArcs);
        };
        if *first > 2 {
            return Err(OidParseError::FirstArc(*first));
        }
        if *first < 2 && *second >= 40 {
            return Err(OidParseError::SecondArc {
                first: *first,
                second: *second,
            });
        }
        let leading = (first * 40)
            .checked_add(*second)
            .ok_or(OidParseError::Overflow)?;

        let mut bytes = Vec::with_capacity(arcs.len() + 4);
        encode_subidentifier(leading, &mut bytes);
        for arc in rest {
            encode_subidentifier(*arc, &mut bytes);
        }
        Ok(Oid(Cow::Owned(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_owned()
    }

    /// Decoded arcs. Construction guarantees the bytes decode.
    pub fn arcs(&self) -> Vec<u64> {
        decode_arcs(&self.0).unwrap_or_default()
    }

    /// Canonical dotted-decimal form, e.g. `1.2.840.113554.1.2.2`.
    pub fn dotted_form(&self) -> String {
        self.arcs()
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn encode_subidentifier(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut len = 0;
    loop {
        groups[len] = (value & 0x7f) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for idx in (0..len).rev() {
        let continuation = if idx == 0 { 0 } else { 0x80 };
        out.push(groups[idx] | continuation);
    }
}

fn decode_arcs(bytes: &[u8]) -> Result<Vec<u64>, OidParseError> {
    if bytes.is_empty() {
        return Err(OidParseError::Empty);
    }

    let mut arcs = Vec::with_capacity(bytes.len() + 1);
    let mut value: u64 = 0;
    let mut pending = false;
    for &byte in bytes {
        // 0x80 opening a subidentifier is a padded (non-minimal) encoding.
        if !pending && byte == 0x80 {
            return Err(OidParseError::NonMinimal);
        }
        if value > (u64::MAX >> 7) {
            return Err(OidParseError::Overflow);
        }
        value = (value << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 != 0 {
            pending = true;
            continue;
        }

        if arcs.is_empty() {
            let (first, second) = match value {
                0..=39 => (0, value),
                40..=79 => (1, value - 40),
                _ => (2, value - 80),
            };
            arcs.push(first);
            arcs.push(second);
        } else {
            arcs.push(value);
        }
        value = 0;
        pending = false;
    }

    if pending {
        return Err(OidParseError::Truncated);
    }
    Ok(arcs)
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(OidParseError::Empty);
        }
        let arcs = trimmed
            .split('.')
            .map(|segment| {
                let digits = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
                // One dotted spelling per OID: no leading zeros.
                if !digits || (segment.len() > 1 && segment.starts_with('0')) {
                    return Err(OidParseError::InvalidArc(segment.to_string()));
                }
                segment
                    .parse::<u64>()
                    .map_err(|_| OidParseError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Oid::from_arcs(&arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted_form())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.dotted_form())
    }
}

impl Serialize for Oid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.dotted_form())
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|err| serde::de::Error::custom(format!("invalid OID '{value}': {err}")))
    }
}

impl fmt::Display for OidParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OidParseError::Empty => write!(f, "empty object identifier"),
            OidParseError::InvalidArc(arc) => write!(f, "invalid arc '{arc}'"),
            OidParseError::TooFewArcs => write!(f, "an OID needs at least two arcs"),
            OidParseError::FirstArc(arc) => write!(f, "first arc must be 0, 1 or 2, got {arc}"),
            OidParseError::SecondArc { first, second } => {
                write!(f, "second arc under {first} must be below 40, got {second}")
            }
            OidParseError::Truncated => write!(f, "encoding ends inside a subidentifier"),
            OidParseError::NonMinimal => write!(f, "subidentifier has leading padding"),
            OidParseError::Overflow => write!(f, "arc does not fit in 64 bits"),
        }
    }
}

impl std::error::Error for OidParseError {}
