//! Extension capability registry.
//!
//! Built once from a provider: every known optional extension is probed and
//! either bound or recorded as unavailable. The registry never changes after
//! construction, so it is shared behind an `Arc` and read from any thread
//! without locking. Mechanisms hold that `Arc` to reach the provider.

use crate::config::TextEncoding;
use crate::error::{MechError, MechResult};
use crate::provider::{AttributeInquiry, ExtensionHandle, MechProvider, SaslNaming};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Optional GSS-API extensions the crate knows how to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extension {
    /// RFC 5801: SASL mechanism names.
    Rfc5801,
    /// RFC 5587: mechanism attribute inquiry.
    Rfc5587,
}

impl Extension {
    pub const ALL: [Extension; 2] = [Extension::Rfc5801, Extension::Rfc5587];

    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Rfc5801 => "rfc5801",
            Extension::Rfc5587 => "rfc5587",
        }
    }

    pub fn rfc(&self) -> &'static str {
        match self {
            Extension::Rfc5801 => "RFC 5801",
            Extension::Rfc5587 => "RFC 5587",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rfc5801" => Some(Extension::Rfc5801),
            "rfc5587" => Some(Extension::Rfc5587),
            _ => None,
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Extension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Extension::from_name(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown extension '{value}'")))
    }
}

/// Provider bindings resolved at initialization.
pub struct ExtensionRegistry {
    provider: Arc<dyn MechProvider>,
    sasl_naming: Option<Arc<dyn SaslNaming>>,
    attribute_inquiry: Option<Arc<dyn AttributeInquiry>>,
    encoding: TextEncoding,
}

impl ExtensionRegistry {
    /// Probe every known extension. Never fails: a provider that cannot bind
    /// an extension simply leaves it unavailable. `encoding` is how text
    /// crosses the provider boundary for every mechanism built on this
    /// registry.
    pub fn probe_provider(provider: Arc<dyn MechProvider>, encoding: TextEncoding) -> Self {
        let mut sasl_naming = None;
        let mut attribute_inquiry = None;

        for extension in Extension::ALL {
            match (extension, provider.bind_extension(extension)) {
                (Extension::Rfc5801, Some(ExtensionHandle::SaslNaming(handle))) => {
                    sasl_naming = Some(handle);
                }
                (Extension::Rfc5587, Some(ExtensionHandle::AttributeInquiry(handle))) => {
                    attribute_inquiry = Some(handle);
                }
                (_, Some(other)) => {
                    warn!(
                        requested = extension.as_str(),
                        bound = other.extension().as_str(),
                        "provider bound the wrong extension; treating it as unavailable"
                    );
                    continue;
                }
                (_, None) => {
                    debug!(extension = extension.as_str(), "extension unavailable");
                    continue;
                }
            }
            debug!(extension = extension.as_str(), "extension bound");
        }

        Self {
            provider,
            sasl_naming,
            attribute_inquiry,
            encoding,
        }
    }

    /// Convenience for callers that always share the registry.
    pub fn shared(provider: Arc<dyn MechProvider>, encoding: TextEncoding) -> Arc<Self> {
        Arc::new(Self::probe_provider(provider, encoding))
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn provider(&self) -> &dyn MechProvider {
        self.provider.as_ref()
    }

    /// Look up an extension by its id (`rfc5801`, `rfc5587`).
    pub fn probe(&self, extension_name: &str) -> Option<ExtensionHandle> {
        match Extension::from_name(extension_name)? {
            Extension::Rfc5801 => self
                .sasl_naming
                .clone()
                .map(ExtensionHandle::SaslNaming),
            Extension::Rfc5587 => self
                .attribute_inquiry
                .clone()
                .map(ExtensionHandle::AttributeInquiry),
        }
    }

    pub fn is_available(&self, extension_name: &str) -> bool {
        Extension::from_name(extension_name).is_some_and(|ext| self.has(ext))
    }

    pub fn has(&self, extension: Extension) -> bool {
        match extension {
            Extension::Rfc5801 => self.sasl_naming.is_some(),
            Extension::Rfc5587 => self.attribute_inquiry.is_some(),
        }
    }

    pub fn sasl_naming(&self) -> Option<&dyn SaslNaming> {
        self.sasl_naming.as_deref()
    }

    pub fn attribute_inquiry(&self) -> Option<&dyn AttributeInquiry> {
        self.attribute_inquiry.as_deref()
    }

    pub fn require_sasl_naming(&self) -> MechResult<&dyn SaslNaming> {
        self.sasl_naming()
            .ok_or(MechError::ExtensionUnavailable(Extension::Rfc5801))
    }

    pub fn require_attribute_inquiry(&self) -> MechResult<&dyn AttributeInquiry> {
        self.attribute_inquiry()
            .ok_or(MechError::ExtensionUnavailable(Extension::Rfc5587))
    }

    /// Availability of every known extension keyed by id.
    pub fn availability(&self) -> BTreeMap<&'static str, bool> {
        Extension::ALL
            .iter()
            .map(|ext| (ext.as_str(), self.has(*ext)))
            .collect()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("rfc5801", &self.sasl_naming.is_some())
            .field("rfc5587", &self.attribute_inquiry.is_some())
            .field("encoding", &self.encoding)
            .finish()
    }
}
