//! The call boundary to the underlying GSS-API provider.
//!
//! Providers expose three capability groups. Core mechanism/name inquiry is
//! always present (`MechProvider`); the RFC 5801 SASL naming calls
//! (`SaslNaming`) and RFC 5587 attribute calls (`AttributeInquiry`) are
//! optional and handed out through `MechProvider::bind_extension`, which the
//! registry calls exactly once per extension.
//!
//! Two providers ship with the crate: `native` binds the system GSS-API
//! library at runtime and `fixture` serves a JSON description from memory.

pub mod fixture;
#[cfg(unix)]
pub mod native;

use crate::config::CatalogConfig;
use crate::error::ProviderError;
use crate::oid::{Oid, OidSet};
use crate::registry::Extension;
use anyhow::{Context, Result};
use std::fmt;
use std::sync::Arc;

pub use fixture::{ProviderFixture, StaticProvider};
#[cfg(unix)]
pub use native::NativeProvider;

/// Core inquiry every provider implements.
pub trait MechProvider: Send + Sync {
    /// Every mechanism the provider supports, in provider order.
    fn indicate_mechs(&self) -> Result<Vec<Oid>, ProviderError>;

    /// Mechanisms able to process `name`.
    fn inquire_mechs_for_name(&self, name: &Name) -> Result<Vec<Oid>, ProviderError>;

    /// Name types `mech` accepts.
    fn inquire_names_for_mech(&self, mech: &Oid) -> Result<OidSet, ProviderError>;

    /// Bind an optional extension. `None` means the provider lacks it.
    fn bind_extension(&self, extension: Extension) -> Option<ExtensionHandle>;
}

/// RFC 5801 mechanism naming.
pub trait SaslNaming: Send + Sync {
    fn inquire_saslname_for_mech(&self, mech: &Oid) -> Result<SaslNameInfo, ProviderError>;

    /// `sasl_name` is already encoded in the caller's text encoding.
    fn inquire_mech_for_saslname(&self, sasl_name: &[u8]) -> Result<Oid, ProviderError>;
}

/// RFC 5587 mechanism attribute inquiry.
pub trait AttributeInquiry: Send + Sync {
    fn inquire_attrs_for_mech(&self, mech: &Oid) -> Result<MechAttrs, ProviderError>;

    fn indicate_mechs_by_attrs(
        &self,
        desired: &OidSet,
        except: &OidSet,
        critical: &OidSet,
    ) -> Result<Vec<Oid>, ProviderError>;

    fn display_mech_attr(&self, attr: &Oid) -> Result<MechAttrInfo, ProviderError>;
}

/// A bound extension as returned by `MechProvider::bind_extension`.
#[derive(Clone)]
pub enum ExtensionHandle {
    SaslNaming(Arc<dyn SaslNaming>),
    AttributeInquiry(Arc<dyn AttributeInquiry>),
}

impl ExtensionHandle {
    pub fn extension(&self) -> Extension {
        match self {
            ExtensionHandle::SaslNaming(_) => Extension::Rfc5801,
            ExtensionHandle::AttributeInquiry(_) => Extension::Rfc5587,
        }
    }
}

impl fmt::Debug for ExtensionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtensionHandle({})", self.extension().as_str())
    }
}

/// Raw answer of `gss_inquire_saslname_for_mech`; buffers are undecoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaslNameInfo {
    pub sasl_mech_name: Vec<u8>,
    pub mech_name: Vec<u8>,
    pub mech_description: Vec<u8>,
}

/// Answer of `gss_inquire_attrs_for_mech`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MechAttrs {
    /// Attributes the mechanism has.
    pub mech_attrs: OidSet,
    /// Attributes the mechanism knows how to evaluate.
    pub known_mech_attrs: OidSet,
}

/// Answer of `gss_display_mech_attr`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MechAttrInfo {
    pub name: String,
    pub short_desc: String,
    pub long_desc: String,
}

/// Principal name handed to `inquire_mechs_for_name`.
///
/// The provider imports it however it needs; `name_type` of `None` asks for
/// the provider's default printable syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    pub value: String,
    pub name_type: Option<Oid>,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name_type: None,
        }
    }

    pub fn with_type(mut self, name_type: Oid) -> Self {
        self.name_type = Some(name_type);
        self
    }
}

/// Open the provider selected by `config`: the fixture when one is set,
/// otherwise the native library.
pub fn open_provider(config: &CatalogConfig) -> Result<Arc<dyn MechProvider>> {
    if let Some(path) = &config.fixture {
        let provider = StaticProvider::load(path)
            .with_context(|| format!("loading provider fixture {}", path.display()))?;
        return Ok(Arc::new(provider));
    }
    open_native(config)
}

#[cfg(unix)]
fn open_native(config: &CatalogConfig) -> Result<Arc<dyn MechProvider>> {
    Ok(Arc::new(NativeProvider::load(config.library.as_deref())?))
}

#[cfg(not(unix))]
fn open_native(_config: &CatalogConfig) -> Result<Arc<dyn MechProvider>> {
    anyhow::bail!("no native GSS-API binding on this platform; set GSS_MECHS_FIXTURE")
}
