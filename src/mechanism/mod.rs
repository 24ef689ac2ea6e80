//! Mechanism identity.
//!
//! A `Mechanism` is an OID plus the registry it can ask for descriptive
//! data. Identity is the OID alone: equality, ordering and hashing ignore the
//! registry and every cached answer. SASL naming and attribute answers are
//! fetched on first use and memoized per instance; racing threads may both
//! query the provider, and whichever answer lands first is kept.

mod report;

pub use report::MechanismReport;

use crate::config::TextEncoding;
use crate::error::{MechError, MechResult};
use crate::oid::{Oid, OidSet};
use crate::provider::{MechAttrs, SaslNameInfo};
use crate::registry::{Extension, ExtensionRegistry};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};
use tracing::trace;

#[derive(Clone)]
pub struct Mechanism {
    oid: Oid,
    registry: Arc<ExtensionRegistry>,
    saslname: OnceLock<SaslNameInfo>,
    attrs: OnceLock<MechAttrs>,
}

impl Mechanism {
    /// Wrap an OID. Does not contact the provider. Text is decoded with
    /// the registry's encoding.
    pub fn from_oid(oid: Oid, registry: &Arc<ExtensionRegistry>) -> Self {
        Self {
            oid,
            registry: Arc::clone(registry),
            saslname: OnceLock::new(),
            attrs: OnceLock::new(),
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.registry.encoding()
    }

    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    pub fn into_oid(self) -> Oid {
        self.oid
    }

    pub fn dotted_form(&self) -> String {
        self.oid.dotted_form()
    }

    /// Name types this mechanism accepts. Core inquiry, not cached.
    pub fn name_types(&self) -> MechResult<OidSet> {
        Ok(self.registry.provider().inquire_names_for_mech(&self.oid)?)
    }

    /// SASL mechanism name, e.g. `GS2-KRB5`. Requires RFC 5801.
    pub fn sasl_name(&self) -> MechResult<String> {
        let info = self.saslname()?;
        Ok(String::from_utf8_lossy(&info.sasl_mech_name).into_owned())
    }

    /// Provider's short mechanism name, e.g. `krb5`. Requires RFC 5801.
    pub fn mech_name(&self) -> MechResult<String> {
        let info = self.saslname()?;
        Ok(self.encoding().decode(&info.mech_name))
    }

    /// Human-readable description. Requires RFC 5801.
    pub fn description(&self) -> MechResult<String> {
        let info = self.saslname()?;
        Ok(String::from_utf8_lossy(&info.mech_description).into_owned())
    }

    /// Attributes the mechanism knows how to evaluate. Requires RFC 5587.
    pub fn known_attrs(&self) -> MechResult<OidSet> {
        Ok(self.attr_info()?.known_mech_attrs.clone())
    }

    /// Attributes the mechanism has. Requires RFC 5587.
    pub fn attrs(&self) -> MechResult<OidSet> {
        Ok(self.attr_info()?.mech_attrs.clone())
    }

    /// Mechanism name when SASL naming yields a non-empty one, else the
    /// dotted OID. Never fails.
    pub fn display_name(&self) -> String {
        match self.nonempty_mech_name() {
            Some(name) => self.encoding().decode(name),
            None => self.oid.dotted_form(),
        }
    }

    /// `<Mechanism NAME (DOTTED)>`, or `<Mechanism (DOTTED)>` when no name
    /// is available. The name is read as UTF-8 whatever the configured
    /// encoding. Never fails.
    pub fn debug_label(&self) -> String {
        match self.nonempty_mech_name() {
            Some(name) => {
                let name = String::from_utf8_lossy(name);
                format!("<Mechanism {name} ({})>", self.oid)
            }
            None => format!("<Mechanism ({})>", self.oid),
        }
    }

    /// Snapshot of every field the provider can answer.
    pub fn report(&self) -> MechResult<MechanismReport> {
        MechanismReport::collect(self)
    }

    fn nonempty_mech_name(&self) -> Option<&[u8]> {
        if !self.registry.has(Extension::Rfc5801) {
            return None;
        }
        let info = self.saslname().ok()?;
        if info.mech_name.is_empty() {
            return None;
        }
        Some(&info.mech_name)
    }

    fn saslname(&self) -> MechResult<&SaslNameInfo> {
        let naming = self.registry.require_sasl_naming()?;
        if let Some(info) = self.saslname.get() {
            return Ok(info);
        }
        trace!(mech = %self.oid, "inquire_saslname_for_mech");
        let info = naming.inquire_saslname_for_mech(&self.oid)?;
        Ok(self.saslname.get_or_init(|| info))
    }

    fn attr_info(&self) -> MechResult<&MechAttrs> {
        let inquiry = self.registry.require_attribute_inquiry()?;
        if let Some(attrs) = self.attrs.get() {
            return Ok(attrs);
        }
        trace!(mech = %self.oid, "inquire_attrs_for_mech");
        let attrs = inquiry.inquire_attrs_for_mech(&self.oid)?;
        Ok(self.attrs.get_or_init(|| attrs))
    }
}

/// Drop `ExtensionUnavailable` into `None`, keep every other outcome.
pub(crate) fn optional<T>(result: MechResult<T>) -> MechResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(MechError::ExtensionUnavailable(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

impl PartialEq for Mechanism {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for Mechanism {}

impl PartialOrd for Mechanism {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mechanism {
    fn cmp(&self, other: &Self) -> Ordering {
        self.oid.cmp(&other.oid)
    }
}

impl Hash for Mechanism {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.oid.hash(state);
    }
}

impl AsRef<Oid> for Mechanism {
    fn as_ref(&self) -> &Oid {
        &self.oid
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl fmt::Debug for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mechanism")
            .field("oid", &self.oid.dotted_form())
            .finish_non_exhaustive()
    }
}
