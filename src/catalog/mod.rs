//! Mechanism catalog.
//!
//! Enumeration and lookup over a probed provider. Every enumeration call
//! asks the provider again; the returned `Mechanisms` iterator wraps each OID
//! as it is pulled and keeps the provider's order without deduplicating.
//! Extension-gated operations check the registry before any provider call.

mod mechanisms;

pub use mechanisms::Mechanisms;

use crate::config::{CatalogConfig, TextEncoding};
use crate::error::{MechError, MechResult};
use crate::filter::AttributePredicate;
use crate::mechanism::Mechanism;
use crate::oid::Oid;
use crate::provider::{MechAttrInfo, MechProvider, Name};
use crate::registry::ExtensionRegistry;
use std::sync::Arc;
use tracing::trace;

#[derive(Clone, Debug)]
pub struct MechCatalog {
    registry: Arc<ExtensionRegistry>,
}

impl MechCatalog {
    /// Probe `provider` and build a catalog around the resulting registry.
    pub fn new(provider: Arc<dyn MechProvider>, config: &CatalogConfig) -> Self {
        Self::with_registry(ExtensionRegistry::shared(provider, config.encoding))
    }

    /// Text encoding comes from the registry.
    pub fn with_registry(registry: Arc<ExtensionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    pub fn encoding(&self) -> TextEncoding {
        self.registry.encoding()
    }

    /// Wrap an OID without contacting the provider.
    pub fn mechanism(&self, oid: Oid) -> Mechanism {
        Mechanism::from_oid(oid, &self.registry)
    }

    /// Every mechanism the provider currently supports.
    pub fn all_mechanisms(&self) -> MechResult<Mechanisms> {
        trace!("indicate_mechs");
        let oids = self.registry.provider().indicate_mechs()?;
        Ok(self.wrap(oids))
    }

    /// Mechanisms the provider reports as able to process `name`.
    pub fn mechanisms_for_name(&self, name: &Name) -> MechResult<Mechanisms> {
        trace!(name = %name.value, "inquire_mechs_for_name");
        let oids = self.registry.provider().inquire_mechs_for_name(name)?;
        Ok(self.wrap(oids))
    }

    /// Resolve a SASL mechanism name (e.g. `GS2-KRB5`). Requires RFC 5801.
    pub fn mechanism_by_sasl_name(&self, sasl_name: &str) -> MechResult<Mechanism> {
        let naming = self.registry.require_sasl_naming()?;
        let encoding = self.encoding();
        let encoded = encoding
            .encode(sasl_name)
            .ok_or_else(|| MechError::Encoding {
                encoding,
                text: sasl_name.to_string(),
            })?;
        trace!(sasl_name, "inquire_mech_for_saslname");
        let oid = naming.inquire_mech_for_saslname(&encoded)?;
        Ok(self.mechanism(oid))
    }

    /// Mechanisms matching `predicate`. Requires RFC 5587.
    pub fn mechanisms_by_attributes(
        &self,
        predicate: &AttributePredicate,
    ) -> MechResult<Mechanisms> {
        let inquiry = self.registry.require_attribute_inquiry()?;
        trace!(
            desired = predicate.desired.len(),
            except = predicate.except.len(),
            critical = predicate.critical.len(),
            "indicate_mechs_by_attrs"
        );
        let oids = inquiry.indicate_mechs_by_attrs(
            &predicate.desired,
            &predicate.except,
            &predicate.critical,
        )?;
        Ok(self.wrap(oids))
    }

    /// Name and descriptions of a mechanism attribute. Requires RFC 5587.
    pub fn describe_attribute(&self, attr: &Oid) -> MechResult<MechAttrInfo> {
        let inquiry = self.registry.require_attribute_inquiry()?;
        Ok(inquiry.display_mech_attr(attr)?)
    }

    fn wrap(&self, oids: Vec<Oid>) -> Mechanisms {
        Mechanisms::new(oids, Arc::clone(&self.registry))
    }
}
