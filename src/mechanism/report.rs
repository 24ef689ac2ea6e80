use super::{Mechanism, optional};
use crate::error::MechResult;
use crate::oid::{Oid, OidSet};
use serde::Serialize;

/// Serializable snapshot of a mechanism.
///
/// Fields backed by an extension the provider lacks are left out; provider
/// failures still propagate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MechanismReport {
    pub oid: Oid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mech_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<OidSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_attrs: Option<OidSet>,
    pub name_types: OidSet,
}

impl MechanismReport {
    pub(super) fn collect(mech: &Mechanism) -> MechResult<Self> {
        Ok(Self {
            oid: mech.oid().clone(),
            display_name: mech.display_name(),
            sasl_name: optional(mech.sasl_name())?,
            mech_name: optional(mech.mech_name())?,
            description: optional(mech.description())?,
            attrs: optional(mech.attrs())?,
            known_attrs: optional(mech.known_attrs())?,
            name_types: mech.name_types()?,
        })
    }
}
