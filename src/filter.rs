//! Three-way attribute matching.
//!
//! A predicate holds `desired`, `except` and `critical` attribute sets. Each
//! accepts a single `Oid` or any collection of them; a single value is the
//! same as a one-element set.
//!
//! A mechanism matches when its attributes include every desired attribute,
//! include none of the excepted ones, and it knows every critical attribute.
//! Empty sets never exclude anything. The catalog hands predicates to the
//! provider unchanged; providers without native matching (the static one)
//! evaluate them with [`AttributePredicate::matches`].

use crate::oid::OidSet;
use crate::provider::MechAttrs;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributePredicate {
    pub desired: OidSet,
    pub except: OidSet,
    pub critical: OidSet,
}

impl AttributePredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from all three parts; pass `None::<Oid>` for an absent part.
    pub fn from_parts(
        desired: impl Into<OidSet>,
        except: impl Into<OidSet>,
        critical: impl Into<OidSet>,
    ) -> Self {
        Self {
            desired: desired.into(),
            except: except.into(),
            critical: critical.into(),
        }
    }

    pub fn desired(mut self, attrs: impl Into<OidSet>) -> Self {
        self.desired = attrs.into();
        self
    }

    pub fn except(mut self, attrs: impl Into<OidSet>) -> Self {
        self.except = attrs.into();
        self
    }

    pub fn critical(mut self, attrs: impl Into<OidSet>) -> Self {
        self.critical = attrs.into();
        self
    }

    /// True when no part constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.desired.is_empty() && self.except.is_empty() && self.critical.is_empty()
    }

    pub fn matches(&self, attrs: &MechAttrs) -> bool {
        attrs.mech_attrs.is_superset(&self.desired)
            && attrs.mech_attrs.is_disjoint(&self.except)
            && attrs.known_mech_attrs.is_superset(&self.critical)
    }
}
