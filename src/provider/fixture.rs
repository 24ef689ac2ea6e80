//! In-memory provider described by a JSON document.
//!
//! The description (`schema/provider_fixture.schema.json`) declares which
//! extensions the provider has and what it knows about each mechanism. It
//! backs the test suite and lets the CLI inspect a provider layout offline.
//! Loading is strict: the document must pass the schema, and duplicate
//! mechanism OIDs, duplicate SASL names and duplicate attribute entries are
//! rejected rather than silently shadowed.

use super::{
    AttributeInquiry, ExtensionHandle, MechAttrInfo, MechAttrs, MechProvider, Name, SaslNameInfo,
    SaslNaming,
};
use crate::error::{ProviderError, status};
use crate::filter::AttributePredicate;
use crate::oid::well_known::NT_USER_NAME;
use crate::oid::{Oid, OidSet};
use crate::registry::Extension;
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const FIXTURE_SCHEMA_VERSION: &str = "gss_provider_fixture_v1";
const FIXTURE_SCHEMA_PATH: &str = "schema/provider_fixture.schema.json";

/// Provider description as stored on disk.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderFixture {
    pub schema_version: String,
    #[serde(default)]
    pub extensions: BTreeSet<Extension>,
    pub mechanisms: Vec<MechanismEntry>,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MechanismEntry {
    pub oid: Oid,
    #[serde(default)]
    pub sasl_name: String,
    #[serde(default)]
    pub mech_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attrs: OidSet,
    /// Attributes the mechanism can evaluate beyond the ones it has.
    #[serde(default)]
    pub known_attrs: OidSet,
    #[serde(default)]
    pub name_types: OidSet,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AttributeEntry {
    pub oid: Oid,
    pub name: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub long_desc: String,
}

/// Provider answering from a validated `ProviderFixture`.
#[derive(Clone, Debug)]
pub struct StaticProvider {
    inner: Arc<FixtureData>,
}

#[derive(Debug)]
struct FixtureData {
    extensions: BTreeSet<Extension>,
    mechanisms: Vec<MechanismEntry>,
    attributes: BTreeMap<Oid, MechAttrInfo>,
}

impl StaticProvider {
    /// Read, schema-validate and index a description file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Self::from_value_with_schema(value, &resolve_fixture_schema_path(path))
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Schema-validate and index an in-memory description.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_schema(value, &canonical_fixture_schema_path())
    }

    /// Index a description that is already deserialized. Skips the schema
    /// pass but keeps the consistency checks.
    pub fn from_fixture(fixture: ProviderFixture) -> Result<Self> {
        if fixture.schema_version != FIXTURE_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported (expected {})",
                fixture.schema_version,
                FIXTURE_SCHEMA_VERSION
            );
        }
        let inner = build_index(fixture)?;
        debug!(
            mechanisms = inner.mechanisms.len(),
            extensions = ?inner.extensions,
            "static provider ready"
        );
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    fn from_value_with_schema(value: Value, schema_path: &Path) -> Result<Self> {
        let allowed = BTreeSet::from([FIXTURE_SCHEMA_VERSION.to_string()]);
        let schema = load_json_schema(
            schema_path,
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
                ..Default::default()
            },
        )?;
        schema.validate(&value, "provider fixture")?;
        debug!(
            schema_version = %schema.schema_version,
            "provider fixture passed schema validation"
        );
        let fixture: ProviderFixture =
            serde_json::from_value(value).context("deserializing provider fixture")?;
        Self::from_fixture(fixture)
    }

    fn find(&self, mech: &Oid) -> Result<&MechanismEntry, ProviderError> {
        self.inner
            .mechanisms
            .iter()
            .find(|entry| &entry.oid == mech)
            .ok_or_else(|| {
                ProviderError::new(
                    status::BAD_MECH,
                    0,
                    format!("mechanism {mech} is not supported"),
                )
            })
    }
}

fn build_index(fixture: ProviderFixture) -> Result<FixtureData> {
    let mut seen_oids = BTreeSet::new();
    let mut seen_sasl = BTreeSet::new();
    let mut mechanisms = Vec::with_capacity(fixture.mechanisms.len());
    for mut entry in fixture.mechanisms {
        if !seen_oids.insert(entry.oid.clone()) {
            bail!("duplicate mechanism {}", entry.oid);
        }
        if !entry.sasl_name.is_empty() && !seen_sasl.insert(entry.sasl_name.clone()) {
            bail!("duplicate SASL name {}", entry.sasl_name);
        }
        // A mechanism knows every attribute it has.
        entry.known_attrs = entry.known_attrs.union(&entry.attrs);
        mechanisms.push(entry);
    }

    let mut attributes = BTreeMap::new();
    for attr in fixture.attributes {
        if attributes.contains_key(&attr.oid) {
            bail!("duplicate attribute {}", attr.oid);
        }
        attributes.insert(
            attr.oid,
            MechAttrInfo {
                name: attr.name,
                short_desc: attr.short_desc,
                long_desc: attr.long_desc,
            },
        );
    }

    Ok(FixtureData {
        extensions: fixture.extensions,
        mechanisms,
        attributes,
    })
}

fn canonical_fixture_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_SCHEMA_PATH)
}

fn resolve_fixture_schema_path(fixture_path: &Path) -> PathBuf {
    if let Some(base) = fixture_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(FIXTURE_SCHEMA_PATH);
        if candidate.exists() {
            return candidate;
        }
    }
    canonical_fixture_schema_path()
}

impl MechProvider for StaticProvider {
    fn indicate_mechs(&self) -> Result<Vec<Oid>, ProviderError> {
        Ok(self
            .inner
            .mechanisms
            .iter()
            .map(|entry| entry.oid.clone())
            .collect())
    }

    /// A name matches mechanisms listing its name type; an untyped name uses
    /// the default user-name syntax.
    fn inquire_mechs_for_name(&self, name: &Name) -> Result<Vec<Oid>, ProviderError> {
        if name.value.trim().is_empty() {
            return Err(ProviderError::new(
                status::BAD_NAME,
                0,
                "an empty name cannot be imported",
            ));
        }
        let name_type = name.name_type.clone().unwrap_or(NT_USER_NAME);
        let mechs: Vec<Oid> = self
            .inner
            .mechanisms
            .iter()
            .filter(|entry| entry.name_types.contains(&name_type))
            .map(|entry| entry.oid.clone())
            .collect();
        if mechs.is_empty() {
            return Err(ProviderError::new(
                status::BAD_NAMETYPE,
                0,
                format!("no mechanism accepts name type {name_type}"),
            ));
        }
        Ok(mechs)
    }

    fn inquire_names_for_mech(&self, mech: &Oid) -> Result<OidSet, ProviderError> {
        Ok(self.find(mech)?.name_types.clone())
    }

    fn bind_extension(&self, extension: Extension) -> Option<ExtensionHandle> {
        if !self.inner.extensions.contains(&extension) {
            return None;
        }
        let handle = Arc::new(self.clone());
        Some(match extension {
            Extension::Rfc5801 => ExtensionHandle::SaslNaming(handle),
            Extension::Rfc5587 => ExtensionHandle::AttributeInquiry(handle),
        })
    }
}

impl SaslNaming for StaticProvider {
    fn inquire_saslname_for_mech(&self, mech: &Oid) -> Result<SaslNameInfo, ProviderError> {
        let entry = self.find(mech)?;
        Ok(SaslNameInfo {
            sasl_mech_name: entry.sasl_name.as_bytes().to_vec(),
            mech_name: entry.mech_name.as_bytes().to_vec(),
            mech_description: entry.description.as_bytes().to_vec(),
        })
    }

    fn inquire_mech_for_saslname(&self, sasl_name: &[u8]) -> Result<Oid, ProviderError> {
        self.inner
            .mechanisms
            .iter()
            .find(|entry| !entry.sasl_name.is_empty() && entry.sasl_name.as_bytes() == sasl_name)
            .map(|entry| entry.oid.clone())
            .ok_or_else(|| {
                ProviderError::new(
                    status::BAD_MECH,
                    0,
                    format!(
                        "no mechanism has SASL name '{}'",
                        String::from_utf8_lossy(sasl_name)
                    ),
                )
            })
    }
}

impl AttributeInquiry for StaticProvider {
    fn inquire_attrs_for_mech(&self, mech: &Oid) -> Result<MechAttrs, ProviderError> {
        let entry = self.find(mech)?;
        Ok(MechAttrs {
            mech_attrs: entry.attrs.clone(),
            known_mech_attrs: entry.known_attrs.clone(),
        })
    }

    fn indicate_mechs_by_attrs(
        &self,
        desired: &OidSet,
        except: &OidSet,
        critical: &OidSet,
    ) -> Result<Vec<Oid>, ProviderError> {
        let predicate =
            AttributePredicate::from_parts(desired.clone(), except.clone(), critical.clone());
        Ok(self
            .inner
            .mechanisms
            .iter()
            .filter(|entry| {
                predicate.matches(&MechAttrs {
                    mech_attrs: entry.attrs.clone(),
                    known_mech_attrs: entry.known_attrs.clone(),
                })
            })
            .map(|entry| entry.oid.clone())
            .collect())
    }

    fn display_mech_attr(&self, attr: &Oid) -> Result<MechAttrInfo, ProviderError> {
        self.inner.attributes.get(attr).cloned().ok_or_else(|| {
            ProviderError::new(
                status::BAD_MECH_ATTR,
                0,
                format!("unknown mechanism attribute {attr}"),
            )
        })
    }
}
