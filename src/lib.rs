//! GSS-API mechanism catalog.
//!
//! The crate wraps a GSS-API provider (the system library, or a static JSON
//! description) behind a small typed surface: `Oid` values, an
//! `ExtensionRegistry` probed once for the RFC 5801 and RFC 5587 extensions,
//! `Mechanism` handles that lazily fetch and cache descriptive data, and a
//! `MechCatalog` that enumerates and looks mechanisms up. The `gss-mechs`
//! binary is a thin JSON front end over the same calls.

use anyhow::{Context, Result};
use std::sync::Arc;

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod mechanism;
pub mod oid;
pub mod provider;
pub mod registry;
mod schema_loader;

pub use catalog::{MechCatalog, Mechanisms};
pub use config::{CatalogConfig, TextEncoding};
pub use error::{MechError, MechResult, ProviderError};
pub use filter::AttributePredicate;
pub use mechanism::{Mechanism, MechanismReport};
pub use oid::{Oid, OidParseError, OidSet};
pub use provider::{
    AttributeInquiry, ExtensionHandle, MechAttrInfo, MechAttrs, MechProvider, Name, SaslNameInfo,
    SaslNaming, StaticProvider,
};
pub use registry::{Extension, ExtensionRegistry};

/// Open the provider `config` points at and probe it into a catalog.
pub fn open_catalog(config: &CatalogConfig) -> Result<MechCatalog> {
    let provider: Arc<dyn MechProvider> = provider::open_provider(config)?;
    Ok(MechCatalog::new(provider, config))
}

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Parse a comma- or whitespace-delimited list of dotted OIDs.
pub fn parse_oid_list(value: &str) -> Result<OidSet> {
    split_list(value)
        .iter()
        .map(|token| {
            token
                .parse::<Oid>()
                .with_context(|| format!("Invalid OID '{token}'"))
        })
        .collect()
}
