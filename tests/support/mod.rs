#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use gss_mechs::error::ProviderError;
use gss_mechs::{
    CatalogConfig, ExtensionHandle, Extension, MechCatalog, MechProvider, Name, Oid, OidSet,
    StaticProvider,
};
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn sample_fixture_path() -> PathBuf {
    repo_root().join("fixtures").join("provider.json")
}

pub fn gss_mechs_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gss-mechs"))
}

/// Three mechanisms: KRB5 (full SASL triple), SPNEGO (negotiator) and one
/// with an empty mechanism name. `extensions` selects the bound extensions.
pub fn fixture_value(extensions: &[&str]) -> Value {
    json!({
        "schema_version": "gss_provider_fixture_v1",
        "extensions": extensions,
        "mechanisms": [
            {
                "oid": "1.2.840.113554.1.2.2",
                "sasl_name": "GS2-KRB5",
                "mech_name": "KRB5",
                "description": "Kerberos 5",
                "attrs": ["1.3.6.1.5.5.13.1", "1.3.6.1.5.5.13.10", "1.3.6.1.5.5.13.16"],
                "known_attrs": ["1.3.6.1.5.5.13.14"],
                "name_types": ["1.2.840.113554.1.2.1.1", "1.2.840.113554.1.2.1.4"]
            },
            {
                "oid": "1.3.6.1.5.5.2",
                "sasl_name": "SPNEGO",
                "mech_name": "spnego",
                "description": "Negotiation",
                "attrs": ["1.3.6.1.5.5.13.2", "1.3.6.1.5.5.13.4"],
                "name_types": ["1.2.840.113554.1.2.1.4"]
            },
            {
                "oid": "1.3.6.1.5.5.2.99",
                "attrs": ["1.3.6.1.5.5.13.1", "1.3.6.1.5.5.13.10"]
            }
        ],
        "attributes": [
            {
                "oid": "1.3.6.1.5.5.13.10",
                "name": "GSS_C_MA_AUTH_INIT",
                "short_desc": "auth-init-princ",
                "long_desc": "Mechanism authenticates initiator to acceptor"
            }
        ]
    })
}

pub fn static_provider(extensions: &[&str]) -> Result<Arc<StaticProvider>> {
    Ok(Arc::new(StaticProvider::from_value(fixture_value(extensions))?))
}

pub fn catalog(extensions: &[&str]) -> Result<MechCatalog> {
    let provider = static_provider(extensions)?;
    Ok(MechCatalog::new(provider, &CatalogConfig::default()))
}

pub fn write_fixture(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn oid(dotted: &str) -> Oid {
    dotted.parse().expect("valid dotted OID")
}

pub fn oids(mechs: impl IntoIterator<Item = gss_mechs::Mechanism>) -> Vec<Oid> {
    mechs.into_iter().map(|mech| mech.into_oid()).collect()
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// `gss-mechs` against `fixture`, with the environment cleared of overrides.
pub fn gss_mechs_command(fixture: &Path) -> Command {
    let mut cmd = Command::new(gss_mechs_binary());
    cmd.arg("--fixture")
        .arg(fixture)
        .env_remove("GSS_MECHS_FIXTURE")
        .env_remove("GSS_MECHS_LIBRARY")
        .env_remove("GSS_MECHS_ENCODING")
        .env_remove("RUST_LOG");
    cmd
}

pub fn parse_json_lines(stdout: &[u8]) -> Result<Vec<Value>> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).with_context(|| format!("bad JSON line: {line}")))
        .collect()
}

/// Delegating provider that counts enumeration calls.
pub struct CountingProvider {
    inner: Arc<StaticProvider>,
    pub indicate_calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: Arc<StaticProvider>) -> Self {
        Self {
            inner,
            indicate_calls: AtomicUsize::new(0),
        }
    }

    pub fn indicate_calls(&self) -> usize {
        self.indicate_calls.load(Ordering::SeqCst)
    }
}

impl MechProvider for CountingProvider {
    fn indicate_mechs(&self) -> Result<Vec<Oid>, ProviderError> {
        self.indicate_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.indicate_mechs()
    }

    fn inquire_mechs_for_name(&self, name: &Name) -> Result<Vec<Oid>, ProviderError> {
        self.inner.inquire_mechs_for_name(name)
    }

    fn inquire_names_for_mech(&self, mech: &Oid) -> Result<OidSet, ProviderError> {
        self.inner.inquire_names_for_mech(mech)
    }

    fn bind_extension(&self, extension: Extension) -> Option<ExtensionHandle> {
        self.inner.bind_extension(extension)
    }
}
