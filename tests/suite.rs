// Integration suite: catalog behavior over the static provider and the
// gss-mechs binary end to end.

mod support;

use anyhow::Result;
use gss_mechs::oid::well_known::{
    KRB5, MA_AUTH_INIT, MA_DELEG_CRED, MA_MECH_CONCRETE, MA_MECH_NEGO, NT_HOSTBASED_SERVICE,
    SPNEGO,
};
use gss_mechs::{
    AttributePredicate, CatalogConfig, Extension, MechCatalog, Mechanism, Name, Oid, OidSet,
    StaticProvider, TextEncoding, open_catalog,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use support::{
    CountingProvider, catalog, fixture_value, gss_mechs_command, oid, oids, parse_json_lines,
    run_command, sample_fixture_path, static_provider, write_fixture,
};

const BOTH: &[&str] = &["rfc5801", "rfc5587"];
const NONE: &[&str] = &[];

fn hash_of(mech: &Mechanism) -> u64 {
    let mut hasher = DefaultHasher::new();
    mech.hash(&mut hasher);
    hasher.finish()
}

fn unnamed() -> Oid {
    oid("1.3.6.1.5.5.2.99")
}

#[test]
fn identical_oids_give_equal_mechanisms() -> Result<()> {
    let with_naming = catalog(BOTH)?;
    let without = catalog(NONE)?;

    let a = with_naming.mechanism(KRB5);
    let b = without.mechanism(oid("1.2.840.113554.1.2.2"));
    // Resolve cached data on one side only; identity must not change.
    assert_eq!(a.sasl_name()?, "GS2-KRB5");
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let spnego = with_naming.mechanism(SPNEGO);
    assert_ne!(a, spnego);

    let set: HashSet<Mechanism> = [a.clone(), b, spnego].into_iter().collect();
    assert_eq!(set.len(), 2);
    Ok(())
}

#[test]
fn enumeration_round_trips_through_from_oid() -> Result<()> {
    let mut fixture = fixture_value(BOTH);
    fixture["mechanisms"][0]["mech_name"] = json!("kerbéros");
    let provider = Arc::new(StaticProvider::from_value(fixture)?);
    let config = CatalogConfig {
        encoding: TextEncoding::Latin1,
        ..CatalogConfig::default()
    };
    let catalog = MechCatalog::new(provider, &config);

    for mech in catalog.all_mechanisms()? {
        let again = Mechanism::from_oid(mech.oid().clone(), catalog.registry());
        assert_eq!(again, mech);
        assert_eq!(again.encoding(), TextEncoding::Latin1);
        assert_eq!(again.display_name(), mech.display_name());
        assert_eq!(catalog.mechanism(mech.oid().clone()), mech);
    }
    // The UTF-8 bytes of "é" read back as two Latin-1 characters.
    let krb5 = Mechanism::from_oid(KRB5, catalog.registry());
    assert_eq!(krb5.display_name(), "kerb\u{c3}\u{a9}ros");
    assert_eq!(krb5.mech_name()?, "kerb\u{c3}\u{a9}ros");
    assert_eq!(
        krb5.debug_label(),
        "<Mechanism kerbéros (1.2.840.113554.1.2.2)>"
    );
    Ok(())
}

#[test]
fn enumeration_keeps_provider_order_and_requeries() -> Result<()> {
    let counting = Arc::new(CountingProvider::new(static_provider(BOTH)?));
    let catalog = MechCatalog::new(counting.clone(), &CatalogConfig::default());

    let first = catalog.all_mechanisms()?;
    assert_eq!(first.len(), 3);
    assert_eq!(oids(first), vec![KRB5, SPNEGO, unnamed()]);
    let second = oids(catalog.all_mechanisms()?);
    assert_eq!(second.len(), 3);
    assert_eq!(counting.indicate_calls(), 2);
    Ok(())
}

#[test]
fn display_name_prefers_mechanism_name_when_sasl_naming_exists() -> Result<()> {
    let named = catalog(BOTH)?;
    assert_eq!(named.mechanism(KRB5).display_name(), "KRB5");
    assert_eq!(named.mechanism(KRB5).to_string(), "KRB5");
    assert_eq!(
        named.mechanism(KRB5).debug_label(),
        "<Mechanism KRB5 (1.2.840.113554.1.2.2)>"
    );

    let bare = catalog(NONE)?;
    assert_eq!(bare.mechanism(KRB5).display_name(), "1.2.840.113554.1.2.2");
    assert_eq!(
        bare.mechanism(KRB5).debug_label(),
        "<Mechanism (1.2.840.113554.1.2.2)>"
    );
    Ok(())
}

#[test]
fn display_name_never_fails() -> Result<()> {
    let named = catalog(BOTH)?;
    // Empty mechanism name falls back to the dotted form.
    assert_eq!(named.mechanism(unnamed()).display_name(), "1.3.6.1.5.5.2.99");
    // Unknown mechanism: the provider errors, display still succeeds.
    let unknown = named.mechanism(oid("1.2.3.4"));
    assert!(unknown.sasl_name().is_err());
    assert_eq!(unknown.display_name(), "1.2.3.4");
    assert_eq!(unknown.debug_label(), "<Mechanism (1.2.3.4)>");
    Ok(())
}

#[test]
fn sasl_fields_fail_exactly_when_naming_is_absent() -> Result<()> {
    for extensions in [BOTH, &["rfc5801"][..], &["rfc5587"][..], NONE] {
        let catalog = catalog(extensions)?;
        let mech = catalog.mechanism(KRB5);
        let has_naming = extensions.contains(&"rfc5801");
        assert_eq!(catalog.registry().has(Extension::Rfc5801), has_naming);
        match mech.sasl_name() {
            Ok(name) => {
                assert!(has_naming);
                assert_eq!(name, "GS2-KRB5");
                assert_eq!(mech.description()?, "Kerberos 5");
                assert_eq!(mech.mech_name()?, "KRB5");
            }
            Err(err) => {
                assert!(!has_naming);
                assert!(err.is_extension_unavailable());
                assert!(mech.description().unwrap_err().is_extension_unavailable());
            }
        }
    }
    Ok(())
}

#[test]
fn attribute_operations_require_attribute_inquiry() -> Result<()> {
    let catalog = catalog(&["rfc5801"])?;
    let err = catalog
        .mechanisms_by_attributes(&AttributePredicate::new().desired(MA_AUTH_INIT))
        .err()
        .expect("attribute filter without rfc5587");
    assert!(err.is_extension_unavailable());
    assert!(catalog.mechanism(KRB5).known_attrs().unwrap_err().is_extension_unavailable());
    assert!(catalog.mechanism(KRB5).attrs().unwrap_err().is_extension_unavailable());
    assert!(catalog.describe_attribute(&MA_AUTH_INIT).unwrap_err().is_extension_unavailable());
    Ok(())
}

#[test]
fn desired_and_except_partition_by_attribute() -> Result<()> {
    let catalog = catalog(BOTH)?;
    let all = oids(catalog.all_mechanisms()?);
    let with_attr: Vec<Oid> = all
        .iter()
        .filter(|oid| {
            catalog
                .mechanism((*oid).clone())
                .attrs()
                .is_ok_and(|attrs| attrs.contains(&MA_AUTH_INIT))
        })
        .cloned()
        .collect();
    let without_attr: Vec<Oid> = all
        .iter()
        .filter(|oid| !with_attr.contains(oid))
        .cloned()
        .collect();

    let desired = AttributePredicate::new().desired(MA_AUTH_INIT);
    let desired = oids(catalog.mechanisms_by_attributes(&desired)?);
    assert_eq!(desired, with_attr);
    assert_eq!(desired, vec![KRB5, unnamed()]);

    let except = AttributePredicate::new().except(MA_AUTH_INIT);
    let except = oids(catalog.mechanisms_by_attributes(&except)?);
    assert_eq!(except, without_attr);
    assert_eq!(except, vec![SPNEGO]);
    Ok(())
}

#[test]
fn single_oid_is_a_singleton_set() -> Result<()> {
    let catalog = catalog(BOTH)?;
    let cases = [
        (
            AttributePredicate::new().desired(MA_MECH_CONCRETE),
            AttributePredicate::new().desired(OidSet::from([MA_MECH_CONCRETE])),
        ),
        (
            AttributePredicate::new().except(MA_MECH_NEGO),
            AttributePredicate::new().except(vec![MA_MECH_NEGO]),
        ),
        (
            AttributePredicate::new().critical(MA_DELEG_CRED),
            AttributePredicate::new().critical(OidSet::from_iter([MA_DELEG_CRED])),
        ),
    ];
    for (single, set) in cases {
        assert_eq!(single, set);
        assert_eq!(
            oids(catalog.mechanisms_by_attributes(&single)?),
            oids(catalog.mechanisms_by_attributes(&set)?)
        );
    }
    Ok(())
}

#[test]
fn absent_predicate_parts_do_not_restrict() -> Result<()> {
    let catalog = catalog(BOTH)?;
    let everything = oids(catalog.all_mechanisms()?);
    let unconstrained = AttributePredicate::from_parts(None::<Oid>, None::<Oid>, None::<Oid>);
    assert!(unconstrained.is_unconstrained());
    assert_eq!(oids(catalog.mechanisms_by_attributes(&unconstrained)?), everything);
    Ok(())
}

#[test]
fn critical_attributes_must_be_known() -> Result<()> {
    let catalog = catalog(BOTH)?;
    // KRB5 knows 1.3.6.1.5.5.13.14 without having it.
    let anon = oid("1.3.6.1.5.5.13.14");
    let found = oids(catalog.mechanisms_by_attributes(&AttributePredicate::new().critical(anon))?);
    assert_eq!(found, vec![KRB5]);
    // Attributes a mechanism has are known to it as well.
    assert!(catalog.mechanism(KRB5).known_attrs()?.contains(&MA_DELEG_CRED));
    Ok(())
}

#[test]
fn sasl_lookup_resolves_and_reports_misses() -> Result<()> {
    let catalog = catalog(BOTH)?;
    let mech = catalog.mechanism_by_sasl_name("GS2-KRB5")?;
    assert_eq!(mech.oid(), &KRB5);

    let err = catalog
        .mechanism_by_sasl_name("GS2-NOPE")
        .err()
        .expect("unknown SASL name");
    assert!(err.provider_error().is_some());

    let bare = catalog_without_naming()?;
    let err = bare.mechanism_by_sasl_name("GS2-KRB5").err().expect("no rfc5801");
    assert!(err.is_extension_unavailable());
    Ok(())
}

fn catalog_without_naming() -> Result<MechCatalog> {
    catalog(&["rfc5587"])
}

#[test]
fn sasl_names_outside_the_encoding_are_rejected_locally() -> Result<()> {
    let provider = static_provider(BOTH)?;
    let config = CatalogConfig {
        encoding: TextEncoding::Ascii,
        ..CatalogConfig::default()
    };
    let catalog = MechCatalog::new(provider, &config);
    let err = catalog
        .mechanism_by_sasl_name("GS2-KRB5\u{e9}")
        .err()
        .expect("non-ascii SASL name");
    assert!(matches!(err, gss_mechs::MechError::Encoding { .. }));
    Ok(())
}

#[test]
fn names_select_mechanisms_by_name_type() -> Result<()> {
    let catalog = catalog(NONE)?;
    let users = oids(catalog.mechanisms_for_name(&Name::new("alice@EXAMPLE.COM"))?);
    assert_eq!(users, vec![KRB5]);

    let services = oids(catalog.mechanisms_for_name(
        &Name::new("host@server.example.com").with_type(NT_HOSTBASED_SERVICE),
    )?);
    assert_eq!(services, vec![KRB5, SPNEGO]);

    let err = catalog
        .mechanisms_for_name(&Name::new(""))
        .err()
        .expect("empty name");
    assert!(err.provider_error().is_some());
    Ok(())
}

#[test]
fn name_types_do_not_need_extensions() -> Result<()> {
    let catalog = catalog(NONE)?;
    let types = catalog.mechanism(SPNEGO).name_types()?;
    assert_eq!(types, OidSet::from(NT_HOSTBASED_SERVICE));
    assert!(catalog.mechanism(oid("1.2.3.4")).name_types().is_err());
    Ok(())
}

#[test]
fn reports_omit_unavailable_fields() -> Result<()> {
    let full = serde_json::to_value(catalog(BOTH)?.mechanism(KRB5).report()?)?;
    assert_eq!(full["oid"], json!("1.2.840.113554.1.2.2"));
    assert_eq!(full["display_name"], json!("KRB5"));
    assert_eq!(full["sasl_name"], json!("GS2-KRB5"));
    assert_eq!(full["description"], json!("Kerberos 5"));
    assert_eq!(
        full["attrs"],
        json!(["1.3.6.1.5.5.13.1", "1.3.6.1.5.5.13.10", "1.3.6.1.5.5.13.16"])
    );

    let bare = serde_json::to_value(catalog(NONE)?.mechanism(KRB5).report()?)?;
    assert_eq!(bare["display_name"], json!("1.2.840.113554.1.2.2"));
    let object = bare.as_object().expect("report is an object");
    for key in ["sasl_name", "mech_name", "description", "attrs", "known_attrs"] {
        assert!(!object.contains_key(key), "{key} should be omitted");
    }
    assert_eq!(
        bare["name_types"],
        json!(["1.2.840.113554.1.2.1.1", "1.2.840.113554.1.2.1.4"])
    );
    Ok(())
}

#[test]
fn attribute_descriptions_come_from_the_provider() -> Result<()> {
    let catalog = catalog(BOTH)?;
    let info = catalog.describe_attribute(&MA_AUTH_INIT)?;
    assert_eq!(info.name, "GSS_C_MA_AUTH_INIT");
    assert_eq!(info.short_desc, "auth-init-princ");
    assert!(catalog.describe_attribute(&MA_DELEG_CRED).is_err());
    Ok(())
}

#[test]
fn fixture_files_load_through_the_config() -> Result<()> {
    let file = write_fixture(&fixture_value(&["rfc5801"]))?;
    let config = CatalogConfig::from_lookup(|name: &str| match name {
        "GSS_MECHS_FIXTURE" => Some(file.path().display().to_string()),
        "GSS_MECHS_ENCODING" => Some("latin-1".to_string()),
        _ => None,
    })?;
    assert_eq!(config.encoding, TextEncoding::Latin1);

    let catalog = open_catalog(&config)?;
    assert_eq!(catalog.encoding(), TextEncoding::Latin1);
    assert!(catalog.registry().is_available("rfc5801"));
    assert!(!catalog.registry().is_available("rfc5587"));
    assert!(!catalog.registry().is_available("rfc9999"));
    assert_eq!(catalog.all_mechanisms()?.len(), 3);
    Ok(())
}

#[test]
fn invalid_fixtures_are_rejected() -> Result<()> {
    let mut bad_oid = fixture_value(BOTH);
    bad_oid["mechanisms"][0]["oid"] = json!("krb5");
    let err = StaticProvider::from_value(bad_oid).unwrap_err();
    assert!(format!("{err:#}").contains("schema validation"));

    let mut duplicate = fixture_value(BOTH);
    let first = duplicate["mechanisms"][0].clone();
    duplicate["mechanisms"]
        .as_array_mut()
        .expect("mechanisms array")
        .push(first);
    let err = StaticProvider::from_value(duplicate).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate mechanism 1.2.840.113554.1.2.2"));

    let stale = json!({"schema_version": "gss_provider_fixture_v0", "mechanisms": []});
    let file = write_fixture(&stale)?;
    assert!(StaticProvider::load(file.path()).is_err());
    Ok(())
}

#[test]
fn sample_fixture_is_valid() -> Result<()> {
    let provider = StaticProvider::load(&sample_fixture_path())?;
    let catalog = MechCatalog::new(Arc::new(provider), &CatalogConfig::default());
    let names: Vec<String> = catalog
        .all_mechanisms()?
        .map(|mech| mech.display_name())
        .collect();
    assert_eq!(names, vec!["krb5", "spnego", "ntlmssp"]);
    assert_eq!(catalog.mechanism_by_sasl_name("GS2-NTLM")?.display_name(), "ntlmssp");
    Ok(())
}

#[test]
fn cli_lists_reports_as_json_lines() -> Result<()> {
    let mut cmd = gss_mechs_command(&sample_fixture_path());
    cmd.arg("list");
    let output = run_command(cmd)?;
    let reports = parse_json_lines(&output.stdout)?;
    let oids: Vec<&str> = reports
        .iter()
        .filter_map(|report| report["oid"].as_str())
        .collect();
    assert_eq!(
        oids,
        vec!["1.2.840.113554.1.2.2", "1.3.6.1.5.5.2", "1.3.6.1.4.1.311.2.2.10"]
    );
    assert_eq!(reports[0]["sasl_name"], json!("GS2-KRB5"));
    Ok(())
}

#[test]
fn cli_show_accepts_oids_and_sasl_names() -> Result<()> {
    for target in ["1.2.840.113554.1.2.2", "GS2-KRB5"] {
        let mut cmd = gss_mechs_command(&sample_fixture_path());
        cmd.args(["show", target]);
        let output = run_command(cmd)?;
        let report: Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(report["oid"], json!("1.2.840.113554.1.2.2"));
        assert_eq!(report["display_name"], json!("krb5"));
    }
    Ok(())
}

#[test]
fn cli_filters_and_describes_attributes() -> Result<()> {
    let mut cmd = gss_mechs_command(&sample_fixture_path());
    cmd.args(["by-attrs", "--desired", "1.3.6.1.5.5.13.10", "--except", "1.3.6.1.5.5.13.16"]);
    let reports = parse_json_lines(&run_command(cmd)?.stdout)?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["oid"], json!("1.3.6.1.4.1.311.2.2.10"));

    let mut cmd = gss_mechs_command(&sample_fixture_path());
    cmd.args(["describe-attr", "1.3.6.1.5.5.13.16"]);
    let info: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(info["name"], json!("GSS_C_MA_DELEG_CRED"));

    let mut cmd = gss_mechs_command(&sample_fixture_path());
    cmd.arg("extensions");
    let availability: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(availability, json!({"rfc5587": true, "rfc5801": true}));
    Ok(())
}

#[test]
fn cli_reports_missing_extensions_as_errors() -> Result<()> {
    let file = write_fixture(&fixture_value(NONE))?;
    let mut cmd = gss_mechs_command(file.path());
    cmd.args(["by-attrs", "--desired", "1.3.6.1.5.5.13.10"]);
    let output = cmd.output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rfc5587"), "stderr: {stderr}");
    Ok(())
}
