//! Command-line front end over the mechanism catalog.
//!
//! Every command prints JSON to stdout (one object per line for listings) so
//! the output can be piped into `jq`. Provider selection follows
//! `CatalogConfig`: `--fixture`/`--library` override the matching
//! `GSS_MECHS_*` variables.

use anyhow::{Context, Result, bail};
use gss_mechs::{
    AttributePredicate, CatalogConfig, MechCatalog, Mechanism, Name, Oid, open_catalog,
    parse_oid_list,
};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse(env::args().skip(1))?;

    let mut config = CatalogConfig::from_env()?;
    if let Some(path) = cli.fixture {
        config.fixture = Some(path);
    }
    if let Some(path) = cli.library {
        config.library = Some(path);
    }
    let catalog = open_catalog(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::List => {
            let mechs = catalog.all_mechanisms()?;
            write_reports(&mut out, mechs)?;
        }
        Command::Show { target } => {
            let mech = resolve_mechanism(&catalog, &target)?;
            write_json(&mut out, &mech.report()?)?;
        }
        Command::ForName { name, name_type } => {
            let mut name = Name::new(name);
            if let Some(name_type) = name_type {
                name = name.with_type(name_type);
            }
            let mechs = catalog.mechanisms_for_name(&name)?;
            write_reports(&mut out, mechs)?;
        }
        Command::ByAttrs(predicate) => {
            let mechs = catalog.mechanisms_by_attributes(&predicate)?;
            write_reports(&mut out, mechs)?;
        }
        Command::Extensions => {
            write_json(&mut out, &catalog.registry().availability())?;
        }
        Command::DescribeAttr { attr } => {
            write_json(&mut out, &catalog.describe_attribute(&attr)?)?;
        }
    }
    out.flush().context("flushing stdout")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Dotted input is taken as an OID; anything else as a SASL mechanism name.
fn resolve_mechanism(catalog: &MechCatalog, target: &str) -> Result<Mechanism> {
    if looks_dotted(target) {
        let oid: Oid = target
            .parse()
            .with_context(|| format!("Invalid OID '{target}'"))?;
        return Ok(catalog.mechanism(oid));
    }
    catalog
        .mechanism_by_sasl_name(target)
        .with_context(|| format!("Unable to resolve SASL name '{target}'"))
}

fn looks_dotted(value: &str) -> bool {
    value.contains('.') && value.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn write_reports(
    out: &mut impl Write,
    mechs: impl Iterator<Item = Mechanism>,
) -> Result<()> {
    for mech in mechs {
        let report = mech
            .report()
            .with_context(|| format!("Unable to describe {}", mech.debug_label()))?;
        write_json(out, &report)?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("serializing output")?;
    writeln!(out).context("writing output")
}

#[derive(Debug, PartialEq)]
struct Cli {
    fixture: Option<PathBuf>,
    library: Option<PathBuf>,
    command: Command,
}

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Show { target: String },
    ForName { name: String, name_type: Option<Oid> },
    ByAttrs(AttributePredicate),
    Extensions,
    DescribeAttr { attr: Oid },
}

impl Cli {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut fixture = None;
        let mut library = None;
        let mut command_name = None;
        let mut rest = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixture" => fixture = Some(PathBuf::from(next_value(&mut args, "--fixture")?)),
                "--library" => library = Some(PathBuf::from(next_value(&mut args, "--library")?)),
                "--help" | "-h" => usage(0),
                _ if command_name.is_none() => command_name = Some(arg),
                _ => rest.push(arg),
            }
        }

        let Some(command_name) = command_name else {
            usage(1);
        };
        let command = parse_command(&command_name, rest)?;
        Ok(Self {
            fixture,
            library,
            command,
        })
    }
}

fn parse_command(name: &str, args: Vec<String>) -> Result<Command> {
    let mut args = args.into_iter();
    let command = match name {
        "list" => Command::List,
        "extensions" => Command::Extensions,
        "show" => Command::Show {
            target: positional(&mut args, "show", "OID or SASL name")?,
        },
        "describe-attr" => {
            let raw = positional(&mut args, "describe-attr", "attribute OID")?;
            let attr = raw
                .parse()
                .with_context(|| format!("Invalid OID '{raw}'"))?;
            Command::DescribeAttr { attr }
        }
        "for-name" => {
            let mut name = None;
            let mut name_type = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--type" => {
                        let raw = next_value(&mut args, "--type")?;
                        name_type = Some(
                            raw.parse()
                                .with_context(|| format!("Invalid OID '{raw}'"))?,
                        );
                    }
                    _ if name.is_none() => name = Some(arg),
                    other => bail!("Unexpected argument to for-name: {other}"),
                }
            }
            let Some(name) = name else {
                bail!("for-name requires a NAME");
            };
            Command::ForName { name, name_type }
        }
        "by-attrs" => {
            let mut predicate = AttributePredicate::new();
            while let Some(arg) = args.next() {
                let flag = arg.as_str();
                let value = next_value(&mut args, flag)?;
                let attrs = parse_oid_list(&value)?;
                predicate = match flag {
                    "--desired" => predicate.desired(attrs),
                    "--except" => predicate.except(attrs),
                    "--critical" => predicate.critical(attrs),
                    other => bail!("Unknown by-attrs flag: {other}"),
                };
            }
            Command::ByAttrs(predicate)
        }
        other => bail!("Unknown command: {other}"),
    };
    if let Some(extra) = args.next() {
        bail!("Unexpected argument to {name}: {extra}");
    }
    Ok(command)
}

fn positional(
    args: &mut impl Iterator<Item = String>,
    command: &str,
    what: &str,
) -> Result<String> {
    args.next()
        .with_context(|| format!("{command} requires an {what}"))
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

fn usage(code: i32) -> ! {
    eprintln!(concat!(
        "Usage: gss-mechs [--fixture PATH] [--library PATH] <command> [args]\n",
        "\n",
        "Commands:\n",
        "  list                          Report every mechanism (JSON lines).\n",
        "  show <OID|SASL-NAME>          Report one mechanism.\n",
        "  for-name <NAME> [--type OID]  Mechanisms able to process NAME.\n",
        "  by-attrs [--desired LIST] [--except LIST] [--critical LIST]\n",
        "                                Mechanisms matching attribute OIDs.\n",
        "  extensions                    Extension availability.\n",
        "  describe-attr <OID>           Name and descriptions of an attribute.\n",
        "\n",
        "Environment:\n",
        "  GSS_MECHS_FIXTURE   Static provider description (JSON).\n",
        "  GSS_MECHS_LIBRARY   GSS-API shared library path.\n",
        "  GSS_MECHS_ENCODING  utf-8 (default), latin-1 or ascii.\n",
        "  RUST_LOG            Log filter (default warn).",
    ));
    std::process::exit(code);
}
