//! Thin CLI demonstrating the library seam: reads ICSP/IDMS/ITMS objects
//! plus `insecure`/`blocked` scopes from a JSON file and prints the merged
//! v2 `registries.conf` as TOML. CLI wrapping is explicitly out of scope
//! for the library itself (`SPEC_FULL.md` §7); this binary exists only to
//! show how a real caller would drive it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use registries_conf_merge::project_registries_conf;
use registries_conf_merge::types::{Icsp, Idms, Itms, V2RegistriesConf};

#[derive(Debug, Parser)]
#[command(about = "Merge ICSP/IDMS/ITMS objects into a v2 registries.conf")]
struct Opt {
    /// Path to a JSON file with `icsp`, `idms`, `itms`, `insecure` and
    /// `blocked` fields.
    input: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct Input {
    #[serde(default)]
    icsp: Vec<Icsp>,
    #[serde(default)]
    idms: Vec<Idms>,
    #[serde(default)]
    itms: Vec<Itms>,
    #[serde(default)]
    insecure: Vec<String>,
    #[serde(default)]
    blocked: Vec<String>,
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = Opt::parse();
    let raw = std::fs::read_to_string(&opt.input)
        .with_context(|| format!("reading {:?}", opt.input))?;
    let input: Input =
        serde_json::from_str(&raw).with_context(|| format!("parsing {:?}", opt.input))?;

    let conf = project_registries_conf(
        V2RegistriesConf::default(),
        &input.insecure,
        &input.blocked,
        &input.icsp,
        &input.idms,
        &input.itms,
    )
    .map_err(|e| anyhow::anyhow!(e))
    .context("projecting registries.conf")?;

    print!("{}", toml::to_string_pretty(&conf)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
