//! The v2 `registries.conf` output shape (`spec.md` §6). Field names and
//! `rename_all` follow the schema consumed by `sysregistriesv2.GetRegistries`
//! verbatim; encoding this to an actual TOML file on disk is left to the
//! caller (this crate only produces the value).

use serde::{Deserialize, Serialize};

/// Per-mirror-endpoint restriction on which kind of pull may use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PullFromMirror {
    /// Unrestricted: usable for both digest and tag pulls.
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Usable only when pulling by digest.
    #[serde(rename = "digest-only")]
    DigestOnly,
    /// Usable only when pulling by tag.
    #[serde(rename = "tag-only")]
    TagOnly,
}

impl PullFromMirror {
    fn is_unset(&self) -> bool {
        matches!(self, PullFromMirror::Unset)
    }
}

/// One mirror endpoint for a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    /// The mirror's own location (host, optionally with port and path).
    pub location: String,
    /// Whether this specific mirror endpoint should be contacted over
    /// plain HTTP / with TLS verification skipped.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure: bool,
    /// Restricts this mirror to digest-only or tag-only pulls, if any.
    #[serde(
        rename = "pull-from-mirror",
        default,
        skip_serializing_if = "PullFromMirror::is_unset"
    )]
    pub pull_from_mirror: PullFromMirror,
}

/// The short-name resolution mode, carried through from the caller's
/// template. This crate never inspects or changes it; it only round-trips
/// the value the caller supplied in `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShortNameMode {
    /// No mode configured; `short-name-mode` serializes as `""`.
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Unqualified short names must resolve unambiguously or are rejected.
    #[serde(rename = "enforcing")]
    Enforcing,
    /// Ambiguous short names are tolerated, consulting the user at resolve
    /// time.
    #[serde(rename = "permissive")]
    Permissive,
    /// Unqualified short names are rejected outright.
    #[serde(rename = "disabled")]
    Disabled,
}

/// One `[[registry]]` entry in the v2 configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// A wildcard scope this record covers (mutually exclusive with
    /// `location`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// A concrete scope this record covers (mutually exclusive with
    /// `prefix`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Whether references under this scope should be pulled insecurely.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure: bool,
    /// Whether the source registry itself must never be contacted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blocked: bool,
    /// Ordered mirror endpoints for this scope.
    #[serde(rename = "mirror", default, skip_serializing_if = "Vec::is_empty")]
    pub mirrors: Vec<Mirror>,
}

impl Registry {
    /// Constructs a bare location-only record with no flags or mirrors.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    /// Constructs a bare wildcard-prefix-only record with no flags.
    ///
    /// Wildcard records never carry mirrors: they can only propagate
    /// `insecure`/`blocked` flags, never be carved into sub-scopes.
    pub fn for_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Default::default()
        }
    }
}

/// The top-level v2 registries configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2RegistriesConf {
    /// Registries consulted for unqualified (tag-only, no host) image
    /// references. Carried through from the caller's template unchanged.
    #[serde(
        rename = "unqualified-search-registries",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub unqualified_search_registries: Vec<String>,
    /// The short-name resolution mode. Carried through from the caller's
    /// template unchanged.
    #[serde(rename = "short-name-mode", default)]
    pub short_name_mode: ShortNameMode,
    /// The flat list of per-scope registry records this crate produces.
    #[serde(rename = "registry", default, skip_serializing_if = "Vec::is_empty")]
    pub registries: Vec<Registry>,
}
