//! # registries-conf-merge
//!
//! Computes a container-runtime v2 `registries.conf` configuration (the
//! schema consumed by cri-o, podman and buildah) from three upstream
//! Kubernetes custom-resource collections —
//! [`ImageContentSourcePolicy`](types::Icsp),
//! [`ImageDigestMirrorSet`](types::Idms) and
//! [`ImageTagMirrorSet`](types::Itms) — plus two scalar lists of scope
//! strings, `insecure` and `blocked`.
//!
//! The crate is a pure function from inputs to a [`types::V2RegistriesConf`]
//! value: it does not fetch images, validate registry reachability, parse
//! CRDs off a live cluster, write TOML to disk, or retain state across
//! calls. See `SPEC_FULL.md` for the full design.
//!
//! # Module Index
//!
//! - [`scope`] — scope string validation and the nesting predicate (C1)
//! - [`topo`] — per-source mirror-preference topological merge (C2)
//! - [`merge`] — mirror-set merging across a CRD collection (C3)
//! - [`project`] — registries-config construction and scope-suffix
//!   propagation (C4, C5) — the crate's main entry point
//! - [`types`] — input (CRD) and output (v2 config) data model
//! - [`error`] — the crate's error type
//!
//! # Example
//!
//! ```
//! use registries_conf_merge::{project_registries_conf, types::*};
//!
//! let idms = Idms {
//!     metadata: ObjectMeta::default(),
//!     spec: IdmsSpec {
//!         image_digest_mirrors: vec![MirrorMapping {
//!             source: "registry.example.com".to_string(),
//!             mirrors: vec!["mirror.example.com".to_string()],
//!             ..Default::default()
//!         }],
//!     },
//! };
//! let conf = project_registries_conf(
//!     V2RegistriesConf::default(),
//!     &[],
//!     &[],
//!     &[],
//!     &[idms],
//!     &[],
//! )
//! .expect("valid scopes");
//! assert_eq!(conf.registries.len(), 1);
//! ```

pub mod error;
pub mod merge;
pub mod project;
pub mod scope;
pub mod topo;
pub mod types;

pub use error::ProjectError;
pub use merge::{
    merge_mirror_sets, MergedMirrorSet, MirrorPolicyEntry, MirrorSourcePolicy, Origin, PullMode,
};
pub use project::{mirrors_adjusted_for_nested_scope, project_registries_conf};
pub use scope::{is_valid_registries_conf_scope, scope_is_nested_inside_scope};
pub use topo::TopoGraph;
