//! Per-source mirror-set merging (component C3).
//!
//! Groups mirror preference entries by source, feeds each source's mirror
//! sequences into a [`TopoGraph`], drops sources whose mirrors are only the
//! source itself, and returns one [`MergedMirrorSet`] per surviving source,
//! sorted lexicographically by source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::topo::TopoGraph;

/// Whether pulls for a source may fall back to contacting the source
/// registry directly, or must stay confined to its mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MirrorSourcePolicy {
    /// The default: the source registry may still be contacted.
    #[default]
    AllowContactingSource,
    /// The source registry must never be contacted; equivalent to marking
    /// the resulting registry record `Blocked`.
    NeverContactSource,
}

/// The pull-mode tag a merged mirror set (and each of its mirrors) carries
/// into the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    /// Produced from IDMS or plain ICSP entries: mirrors are usable only
    /// when pulling by digest.
    DigestOnly,
    /// Produced from ITMS entries: mirrors are usable only when pulling by
    /// tag.
    TagOnly,
    /// A legacy ICSP entry set `allowMirrorByTags`, relaxing the
    /// digest-only constraint; mirrors are unrestricted.
    Unrestricted,
}

/// Which CRD collection a batch of [`MirrorPolicyEntry`] values came from.
///
/// This gates the legacy `allowMirrorByTags` promotion (spec.md §9): the
/// flag only has effect on ICSP entries. IDMS is implicitly digest-only and
/// ITMS is implicitly tag-only per mirror, regardless of the flag's value —
/// new CRDs don't carry this field at all, but since [`MirrorPolicyEntry`]
/// is a shared shape, [`merge_mirror_sets`] must ignore it outside the ICSP
/// pipeline rather than trust the caller not to set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `ImageContentSourcePolicy`: the only origin where
    /// `allow_mirror_by_tags` can promote a source to [`PullMode::Unrestricted`].
    Icsp,
    /// `ImageDigestMirrorSet`: always [`PullMode::DigestOnly`].
    Idms,
    /// `ImageTagMirrorSet`: always [`PullMode::TagOnly`].
    Itms,
}

impl Origin {
    /// The pull mode this origin's entries carry absent any promotion.
    fn default_pull_mode(self) -> PullMode {
        match self {
            Origin::Icsp | Origin::Idms => PullMode::DigestOnly,
            Origin::Itms => PullMode::TagOnly,
        }
    }
}

/// One `(source, mirrors, mirrorSourcePolicy)` entry contributed by a
/// single CRD object, in declaration order. `allow_mirror_by_tags` is the
/// legacy ICSP-only promotion flag (see `SPEC_FULL.md` §8).
#[derive(Debug, Clone)]
pub struct MirrorPolicyEntry {
    /// The source scope this entry constrains.
    pub source: String,
    /// The ordered mirror names this entry prefers for `source`.
    pub mirrors: Vec<String>,
    /// This entry's contribution to the source's merged policy.
    pub mirror_source_policy: MirrorSourcePolicy,
    /// Legacy ICSP `allowMirrorByTags` promotion. Ignored by
    /// [`merge_mirror_sets`] unless the batch's [`Origin`] is
    /// [`Origin::Icsp`] — IDMS/ITMS entries never carry this field in
    /// practice, but since the shape is shared, a stray `true` here from an
    /// IDMS/ITMS caller has no effect rather than silently relaxing the
    /// pull mode.
    pub allow_mirror_by_tags: bool,
}

/// One source after merging all entries that named it, within a single
/// origin bucket (ICSP, IDMS, or ITMS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedMirrorSet {
    /// The scope this mirror set applies to.
    pub source: String,
    /// The merged, deduplicated, topologically-ordered mirror list.
    pub mirrors: Vec<String>,
    /// `NeverContactSource` if any contributing entry requested it.
    pub mirror_source_policy: MirrorSourcePolicy,
    /// The pull-mode tag every mirror in this set carries.
    pub pull_mode: PullMode,
}

#[derive(Default)]
struct SourceAccumulator {
    graph: TopoGraph,
    saw_real_mirror: bool,
    mirror_source_policy: MirrorSourcePolicy,
    allow_mirror_by_tags: bool,
}

/// Does this entry's mirror list name a mirror distinct from its own
/// source? Self-only entries do not count as evidence the source has a
/// real mirror (`mirrorsContainsARealMirror` in `spec.md` §4.3).
fn contains_a_real_mirror(entry: &MirrorPolicyEntry) -> bool {
    entry.mirrors.iter().any(|m| m != &entry.source)
}

/// Merges a list of same-origin mirror policy entries into one
/// [`MergedMirrorSet`] per surviving source, tagging every mirror with
/// `origin`'s pull mode unless the source was promoted to `Unrestricted` via
/// the legacy `allowMirrorByTags` flag — and that promotion only ever
/// applies when `origin == Origin::Icsp` (spec.md §9).
pub fn merge_mirror_sets(entries: &[MirrorPolicyEntry], origin: Origin) -> Vec<MergedMirrorSet> {
    let mut by_source: BTreeMap<&str, SourceAccumulator> = BTreeMap::new();

    for entry in entries {
        let acc = by_source.entry(entry.source.as_str()).or_default();
        if contains_a_real_mirror(entry) {
            acc.saw_real_mirror = true;
        }
        acc.graph.add_sequence(&entry.mirrors);
        if entry.mirror_source_policy == MirrorSourcePolicy::NeverContactSource {
            acc.mirror_source_policy = MirrorSourcePolicy::NeverContactSource;
        }
        if origin == Origin::Icsp && entry.allow_mirror_by_tags {
            acc.allow_mirror_by_tags = true;
        }
    }

    by_source
        .into_iter()
        .filter(|(source, acc)| {
            if !acc.saw_real_mirror {
                tracing::debug!(%source, "eliding self-mirroring-only source");
            }
            acc.saw_real_mirror
        })
        .map(|(source, acc)| {
            let pull_mode = if acc.allow_mirror_by_tags {
                PullMode::Unrestricted
            } else {
                origin.default_pull_mode()
            };
            MergedMirrorSet {
                source: source.to_string(),
                mirrors: acc.graph.result(),
                mirror_source_policy: acc.mirror_source_policy,
                pull_mode,
            }
        })
        .collect()
}
