//! Upstream CRD shapes: ImageContentSourcePolicy, ImageDigestMirrorSet and
//! ImageTagMirrorSet. CRD deserialization from a live cluster API is out of
//! scope for this crate (`spec.md` §1) — callers hand us already-parsed
//! values — but the shapes themselves are part of the external interface
//! (`spec.md` §6), so they carry real `serde` derives the way any CRD type
//! vendored from `k8s-openapi`-adjacent crates would.

use serde::{Deserialize, Serialize};

use crate::merge::MirrorSourcePolicy;

/// The subset of Kubernetes object metadata this crate cares about: just
/// enough to distinguish one CRD object from another in logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// The object's name.
    #[serde(default)]
    pub name: String,
}

/// One `source -> mirrors` mapping, the shape shared by ICSP's
/// `repositoryDigestMirrors`, IDMS's `imageDigestMirrors`, and ITMS's
/// `imageTagMirrors` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorMapping {
    /// The scope these mirrors apply to.
    pub source: String,
    /// Mirror names to try, in preference order.
    #[serde(default)]
    pub mirrors: Vec<String>,
    /// Whether the source may still be contacted directly. Absent on
    /// legacy ICSP entries, where it is always `AllowContactingSource`.
    #[serde(default)]
    pub mirror_source_policy: MirrorSourcePolicy,
    /// Legacy ICSP-only flag: promotes this source's pull mode from
    /// digest-only to unrestricted. Always `false` for IDMS/ITMS, which
    /// express digest-only/tag-only through which CRD kind they are.
    #[serde(default)]
    pub allow_mirror_by_tags: bool,
}

/// The `spec` field of an [`Icsp`] object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcspSpec {
    /// The `source -> mirrors` mappings this policy contributes.
    #[serde(default)]
    pub repository_digest_mirrors: Vec<MirrorMapping>,
}

/// `ImageContentSourcePolicy`: the legacy CRD listing digest-only mirror
/// preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icsp {
    /// Object identity, kept only for diagnostics.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The mirror mappings this object declares.
    pub spec: IcspSpec,
}

/// The `spec` field of an [`Idms`] object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdmsSpec {
    /// The `source -> mirrors` mappings this policy contributes.
    #[serde(default)]
    pub image_digest_mirrors: Vec<MirrorMapping>,
}

/// `ImageDigestMirrorSet`: ICSP's successor, with `mirrorSourcePolicy`
/// support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idms {
    /// Object identity, kept only for diagnostics.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The mirror mappings this object declares.
    pub spec: IdmsSpec,
}

/// The `spec` field of an [`Itms`] object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItmsSpec {
    /// The `source -> mirrors` mappings this policy contributes.
    #[serde(default)]
    pub image_tag_mirrors: Vec<MirrorMapping>,
}

/// `ImageTagMirrorSet`: IDMS's sibling, carrying tag-lookup mirror
/// preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itms {
    /// Object identity, kept only for diagnostics.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The mirror mappings this object declares.
    pub spec: ItmsSpec,
}
