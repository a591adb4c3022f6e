//! End-to-end coverage of the seed scenarios from `SPEC_FULL.md` §9 (S1-S7),
//! exercised against the whole crate rather than individual module
//! internals — mirrors how the teacher's `tests-integration` crate checks
//! whole-binary behavior instead of unit internals.

use registries_conf_merge::project_registries_conf;
use registries_conf_merge::types::{
    Icsp, IcspSpec, Idms, IdmsSpec, Itms, ItmsSpec, MirrorMapping, ObjectMeta, PullFromMirror,
    ShortNameMode, V2RegistriesConf,
};
use registries_conf_merge::MirrorSourcePolicy;

fn mapping(source: &str, mirrors: &[&str]) -> MirrorMapping {
    MirrorMapping {
        source: source.to_string(),
        mirrors: mirrors.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn icsp(name: &str, mappings: Vec<MirrorMapping>) -> Icsp {
    Icsp {
        metadata: ObjectMeta {
            name: name.to_string(),
        },
        spec: IcspSpec {
            repository_digest_mirrors: mappings,
        },
    }
}

fn idms(name: &str, mappings: Vec<MirrorMapping>) -> Idms {
    Idms {
        metadata: ObjectMeta {
            name: name.to_string(),
        },
        spec: IdmsSpec {
            image_digest_mirrors: mappings,
        },
    }
}

fn itms(name: &str, mappings: Vec<MirrorMapping>) -> Itms {
    Itms {
        metadata: ObjectMeta {
            name: name.to_string(),
        },
        spec: ItmsSpec {
            image_tag_mirrors: mappings,
        },
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// S1 — empty inputs yield the template unchanged.
#[test]
fn s1_empty_inputs() {
    let base = V2RegistriesConf {
        unqualified_search_registries: strs(&["registry.access.redhat.com"]),
        short_name_mode: ShortNameMode::Enforcing,
        registries: vec![],
    };
    let out = project_registries_conf(base.clone(), &[], &[], &[], &[], &[]).unwrap();
    assert_eq!(out, base);
}

/// S2 — insecure + blocked scope lists with no mirror policies.
#[test]
fn s2_insecure_and_blocked_only() {
    let insecure = strs(&[
        "registry.access.redhat.com",
        "insecure.com",
        "common.com",
    ]);
    let blocked = strs(&["blocked.com", "common.com", "docker.io"]);
    let out =
        project_registries_conf(V2RegistriesConf::default(), &insecure, &blocked, &[], &[], &[])
            .unwrap();

    let locations: Vec<_> = out
        .registries
        .iter()
        .map(|r| r.location.clone().unwrap())
        .collect();
    assert_eq!(
        locations,
        vec![
            "blocked.com",
            "common.com",
            "docker.io",
            "registry.access.redhat.com",
            "insecure.com",
        ]
    );

    let by_location = |loc: &str| out.registries.iter().find(|r| r.location.as_deref() == Some(loc)).unwrap();
    assert!(by_location("blocked.com").blocked && !by_location("blocked.com").insecure);
    assert!(by_location("common.com").blocked && by_location("common.com").insecure);
    assert!(by_location("docker.io").blocked && !by_location("docker.io").insecure);
    assert!(!by_location("registry.access.redhat.com").blocked);
    assert!(by_location("registry.access.redhat.com").insecure);
    assert!(by_location("insecure.com").insecure && !by_location("insecure.com").blocked);
}

/// S3 — merger cycle: two IDMS objects for the same source with
/// overlapping mirror orderings must merge into one ordered list.
#[test]
fn s3_merger_cycle() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[
            idms("first", vec![mapping("s.example.net", &["z1", "y2"])]),
            idms("second", vec![mapping("s.example.net", &["y2", "x3"])]),
        ],
        &[],
    )
    .unwrap();
    assert_eq!(out.registries.len(), 1);
    let r = &out.registries[0];
    assert_eq!(r.location.as_deref(), Some("s.example.net"));
    let mirror_locations: Vec<_> = r.mirrors.iter().map(|m| m.location.as_str()).collect();
    assert_eq!(mirror_locations, vec!["z1", "y2", "x3"]);
}

/// S4 — self-only mirrors are elided entirely.
#[test]
fn s4_self_only_mirrors_elided() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[icsp(
            "self-mirroring",
            vec![mapping("self.example.com", &["self.example.com", "self.example.com"])],
        )],
        &[],
        &[],
    )
    .unwrap();
    assert!(out.registries.is_empty());
}

/// S5 — sub-scope carving propagates mirror suffixes.
#[test]
fn s5_sub_scope_carving() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &strs(&["primary.com/top/insecure"]),
        &strs(&["primary.com/top/blocked"]),
        &[],
        &[idms("rule", vec![mapping("primary.com/top", &["mirror.com/primary"])])],
        &[],
    )
    .unwrap();

    let locations: Vec<_> = out
        .registries
        .iter()
        .map(|r| r.location.clone().unwrap())
        .collect();
    assert_eq!(
        locations,
        vec![
            "primary.com/top",
            "primary.com/top/insecure",
            "primary.com/top/blocked",
        ]
    );

    let top = &out.registries[0];
    assert!(!top.insecure && !top.blocked);

    let insecure_rec = &out.registries[1];
    assert!(insecure_rec.insecure && !insecure_rec.blocked);
    assert_eq!(
        insecure_rec.mirrors.iter().map(|m| m.location.as_str()).collect::<Vec<_>>(),
        vec!["mirror.com/primary/insecure"]
    );

    let blocked_rec = &out.registries[2];
    assert!(blocked_rec.blocked && !blocked_rec.insecure);
    assert_eq!(
        blocked_rec.mirrors.iter().map(|m| m.location.as_str()).collect::<Vec<_>>(),
        vec!["mirror.com/primary/blocked"]
    );
}

/// S6 — ITMS + IDMS on the same source merge into one record, digest
/// mirrors first then tag mirrors, each carrying its own tag.
#[test]
fn s6_itms_and_idms_same_source() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[idms("d", vec![mapping("registry-a.com", &["d1"])])],
        &[itms("t", vec![mapping("registry-a.com", &["t1"])])],
    )
    .unwrap();
    assert_eq!(out.registries.len(), 1);
    let r = &out.registries[0];
    assert_eq!(r.location.as_deref(), Some("registry-a.com"));
    assert_eq!(r.mirrors.len(), 2);
    assert_eq!(r.mirrors[0].location, "d1");
    assert_eq!(r.mirrors[0].pull_from_mirror, PullFromMirror::DigestOnly);
    assert_eq!(r.mirrors[1].location, "t1");
    assert_eq!(r.mirrors[1].pull_from_mirror, PullFromMirror::TagOnly);
}

/// The legacy `allowMirrorByTags` promotion only applies to ICSP entries
/// (spec.md §9): an IDMS or ITMS entry that sets it keeps its implicit
/// digest-only/tag-only pull mode.
#[test]
fn allow_mirror_by_tags_is_icsp_only() {
    let mut idms_mapping = mapping("registry-a.com", &["d1"]);
    idms_mapping.allow_mirror_by_tags = true;
    let mut itms_mapping = mapping("registry-b.com", &["t1"]);
    itms_mapping.allow_mirror_by_tags = true;

    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[idms("d", vec![idms_mapping])],
        &[itms("t", vec![itms_mapping])],
    )
    .unwrap();

    let by_location = |loc: &str| {
        out.registries
            .iter()
            .find(|r| r.location.as_deref() == Some(loc))
            .unwrap()
    };
    assert_eq!(
        by_location("registry-a.com").mirrors[0].pull_from_mirror,
        PullFromMirror::DigestOnly
    );
    assert_eq!(
        by_location("registry-b.com").mirrors[0].pull_from_mirror,
        PullFromMirror::TagOnly
    );
}

/// S7 — `mirrorSourcePolicy: NeverContactSource` blocks the source
/// independently of the `blocked` scope list.
#[test]
fn s7_never_contact_source_policy() {
    let mut never_contact = mapping("registry-a.com", &["d1"]);
    never_contact.mirror_source_policy = MirrorSourcePolicy::NeverContactSource;
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[idms("d", vec![never_contact])],
        &[],
    )
    .unwrap();
    assert_eq!(out.registries.len(), 1);
    assert!(out.registries[0].blocked);
}

/// Property test: duplicating any input CRD object verbatim must not
/// change the output (spec.md §8 property 2).
#[test]
fn stability_under_duplicate_input() {
    let one = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[idms("d", vec![mapping("registry-a.com", &["d1", "d2"])])],
        &[],
    )
    .unwrap();
    let duplicated = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[],
        &[
            idms("d", vec![mapping("registry-a.com", &["d1", "d2"])]),
            idms("d", vec![mapping("registry-a.com", &["d1", "d2"])]),
        ],
        &[],
    )
    .unwrap();
    assert_eq!(one, duplicated);
}

/// ICSP and IDMS sharing a source from distinct CRD objects are emitted as
/// two separate records (spec.md §9 "Dual-origin sources").
#[test]
fn icsp_and_idms_same_source_emit_two_records() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &[],
        &[],
        &[icsp("legacy", vec![mapping("shared.example.com", &["legacy-mirror"])])],
        &[idms("new", vec![mapping("shared.example.com", &["new-mirror"])])],
        &[],
    )
    .unwrap();
    let shared: Vec<_> = out
        .registries
        .iter()
        .filter(|r| r.location.as_deref() == Some("shared.example.com"))
        .collect();
    assert_eq!(shared.len(), 2);
}

/// Wildcard scopes only ever propagate flags, never mirrors.
#[test]
fn wildcard_scope_has_no_mirrors() {
    let out = project_registries_conf(
        V2RegistriesConf::default(),
        &strs(&["*.example.com"]),
        &[],
        &[],
        &[],
        &[],
    )
    .unwrap();
    assert_eq!(out.registries.len(), 1);
    assert_eq!(out.registries[0].prefix.as_deref(), Some("*.example.com"));
    assert!(out.registries[0].location.is_none());
    assert!(out.registries[0].mirrors.is_empty());
    assert!(out.registries[0].insecure);
}
