//! Registries-config construction (component C4) and scope-suffix
//! propagation (component C5).
//!
//! [`project_registries_conf`] is the crate's main entry point: it walks
//! the merged ICSP/IDMS/ITMS mirror sets together with the `insecure`/
//! `blocked` scope lists and produces the flat `Registries` list of a
//! [`V2RegistriesConf`] value.

use std::collections::HashSet;

use crate::error::ProjectError;
use crate::merge::{
    merge_mirror_sets, MergedMirrorSet, MirrorPolicyEntry, MirrorSourcePolicy, Origin, PullMode,
};
use crate::scope::{is_valid_registries_conf_scope, scope_is_nested_inside_scope};
use crate::types::{Icsp, Idms, Itms, Mirror, MirrorMapping, PullFromMirror, Registry, V2RegistriesConf};

fn is_wildcard(scope: &str) -> bool {
    scope.starts_with("*.")
}

fn scope_in_list(scope: &str, scopes: &[String]) -> bool {
    scopes.iter().any(|t| scope_is_nested_inside_scope(scope, t))
}

fn to_entry(m: &MirrorMapping) -> MirrorPolicyEntry {
    MirrorPolicyEntry {
        source: m.source.clone(),
        mirrors: m.mirrors.clone(),
        mirror_source_policy: m.mirror_source_policy,
        allow_mirror_by_tags: m.allow_mirror_by_tags,
    }
}

fn pull_from_mirror_for(pull_mode: PullMode) -> PullFromMirror {
    match pull_mode {
        PullMode::DigestOnly => PullFromMirror::DigestOnly,
        PullMode::TagOnly => PullFromMirror::TagOnly,
        PullMode::Unrestricted => PullFromMirror::Unset,
    }
}

fn build_mirrors(merged: &MergedMirrorSet, insecure: &[String]) -> Vec<Mirror> {
    merged
        .mirrors
        .iter()
        .map(|location| Mirror {
            location: location.clone(),
            insecure: scope_in_list(location, insecure),
            pull_from_mirror: pull_from_mirror_for(merged.pull_mode),
        })
        .collect()
}

fn build_registry(merged: &MergedMirrorSet, insecure: &[String], blocked: &[String]) -> Registry {
    Registry {
        prefix: None,
        location: Some(merged.source.clone()),
        insecure: scope_in_list(&merged.source, insecure),
        blocked: scope_in_list(&merged.source, blocked)
            || merged.mirror_source_policy == MirrorSourcePolicy::NeverContactSource,
        mirrors: build_mirrors(merged, insecure),
    }
}

/// Returns a copy of `mirrors` with the relative suffix `child_scope -
/// parent_scope` appended to each mirror's `Location`.
///
/// Requires `scope_is_nested_inside_scope(child_scope, parent_scope)` and
/// that `parent_scope` is not a wildcard; violating either is a bug in the
/// caller and reported as [`ProjectError::ScopeMismatch`].
pub fn mirrors_adjusted_for_nested_scope(
    parent_scope: &str,
    child_scope: &str,
    mirrors: &[Mirror],
) -> Result<Vec<Mirror>, ProjectError> {
    if is_wildcard(parent_scope) || !scope_is_nested_inside_scope(child_scope, parent_scope) {
        return Err(ProjectError::ScopeMismatch {
            parent: parent_scope.to_string(),
            child: child_scope.to_string(),
        });
    }
    let suffix = &child_scope[parent_scope.len()..];
    Ok(mirrors
        .iter()
        .map(|m| Mirror {
            location: format!("{}{suffix}", m.location),
            ..m.clone()
        })
        .collect())
}

struct PendingStandalone {
    scope: String,
    insecure: bool,
    blocked: bool,
}

/// Finds the narrowest (most specific, i.e. longest `Location`) existing
/// record that `sc` is nested inside, if any.
fn find_carve_parent(records: &[Registry], sc: &str) -> Option<usize> {
    let mut best: Option<(usize, &str)> = None;
    for (idx, r) in records.iter().enumerate() {
        if let Some(loc) = r.location.as_deref() {
            if loc != sc && scope_is_nested_inside_scope(sc, loc) {
                let is_better = match best {
                    None => true,
                    Some((_, best_loc)) => loc.len() > best_loc.len(),
                };
                if is_better {
                    best = Some((idx, loc));
                }
            }
        }
    }
    best.map(|(idx, _)| idx)
}

/// Applies one `insecure`/`blocked` scope to the working record list: an
/// exact match updates flags in place, a nested match carves a new
/// sub-scope record after its parent, and anything else is queued as a
/// standalone candidate for the final ordering pass.
fn apply_scope(
    records: &mut Vec<Registry>,
    pending: &mut Vec<PendingStandalone>,
    sc: &str,
    insecure: &[String],
    blocked: &[String],
) -> Result<(), ProjectError> {
    if let Some(idx) = records.iter().position(|r| r.location.as_deref() == Some(sc)) {
        records[idx].insecure = scope_in_list(sc, insecure);
        records[idx].blocked = scope_in_list(sc, blocked) || records[idx].blocked;
        return Ok(());
    }
    if let Some(p) = pending.iter_mut().find(|p| p.scope == sc) {
        p.insecure = scope_in_list(sc, insecure);
        p.blocked = scope_in_list(sc, blocked);
        return Ok(());
    }
    if let Some(parent_idx) = find_carve_parent(records, sc) {
        let parent_loc = records[parent_idx]
            .location
            .clone()
            .expect("find_carve_parent only returns records with a Location");
        let mut mirrors =
            mirrors_adjusted_for_nested_scope(&parent_loc, sc, &records[parent_idx].mirrors)?;
        for m in &mut mirrors {
            m.insecure = scope_in_list(&m.location, insecure);
        }
        let record = Registry {
            prefix: None,
            location: Some(sc.to_string()),
            insecure: scope_in_list(sc, insecure),
            blocked: scope_in_list(sc, blocked),
            mirrors,
        };
        records.insert(parent_idx + 1, record);
        return Ok(());
    }
    pending.push(PendingStandalone {
        scope: sc.to_string(),
        insecure: scope_in_list(sc, insecure),
        blocked: scope_in_list(sc, blocked),
    });
    Ok(())
}

/// Appends the standalone (unmatched) `insecure`/`blocked` records at the
/// end, in the order: blocked non-wildcard, blocked wildcard, insecure
/// non-wildcard, insecure wildcard — each in the scopes' original
/// declaration order within its list.
fn append_standalone(
    records: &mut Vec<Registry>,
    pending: &[PendingStandalone],
    insecure: &[String],
    blocked: &[String],
) {
    let mut emitted: HashSet<&str> = HashSet::new();
    let groups: [(&[String], bool); 4] = [
        (blocked, false),
        (blocked, true),
        (insecure, false),
        (insecure, true),
    ];
    for (scopes, wildcard_pass) in groups {
        for sc in scopes {
            if is_wildcard(sc) != wildcard_pass || emitted.contains(sc.as_str()) {
                continue;
            }
            let Some(p) = pending.iter().find(|p| &p.scope == sc) else {
                continue;
            };
            emitted.insert(sc.as_str());
            let mut record = if wildcard_pass {
                Registry::for_prefix(sc.clone())
            } else {
                Registry::for_location(sc.clone())
            };
            record.insecure = p.insecure;
            record.blocked = p.blocked;
            records.push(record);
        }
    }
}

/// Projects the merged ICSP/IDMS/ITMS mirror sets, plus the `insecure`/
/// `blocked` scope lists, into `base`'s `Registries` field.
///
/// `base` supplies `UnqualifiedSearchRegistries`/`ShortNameMode`, which are
/// carried through unchanged. On error, `base` is conceptually left
/// untouched (the caller's original value is never consumed on the error
/// path since this function takes `base` by value and only returns it
/// embedded in `Ok`).
pub fn project_registries_conf(
    base: V2RegistriesConf,
    insecure: &[String],
    blocked: &[String],
    icsp: &[Icsp],
    idms: &[Idms],
    itms: &[Itms],
) -> Result<V2RegistriesConf, ProjectError> {
    for scope in insecure.iter().chain(blocked.iter()) {
        if !is_valid_registries_conf_scope(scope) {
            return Err(ProjectError::InvalidScope {
                scope: scope.clone(),
            });
        }
    }

    let icsp_entries: Vec<MirrorPolicyEntry> = icsp
        .iter()
        .flat_map(|o| o.spec.repository_digest_mirrors.iter().map(to_entry))
        .collect();
    let idms_entries: Vec<MirrorPolicyEntry> = idms
        .iter()
        .flat_map(|o| o.spec.image_digest_mirrors.iter().map(to_entry))
        .collect();
    let itms_entries: Vec<MirrorPolicyEntry> = itms
        .iter()
        .flat_map(|o| o.spec.image_tag_mirrors.iter().map(to_entry))
        .collect();

    let icsp_merged = merge_mirror_sets(&icsp_entries, Origin::Icsp);
    let idms_merged = merge_mirror_sets(&idms_entries, Origin::Idms);
    let itms_merged = merge_mirror_sets(&itms_entries, Origin::Itms);

    tracing::debug!(
        icsp_sources = icsp_merged.len(),
        idms_sources = idms_merged.len(),
        itms_sources = itms_merged.len(),
        "merged mirror sets"
    );

    let idms_sources: HashSet<&str> = idms_merged.iter().map(|m| m.source.as_str()).collect();
    let itms_sources: HashSet<&str> = itms_merged.iter().map(|m| m.source.as_str()).collect();

    let mut records: Vec<Registry> = Vec::new();

    // Group 1: ICSP-sourced records, alphabetical (already sorted by C3).
    for m in &icsp_merged {
        records.push(build_registry(m, insecure, blocked));
    }

    // Group 2: IDMS-sourced records with no same-source ITMS counterpart.
    for m in &idms_merged {
        if !itms_sources.contains(m.source.as_str()) {
            records.push(build_registry(m, insecure, blocked));
        }
    }

    // Group 3: ITMS-only records, plus IDMS+ITMS dual-origin ("unified")
    // records — a source present in both merges into a single record with
    // digest mirrors first, then tag mirrors. Sorted alphabetically by
    // source as a combined group (spec.md §9: "a source appearing in IDMS
    // and ITMS is merged into one output record").
    let mut group3: Vec<(&str, Registry)> = Vec::new();
    for m in &idms_merged {
        if let Some(t) = itms_merged.iter().find(|t| t.source == m.source) {
            let mut mirrors = build_mirrors(m, insecure);
            mirrors.extend(build_mirrors(t, insecure));
            let rec = Registry {
                prefix: None,
                location: Some(m.source.clone()),
                insecure: scope_in_list(&m.source, insecure),
                blocked: scope_in_list(&m.source, blocked)
                    || m.mirror_source_policy == MirrorSourcePolicy::NeverContactSource
                    || t.mirror_source_policy == MirrorSourcePolicy::NeverContactSource,
                mirrors,
            };
            group3.push((m.source.as_str(), rec));
        }
    }
    for m in &itms_merged {
        if !idms_sources.contains(m.source.as_str()) {
            group3.push((m.source.as_str(), build_registry(m, insecure, blocked)));
        }
    }
    group3.sort_by(|a, b| a.0.cmp(b.0));
    records.extend(group3.into_iter().map(|(_, r)| r));

    // Step 4: carve/flag-update sub-scopes named by insecure/blocked.
    // `apply_scope` always inserts a new carve immediately after its
    // parent, so whichever list is walked *second* ends up adjacent to
    // the parent in the final order. Walking blocked first, then
    // insecure, puts the insecure carve first (spec.md S5).
    let mut pending: Vec<PendingStandalone> = Vec::new();
    for sc in blocked {
        apply_scope(&mut records, &mut pending, sc, insecure, blocked)?;
    }
    for sc in insecure {
        apply_scope(&mut records, &mut pending, sc, insecure, blocked)?;
    }

    // Step 5: standalone records for scopes that never matched anything.
    append_standalone(&mut records, &pending, insecure, blocked);

    Ok(V2RegistriesConf {
        registries: records,
        ..base
    })
}
