//! Scope string parsing and the nesting predicate (component C1).
//!
//! A "scope" names a registry host, optionally with a port and/or a
//! namespace path (`example.com`, `example.com:443`, `example.com/ns1/ns2`),
//! or a wildcard host pattern (`*.example.com`). See the crate-level docs
//! for the exact grammar.

/// Returns `true` if `s` is a syntactically valid registries.conf scope:
/// a bare host, a host with port, a host with a namespace path, or a
/// `*.rest` wildcard host with at least two dot-separated labels in `rest`.
///
/// The empty string is never valid.
pub fn is_valid_registries_conf_scope(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if let Some(rest) = s.strip_prefix("*.") {
        return is_valid_wildcard_tail(rest);
    }
    if s.contains('*') {
        return false;
    }
    let (host_port, remainder) = split_host_and_remainder(s);
    is_valid_host_port(host_port) && is_valid_remainder(remainder)
}

fn is_valid_wildcard_tail(rest: &str) -> bool {
    if rest.is_empty() || rest.contains('/') || rest.contains(':') || rest.contains('*') {
        return false;
    }
    let labels: Vec<&str> = rest.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

fn is_valid_host_port(host_port: &str) -> bool {
    if host_port.is_empty() {
        return false;
    }
    match host_port.split_once(':') {
        None => true,
        Some((host, port)) => {
            !host.is_empty() && !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
        }
    }
}

fn is_valid_remainder(remainder: &str) -> bool {
    if remainder.is_empty() {
        return true;
    }
    remainder
        .strip_prefix('/')
        .is_some_and(|path| path.split('/').all(|segment| !segment.is_empty()))
}

/// Splits a concrete (non-wildcard) scope into its `host[:port]` part and
/// the remainder (either `""` or a string starting with `/`).
fn split_host_and_remainder(s: &str) -> (&str, &str) {
    match s.find('/') {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

/// Strips the `*.` wildcard marker a host may carry, returning the bare
/// tail. Non-wildcarded hosts are returned unchanged.
fn bare_wildcard_tail(host: &str) -> &str {
    host.strip_prefix("*.").unwrap_or(host)
}

/// Does a host (possibly itself wildcarded, e.g. `*.sub.example.com`) fall
/// within the wildcard pattern `*.w`?
fn host_matches_wildcard(host: &str, w: &str) -> bool {
    let bare = bare_wildcard_tail(host);
    bare == w || bare.ends_with(&format!(".{w}"))
}

/// Does `sub` fall within the registries-config scope `super_scope`? i.e.
/// is every reference whose scope is `sub` also covered by `super_scope`.
///
/// See `SPEC_FULL.md` §4.1 for the full contract.
pub fn scope_is_nested_inside_scope(sub: &str, super_scope: &str) -> bool {
    if let Some(w) = super_scope.strip_prefix("*.") {
        if w.contains('/') {
            return false;
        }
        let (sub_host, _) = split_host_and_remainder(sub);
        return host_matches_wildcard(sub_host, w);
    }

    let (super_host, super_remainder) = split_host_and_remainder(super_scope);
    let (sub_host, sub_remainder) = split_host_and_remainder(sub);
    if super_host != sub_host {
        return false;
    }
    if super_remainder.is_empty() {
        return true;
    }
    if super_remainder == sub_remainder {
        return true;
    }
    sub_remainder
        .strip_prefix(super_remainder)
        .is_some_and(|tail| tail.starts_with('/'))
}
