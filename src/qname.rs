// Building qualified names for the outbound event protocol. Element names and
// attribute names are resolved differently: an unprefixed attribute is never
// in a namespace, so attributes avoid the default prefix when another prefix
// is bound to the same namespace.

use std::borrow::Cow;

use crate::error::Error;
use crate::namespace::Namespaces;

/// Which prefix to prefer when building a qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPreference<'a> {
    /// Use this prefix if it is bound to the namespace. `None` is the
    /// default prefix.
    Prefix(Option<&'a str>),
    /// No particular prefix, but rather not the default one. Used for
    /// attributes.
    NonDefault,
}

/// Resolve a namespaced name into a qualified name, given the prefixes
/// visible at that point.
///
/// - Without a namespace the qualified name is just `local`.
/// - A preferred prefix bound to exactly `namespace` is used.
/// - Otherwise the first prefix bound to `namespace` in sorted order is used.
///   The default prefix sorts as the string `"None"`, so it comes after
///   `"A"` but before `"a"`. With [`PrefixPreference::NonDefault`] the
///   default prefix is only used if no other prefix is bound.
///
/// Fails with [`Error::UnresolvableNamespace`] if no prefix is bound to
/// `namespace`.
///
/// ```rust
/// use saxtree::{resolve_qname, Namespaces, PrefixPreference};
///
/// let mut namespaces = Namespaces::new();
/// namespaces.insert(None, "urn:a".to_string());
/// namespaces.insert(Some("p".to_string()), "urn:a".to_string());
///
/// let element = resolve_qname(Some("urn:a"), "e", &namespaces, PrefixPreference::Prefix(None))?;
/// assert_eq!(element, "e");
/// let attribute = resolve_qname(Some("urn:a"), "a", &namespaces, PrefixPreference::NonDefault)?;
/// assert_eq!(attribute, "p:a");
/// # Ok::<(), saxtree::Error>(())
/// ```
pub fn resolve_qname<'a>(
    namespace: Option<&str>,
    local: &'a str,
    namespaces: &Namespaces,
    preference: PrefixPreference,
) -> Result<Cow<'a, str>, Error> {
    let Some(namespace) = namespace else {
        return Ok(Cow::Borrowed(local));
    };
    let preferred = match preference {
        PrefixPreference::Prefix(preferred) => namespaces
            .iter()
            .any(|(prefix, uri)| prefix.as_deref() == preferred && uri == namespace)
            .then_some(preferred),
        PrefixPreference::NonDefault => None,
    };
    let prefix = match preferred {
        Some(prefix) => prefix,
        None => scan_prefixes(namespace, namespaces, preference)
            .ok_or_else(|| Error::UnresolvableNamespace(namespace.to_string()))?,
    };
    Ok(match prefix {
        Some(prefix) => Cow::Owned(format!("{}:{}", prefix, local)),
        None => Cow::Borrowed(local),
    })
}

// the outer option is whether anything is bound, the inner option is the
// prefix itself
fn scan_prefixes<'n>(
    namespace: &str,
    namespaces: &'n Namespaces,
    preference: PrefixPreference,
) -> Option<Option<&'n str>> {
    let mut found = None;
    for (prefix, uri) in sorted_prefixes(namespaces) {
        if uri != namespace {
            continue;
        }
        found = Some(prefix);
        if prefix.is_none() && preference == PrefixPreference::NonDefault {
            continue;
        }
        break;
    }
    found
}

const DEFAULT_PREFIX_SORT_KEY: &str = "None";

/// The bindings in the order prefixes are considered when picking one for a
/// namespace: by prefix, with the default prefix sorting as `"None"`.
pub(crate) fn sorted_prefixes(namespaces: &Namespaces) -> Vec<(Option<&str>, &str)> {
    let mut entries = namespaces
        .iter()
        .map(|(prefix, uri)| (prefix.as_deref(), uri.as_str()))
        .collect::<Vec<_>>();
    entries.sort_by_key(|(prefix, _)| prefix.unwrap_or(DEFAULT_PREFIX_SORT_KEY));
    entries
}
