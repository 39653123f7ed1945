use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A namespaced XML name: an optional namespace URI plus a local name.
///
/// The empty namespace URI is treated as "no namespace", so
/// `Name::ns("", "a")` and `Name::new("a")` are the same name.
///
/// Names sort by namespace first (no namespace first), then by local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name {
    namespace: Option<String>,
    local: String,
}

impl Name {
    /// A name that is not in any namespace.
    ///
    /// ```rust
    /// let name = saxtree::Name::new("doc");
    /// assert_eq!(name.namespace(), None);
    /// assert_eq!(name.local(), "doc");
    /// ```
    pub fn new<S: Into<String>>(local: S) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// A name in a namespace.
    ///
    /// ```rust
    /// let name = saxtree::Name::ns("http://example.com", "doc");
    /// assert_eq!(name.namespace(), Some("http://example.com"));
    /// assert_eq!(name.to_string(), "{http://example.com}doc");
    /// ```
    pub fn ns<N: Into<String>, S: Into<String>>(namespace: N, local: S) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: (!namespace.is_empty()).then_some(namespace),
            local: local.into(),
        }
    }

    /// A name from an optional namespace.
    pub fn with_namespace<S: Into<String>>(namespace: Option<&str>, local: S) -> Self {
        match namespace {
            Some(namespace) => Self::ns(namespace, local),
            None => Self::new(local),
        }
    }

    /// Parse a name in Clark notation: `{uri}local` or just `local`.
    ///
    /// ```rust
    /// use saxtree::Name;
    ///
    /// assert_eq!(Name::from_clark("{urn:a}b"), Name::ns("urn:a", "b"));
    /// assert_eq!(Name::from_clark("b"), Name::new("b"));
    /// ```
    pub fn from_clark(s: &str) -> Self {
        if let Some(rest) = s.strip_prefix('{') {
            if let Some((namespace, local)) = rest.split_once('}') {
                return Self::ns(namespace, local);
            }
        }
        Self::new(s)
    }

    /// The namespace URI, if this name is in a namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local name.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The same local name, moved into `namespace`.
    pub(crate) fn in_namespace(&self, namespace: Option<&str>) -> Self {
        Self::with_namespace(namespace, self.local.as_str())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::from_clark(s)
    }
}

/// An attribute as it travels through the event protocol.
///
/// Inbound, the qualified name is informational; the builder only looks at
/// `name`. Outbound, the emitter fills in the resolved qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// The namespaced attribute name.
    pub name: Name,
    /// The qualified name, i.e. `a` or `p:a`.
    pub qname: String,
    /// The attribute value.
    pub value: String,
}

impl Attribute {
    /// Create an attribute with an explicit qualified name.
    pub fn new<Q: Into<String>, V: Into<String>>(name: Name, qname: Q, value: V) -> Self {
        Self {
            name,
            qname: qname.into(),
            value: value.into(),
        }
    }

    /// Create an attribute that is not in a namespace. Its qualified name is
    /// its local name.
    pub fn local<S: Into<String>, V: Into<String>>(local: S, value: V) -> Self {
        let local = local.into();
        Self {
            qname: local.clone(),
            name: Name::new(local),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_namespace_is_no_namespace() {
        assert_eq!(Name::ns("", "a"), Name::new("a"));
        assert_eq!(Name::with_namespace(Some(""), "a"), Name::new("a"));
    }

    #[test]
    fn test_clark_roundtrip() {
        let name = Name::ns("http://example.com/x", "foo");
        assert_eq!(Name::from_clark(&name.to_string()), name);
        let name = Name::new("foo");
        assert_eq!(Name::from_clark(&name.to_string()), name);
    }

    #[test]
    fn test_unterminated_clark_is_local() {
        assert_eq!(Name::from_clark("{oops").local(), "{oops");
    }

    #[test]
    fn test_order_no_namespace_first() {
        let mut names = vec![Name::ns("urn:a", "a"), Name::new("b"), Name::new("a")];
        names.sort();
        assert_eq!(
            names,
            vec![Name::new("a"), Name::new("b"), Name::ns("urn:a", "a")]
        );
    }
}
