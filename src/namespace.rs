use ahash::HashMap;
use std::collections::BTreeMap;

/// A map of prefix to namespace URI.
///
/// The `None` key is the default (unprefixed) namespace. The map iterates in
/// sorted prefix order with the default namespace first; qualified name
/// resolution and prefix mapping events rely on this order.
pub type Namespaces = BTreeMap<Option<String>, String>;

/// Namespace prefix bindings as they nest while events arrive.
///
/// Each prefix has its own stack of URIs. Binding pushes, unbinding pops,
/// and the top of a stack is the URI currently bound to that prefix.
///
/// Pairing of bind and unbind is the caller's responsibility; unbinding a
/// prefix that isn't bound is ignored.
#[derive(Debug, Default, Clone)]
pub struct NamespaceScopes {
    scopes: HashMap<Option<String>, Vec<String>>,
    default: Option<String>,
}

impl NamespaceScopes {
    /// Create an empty set of scopes. Nothing is bound, there is no default
    /// namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `uri` to a prefix, shadowing any earlier binding.
    ///
    /// ```rust
    /// let mut scopes = saxtree::NamespaceScopes::new();
    /// scopes.bind(Some("p"), "urn:a");
    /// scopes.bind(Some("p"), "urn:b");
    /// assert_eq!(scopes.current(Some("p")), Some("urn:b"));
    /// scopes.unbind(Some("p"));
    /// assert_eq!(scopes.current(Some("p")), Some("urn:a"));
    /// ```
    pub fn bind(&mut self, prefix: Option<&str>, uri: &str) {
        let key = prefix.map(str::to_string);
        self.scopes.entry(key).or_default().push(uri.to_string());
        if prefix.is_none() {
            self.default = Some(uri.to_string());
        }
    }

    /// Remove the innermost binding of a prefix, restoring the binding it
    /// shadowed (if any).
    pub fn unbind(&mut self, prefix: Option<&str>) {
        let key = prefix.map(str::to_string);
        let Some(stack) = self.scopes.get_mut(&key) else {
            log::warn!("unbinding unbound prefix {:?}", prefix);
            return;
        };
        stack.pop();
        let top = stack.last().cloned();
        if stack.is_empty() {
            self.scopes.remove(&key);
        }
        if prefix.is_none() {
            self.default = top;
        }
    }

    /// The URI currently bound to a prefix.
    pub fn current(&self, prefix: Option<&str>) -> Option<&str> {
        let key = prefix.map(str::to_string);
        self.scopes
            .get(&key)
            .and_then(|stack| stack.last())
            .map(String::as_str)
    }

    /// The current default namespace.
    ///
    /// Binding the default prefix to the empty URI undeclares the default
    /// namespace, so that gives `None`.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default.as_deref().filter(|uri| !uri.is_empty())
    }

    /// All prefixes that are bound right now, with their current URI.
    pub fn in_scope(&self) -> Namespaces {
        self.scopes
            .iter()
            .filter_map(|(prefix, stack)| Some((prefix.clone(), stack.last()?.clone())))
            .collect()
    }

    /// True if no prefix is bound.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
