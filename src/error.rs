use std::fmt::{Display, Formatter};

use crate::name::Name;

/// Saxtree errors
#[derive(Debug)]
pub enum Error {
    /// A closing element event does not match the element that is open.
    ///
    /// `expected` is the element that was open, `found` the name the closing
    /// event resolved to. Both namespace and local name have to agree.
    UnexpectedElementClosed {
        /// The name of the open element.
        expected: Name,
        /// The name in the closing event.
        found: Name,
    },
    /// No prefix is bound to the namespace URI in the tree, so no qualified
    /// name can be constructed for it.
    UnresolvableNamespace(String),
    /// An operation that would break the tree structure, or an event that
    /// arrived when it cannot be placed in the tree.
    InvalidOperation(String),
    /// Tree arena error.
    Node(indextree::NodeError),
    /// IO error, for handlers that write their events somewhere.
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedElementClosed { expected, found } => {
                write!(f, "Unexpected element closed: {} (open: {})", found, expected)
            }
            Error::UnresolvableNamespace(namespace) => {
                write!(f, "No prefix bound for namespace: {}", namespace)
            }
            Error::InvalidOperation(message) => write!(f, "Invalid operation: {}", message),
            Error::Node(e) => write!(f, "Node error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Node(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<indextree::NodeError> for Error {
    #[inline]
    fn from(e: indextree::NodeError) -> Self {
        Error::Node(e)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
