#![forbid(unsafe_code)]

//! Build XML element trees from SAX-style events, and generate SAX-style
//! events from element trees.
//!
//! [`TreeBuilder`] is a [`ContentHandler`] that builds a [`Tree`].
//! [`Tree::saxify`] drives any [`ContentHandler`], working out which
//! namespace prefixes come into scope at each element and which qualified
//! names to use.
//!
//! ```rust
//! use saxtree::{ContentHandler, Name, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_document()?;
//! builder.processing_instruction("before", None)?;
//! builder.start_prefix_mapping(Some("p"), "urn:a")?;
//! builder.start_element(&Name::ns("urn:a", "doc"), "p:doc", &[])?;
//! builder.characters("Hello")?;
//! builder.end_element(&Name::ns("urn:a", "doc"), "p:doc")?;
//! builder.end_prefix_mapping(Some("p"))?;
//! builder.end_document()?;
//! let tree = builder.into_tree();
//!
//! let events = tree
//!     .events()
//!     .map(|event| event.map(|event| event.to_string()))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(
//!     events,
//!     vec![
//!         "start-document",
//!         "processing-instruction before",
//!         "start-prefix-mapping p urn:a",
//!         "start-element {urn:a}doc p:doc",
//!         "characters \"Hello\"",
//!         "end-element {urn:a}doc p:doc",
//!         "end-prefix-mapping p",
//!         "end-document",
//!     ]
//! );
//! # Ok::<(), saxtree::Error>(())
//! ```

mod access;
mod builder;
mod creation;
pub mod emit;
mod error;
pub mod fixed;
mod handler;
mod manipulation;
mod name;
mod namespace;
mod qname;
mod tree;
mod xmlvalue;

#[cfg(feature = "proptest")]
pub mod proptest;
#[cfg(all(test, not(feature = "proptest")))]
mod proptest;

pub use access::NodeEdge;
pub use builder::TreeBuilder;
pub use error::Error;
pub use handler::{replay, ContentHandler, Event, EventWriter};
pub use name::{Attribute, Name};
pub use namespace::{NamespaceScopes, Namespaces};
pub use qname::{resolve_qname, PrefixPreference};
pub use tree::{Node, Tree};
pub use xmlvalue::{Attributes, Comment, Element, ProcessingInstruction, Value, ValueType};
