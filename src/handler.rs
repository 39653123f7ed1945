use std::fmt::{Display, Formatter};
use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::name::{Attribute, Name};

/// Receiver of SAX-style XML events.
///
/// [`TreeBuilder`](crate::TreeBuilder) implements this to build a tree;
/// [`Tree::saxify`](crate::Tree::saxify) drives any implementation from an
/// existing tree.
///
/// Prefix `None` stands for the default (unprefixed) namespace.
///
/// Events arrive in document order and prefix mapping events are paired:
/// each `start_prefix_mapping` comes before the element start it applies to,
/// and its `end_prefix_mapping` comes after that element's end.
pub trait ContentHandler {
    /// The document starts.
    fn start_document(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// The document ends.
    fn end_document(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// A prefix binding enters scope.
    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), Error>;

    /// A prefix binding leaves scope.
    fn end_prefix_mapping(&mut self, prefix: Option<&str>) -> Result<(), Error>;

    /// An element starts.
    fn start_element(
        &mut self,
        name: &Name,
        qname: &str,
        attributes: &[Attribute],
    ) -> Result<(), Error>;

    /// An element ends.
    fn end_element(&mut self, name: &Name, qname: &str) -> Result<(), Error>;

    /// Character data.
    fn characters(&mut self, text: &str) -> Result<(), Error>;

    /// Whitespace that can be ignored. By default it's character data.
    fn ignorable_whitespace(&mut self, text: &str) -> Result<(), Error> {
        self.characters(text)
    }

    /// A processing instruction.
    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> Result<(), Error>;

    /// An element that isn't in a namespace starts, with attributes that
    /// aren't in a namespace either.
    fn start_element_local(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), Error> {
        let attributes = attributes
            .iter()
            .map(|(name, value)| Attribute::local(*name, *value))
            .collect::<Vec<_>>();
        self.start_element(&Name::new(name), name, &attributes)
    }

    /// An element that isn't in a namespace ends.
    fn end_element_local(&mut self, name: &str) -> Result<(), Error> {
        self.end_element(&Name::new(name), name)
    }
}

/// A recorded event.
///
/// A `Vec<Event>` is a [`ContentHandler`] that records everything it
/// receives; [`Event::dispatch`] sends an event on to another handler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    /// Document start
    StartDocument,
    /// Document end
    EndDocument,
    /// A prefix binding enters scope
    StartPrefixMapping {
        /// The prefix, `None` for the default namespace
        prefix: Option<String>,
        /// Namespace URI
        uri: String,
    },
    /// A prefix binding leaves scope
    EndPrefixMapping {
        /// The prefix, `None` for the default namespace
        prefix: Option<String>,
    },
    /// Element start
    StartElement {
        /// Namespaced name
        name: Name,
        /// Qualified name
        qname: String,
        /// Attributes
        attributes: Vec<Attribute>,
    },
    /// Element end
    EndElement {
        /// Namespaced name
        name: Name,
        /// Qualified name
        qname: String,
    },
    /// Character data
    Characters(String),
    /// Processing instruction
    ProcessingInstruction {
        /// Target
        target: String,
        /// Data, if any
        data: Option<String>,
    },
}

impl Event {
    /// Send this event to a handler.
    pub fn dispatch<H: ContentHandler + ?Sized>(&self, handler: &mut H) -> Result<(), Error> {
        match self {
            Event::StartDocument => handler.start_document(),
            Event::EndDocument => handler.end_document(),
            Event::StartPrefixMapping { prefix, uri } => {
                handler.start_prefix_mapping(prefix.as_deref(), uri)
            }
            Event::EndPrefixMapping { prefix } => handler.end_prefix_mapping(prefix.as_deref()),
            Event::StartElement {
                name,
                qname,
                attributes,
            } => handler.start_element(name, qname, attributes),
            Event::EndElement { name, qname } => handler.end_element(name, qname),
            Event::Characters(text) => handler.characters(text),
            Event::ProcessingInstruction { target, data } => {
                handler.processing_instruction(target, data.as_deref())
            }
        }
    }
}

/// Send a sequence of events to a handler, stopping at the first error.
pub fn replay<'a, H: ContentHandler + ?Sized>(
    events: impl IntoIterator<Item = &'a Event>,
    handler: &mut H,
) -> Result<(), Error> {
    for event in events {
        event.dispatch(handler)?;
    }
    Ok(())
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::StartDocument => write!(f, "start-document"),
            Event::EndDocument => write!(f, "end-document"),
            Event::StartPrefixMapping { prefix, uri } => {
                write!(f, "start-prefix-mapping {} {}", display_prefix(prefix), uri)
            }
            Event::EndPrefixMapping { prefix } => {
                write!(f, "end-prefix-mapping {}", display_prefix(prefix))
            }
            Event::StartElement {
                name,
                qname,
                attributes,
            } => {
                write!(f, "start-element {} {}", name, qname)?;
                for attribute in attributes {
                    write!(f, " {}={:?}", attribute.qname, attribute.value)?;
                }
                Ok(())
            }
            Event::EndElement { name, qname } => write!(f, "end-element {} {}", name, qname),
            Event::Characters(text) => write!(f, "characters {:?}", text),
            Event::ProcessingInstruction { target, data } => match data {
                Some(data) => write!(f, "processing-instruction {} {:?}", target, data),
                None => write!(f, "processing-instruction {}", target),
            },
        }
    }
}

fn display_prefix(prefix: &Option<String>) -> &str {
    prefix.as_deref().unwrap_or("#default")
}

impl ContentHandler for Vec<Event> {
    fn start_document(&mut self) -> Result<(), Error> {
        self.push(Event::StartDocument);
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), Error> {
        self.push(Event::EndDocument);
        Ok(())
    }

    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), Error> {
        self.push(Event::StartPrefixMapping {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        });
        Ok(())
    }

    fn end_prefix_mapping(&mut self, prefix: Option<&str>) -> Result<(), Error> {
        self.push(Event::EndPrefixMapping {
            prefix: prefix.map(str::to_string),
        });
        Ok(())
    }

    fn start_element(
        &mut self,
        name: &Name,
        qname: &str,
        attributes: &[Attribute],
    ) -> Result<(), Error> {
        self.push(Event::StartElement {
            name: name.clone(),
            qname: qname.to_string(),
            attributes: attributes.to_vec(),
        });
        Ok(())
    }

    fn end_element(&mut self, name: &Name, qname: &str) -> Result<(), Error> {
        self.push(Event::EndElement {
            name: name.clone(),
            qname: qname.to_string(),
        });
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        self.push(Event::Characters(text.to_string()));
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> Result<(), Error> {
        self.push(Event::ProcessingInstruction {
            target: target.to_string(),
            data: data.map(str::to_string),
        });
        Ok(())
    }
}

/// A [`ContentHandler`] that writes each event to `W` on a line of its own,
/// in the form [`Event`] displays.
///
/// Write failures come back as [`Error::Io`].
pub struct EventWriter<W: Write> {
    writer: W,
}

impl<W: Write> EventWriter<W> {
    /// Write events to `writer`.
    pub fn new(writer: W) -> Self {
        EventWriter { writer }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, event: Event) -> Result<(), Error> {
        writeln!(self.writer, "{}", event)?;
        Ok(())
    }
}

impl<W: Write> ContentHandler for EventWriter<W> {
    fn start_document(&mut self) -> Result<(), Error> {
        self.write(Event::StartDocument)
    }

    fn end_document(&mut self) -> Result<(), Error> {
        self.write(Event::EndDocument)?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), Error> {
        self.write(Event::StartPrefixMapping {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        })
    }

    fn end_prefix_mapping(&mut self, prefix: Option<&str>) -> Result<(), Error> {
        self.write(Event::EndPrefixMapping {
            prefix: prefix.map(str::to_string),
        })
    }

    fn start_element(
        &mut self,
        name: &Name,
        qname: &str,
        attributes: &[Attribute],
    ) -> Result<(), Error> {
        self.write(Event::StartElement {
            name: name.clone(),
            qname: qname.to_string(),
            attributes: attributes.to_vec(),
        })
    }

    fn end_element(&mut self, name: &Name, qname: &str) -> Result<(), Error> {
        self.write(Event::EndElement {
            name: name.clone(),
            qname: qname.to_string(),
        })
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        self.write(Event::Characters(text.to_string()))
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> Result<(), Error> {
        self.write(Event::ProcessingInstruction {
            target: target.to_string(),
            data: data.map(str::to_string),
        })
    }
}
