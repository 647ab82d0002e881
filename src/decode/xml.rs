//! Minimal owned element tree for reply documents.
//!
//! Reply decoding is navigational: find a child by name, read its text,
//! walk its repeated children. A small owned tree keeps the decoders free
//! of streaming-parser state without pulling in a schema layer.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{GatewayError, Result};

/// An owned XML element: name, concatenated text, and child elements in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Element {
    /// Local element name, namespace prefix stripped.
    pub name: String,
    /// Concatenated character data directly inside this element.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Parses a document and returns its root element.
    pub fn parse(document: &str) -> Result<Element> {
        let mut reader = Reader::from_str(document);
        let config = reader.config_mut();
        config.trim_text_start = true;
        config.trim_text_end = true;

        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(Element {
                        name: local_name(start.name().as_ref()),
                        ..Default::default()
                    });
                }
                Event::Empty(start) => {
                    let element = Element {
                        name: local_name(start.name().as_ref()),
                        ..Default::default()
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::End(_) => {
                    let element = match stack.pop() {
                        Some(element) => element,
                        None => {
                            return Err(GatewayError::Decode(
                                "unbalanced closing tag in reply document".to_string(),
                            ))
                        }
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Eof => {
                    return Err(GatewayError::Decode(
                        "reply document has no root element".to_string(),
                    ))
                }
                _ => {}
            }
        }
    }

    /// Returns the first child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns every child with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the text of the first child with the given local name,
    /// when that child exists and has non-empty text.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|c| c.text.clone())
            .filter(|t| !t.is_empty())
    }
}

fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let root = Element::parse(
            "<reply><messages><resultCode>Ok</resultCode></messages>\
             <ids><numericString>10</numericString><numericString>20</numericString></ids>\
             </reply>",
        )
        .unwrap();

        assert_eq!(root.name, "reply");
        assert_eq!(
            root.child("messages").unwrap().child_text("resultCode"),
            Some("Ok".to_string())
        );
        let ids: Vec<_> = root
            .child("ids")
            .unwrap()
            .children_named("numericString")
            .map(|e| e.text.clone())
            .collect();
        assert_eq!(ids, ["10", "20"]);
    }

    #[test]
    fn test_namespace_prefixes_are_stripped() {
        let root =
            Element::parse("<ns:reply xmlns:ns=\"urn:x\"><ns:code>I00001</ns:code></ns:reply>")
                .unwrap();
        assert_eq!(root.name, "reply");
        assert_eq!(root.child_text("code"), Some("I00001".to_string()));
    }

    #[test]
    fn test_text_is_unescaped() {
        let root = Element::parse("<reply><text>a &amp; b</text></reply>").unwrap();
        assert_eq!(root.child_text("text"), Some("a & b".to_string()));
    }

    #[test]
    fn test_empty_element_yields_no_text() {
        let root = Element::parse("<reply><refId/></reply>").unwrap();
        assert!(root.child("refId").is_some());
        assert_eq!(root.child_text("refId"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let root = Element::parse("<reply>\n  <code>\n    I00001\n  </code>\n</reply>").unwrap();
        assert_eq!(root.child_text("code"), Some("I00001".to_string()));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Element::parse("").is_err());
        assert!(Element::parse("no markup at all").is_err());
    }
}
