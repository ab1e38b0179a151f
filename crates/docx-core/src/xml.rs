//! Minimal mutable XML element tree for WordprocessingML parts
//!
//! `quick-xml` gives us a streaming reader and writer; substitution needs to
//! rewrite runs inside paragraphs, so the part is materialized into a small
//! owned tree and written back out after mutation.

use crate::{DocxError, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

/// An XML element with its qualified name, attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified name as written in the source (e.g. `w:p`)
    pub name: String,
    /// Attributes in source order, values unescaped
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value for the same key
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Iterate child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Mutable iteration over child elements
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.is(name))
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|el| el.is(name))
    }

    /// Concatenated text content of this element's direct text children
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                _ => {}
            }
        }
        out
    }
}

/// A parsed XML part: the root element plus whether a declaration was present
#[derive(Debug, Clone, PartialEq)]
pub struct XmlPart {
    pub root: XmlElement,
    has_declaration: bool,
}

impl XmlPart {
    /// Parse a part from raw bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut has_declaration = false;
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| DocxError::XmlError(e.to_string()))?;

            match event {
                Event::Decl(_) => has_declaration = true,
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let el = element_from_start(&e)?;
                    attach(&mut stack, &mut root, XmlNode::Element(el))?;
                }
                Event::End(_) => {
                    let el = stack.pop().ok_or_else(|| {
                        DocxError::XmlError("unbalanced closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, XmlNode::Element(el))?;
                }
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|e| DocxError::XmlError(e.to_string()))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(XmlNode::CData(text));
                    }
                }
                Event::Comment(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(XmlNode::Comment(text));
                    }
                }
                // Processing instructions and doctypes do not occur in WordprocessingML parts
                Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocxError::XmlError(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }

        let root = root.ok_or_else(|| DocxError::XmlError("part has no root element".to_string()))?;
        Ok(Self {
            root,
            has_declaration,
        })
    }

    /// Serialize the part back to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        if self.has_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
                .map_err(|e| DocxError::XmlError(e.to_string()))?;
        }
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocxError::XmlError(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DocxError::XmlError(e.to_string()))?
            .into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    node: XmlNode,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node {
        XmlNode::Element(el) if root.is_none() => {
            *root = Some(el);
            Ok(())
        }
        XmlNode::Element(el) => Err(DocxError::XmlError(format!(
            "second root element <{}>",
            el.name
        ))),
        _ => Ok(()),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in &el.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => write_event(writer, Event::Text(BytesText::new(text)))?,
            XmlNode::CData(text) => {
                write_event(writer, Event::CData(BytesCData::new(text.as_str())))?
            }
            XmlNode::Comment(text) => {
                write_event(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
        }
    }
    write_event(writer, Event::End(BytesEnd::new(el.name.as_str())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| DocxError::XmlError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_elements() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t xml:space="preserve"> a &amp; b </w:t></w:r></w:p></w:body></w:document>"#;

        let part = XmlPart::parse(xml).unwrap();
        assert_eq!(part.root.name, "w:document");
        assert_eq!(part.root.attribute("xmlns:w"), Some("urn:w"));

        let t = part
            .root
            .child("w:body")
            .and_then(|b| b.child("w:p"))
            .and_then(|p| p.child("w:r"))
            .and_then(|r| r.child("w:t"))
            .unwrap();
        assert_eq!(t.text(), " a & b ");
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_roundtrip_escapes_text() {
        let xml = br#"<root a="1 &lt; 2"><child>x &gt; y</child><empty/></root>"#;
        let part = XmlPart::parse(xml).unwrap();
        let bytes = part.to_bytes().unwrap();
        let reparsed = XmlPart::parse(&bytes).unwrap();
        assert_eq!(reparsed, part);
        assert_eq!(reparsed.root.attribute("a"), Some("1 < 2"));
    }

    #[test]
    fn test_unbalanced_xml_is_error() {
        assert!(XmlPart::parse(b"<a><b></a>").is_err());
        assert!(XmlPart::parse(b"<a><b>").is_err());
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut el = XmlElement::new("w:jc").with_attribute("w:val", "left");
        el.set_attribute("w:val", "center");
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attribute("w:val"), Some("center"));
    }
}
