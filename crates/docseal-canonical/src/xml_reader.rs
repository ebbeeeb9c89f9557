//! XML front-end over quick-xml
//!
//! Builds the abstract [`XmlDocument`] tree from text with a
//! namespace-aware streaming reader. Comments, processing instructions,
//! the XML declaration and DOCTYPE are ignored; CDATA sections are
//! coalesced with adjacent character data; `xmlns` declarations resolve
//! names but are not materialized as attributes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use docseal_core::{SealError, SealResult};

use crate::xml::{XmlAttribute, XmlDocument, XmlElement, XmlNode};

/// Parse an XML document from text
pub fn parse_xml(text: &str) -> SealResult<XmlDocument> {
    let mut reader = NsReader::from_str(text);
    let mut open_elements: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SealError::MalformedXml(e.to_string()))?;
        match event {
            Event::Start(start) => {
                let element = open_element(&reader, &start)?;
                open_elements.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                close_element(element, &mut open_elements, &mut root)?;
            }
            Event::End(_) => {
                let element = open_elements
                    .pop()
                    .ok_or_else(|| SealError::MalformedXml("unbalanced end tag".to_string()))?;
                close_element(element, &mut open_elements, &mut root)?;
            }
            Event::Text(text) => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| SealError::MalformedXml(e.to_string()))?;
                append_text(&mut open_elements, &unescaped);
            }
            Event::CData(cdata) => {
                let raw = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                append_text(&mut open_elements, &raw);
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !open_elements.is_empty() {
        return Err(SealError::MalformedXml("unclosed element".to_string()));
    }
    root.ok_or_else(|| SealError::MalformedXml("missing root element".to_string()))
        .map(|root| XmlDocument { root })
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart) -> SealResult<XmlElement> {
    let (resolution, local) = reader.resolve_element(start.name());
    let namespace = bound_namespace(resolution)?;
    let local_name = String::from_utf8_lossy(local.into_inner()).into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| SealError::MalformedXml(e.to_string()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolution, local) = reader.resolve_attribute(attribute.key);
        let value = attribute
            .unescape_value()
            .map_err(|e| SealError::MalformedXml(e.to_string()))?
            .into_owned();
        attributes.push(XmlAttribute {
            namespace: bound_namespace(resolution)?,
            local_name: String::from_utf8_lossy(local.into_inner()).into_owned(),
            value,
        });
    }

    Ok(XmlElement {
        namespace,
        local_name,
        attributes,
        children: Vec::new(),
    })
}

fn bound_namespace(resolution: ResolveResult) -> SealResult<Option<String>> {
    match resolution {
        ResolveResult::Bound(Namespace(uri)) => {
            Ok(Some(String::from_utf8_lossy(uri).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(SealError::MalformedXml(format!(
            "unknown namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn close_element(
    element: XmlElement,
    open_elements: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
) -> SealResult<()> {
    match open_elements.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_some() {
                return Err(SealError::MalformedXml("multiple root elements".to_string()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn append_text(open_elements: &mut Vec<XmlElement>, text: &str) {
    // Character data outside the root element is prologue/epilogue
    // whitespace and is dropped.
    if let Some(parent) = open_elements.last_mut() {
        if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
            existing.push_str(text);
        } else {
            parent.children.push(XmlNode::Text(text.to_string()));
        }
    }
}
