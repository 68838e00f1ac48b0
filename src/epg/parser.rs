//! XMLTV parser
//! Builds the full mutable element tree from a decompressed guide.
//! Any XML error aborts the parse; there is no partial recovery.

use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::BufRead;

use super::document::{TvDocument, XmlNode};
use crate::error::{EpgError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An element still waiting for its end tag
struct OpenElement {
    node: XmlNode,
    text: String,
}

impl OpenElement {
    fn close(mut self) -> XmlNode {
        // Whitespace between child elements is layout; on a leaf it is content
        let keep = if self.node.children.is_empty() {
            !self.text.is_empty()
        } else {
            !self.text.trim().is_empty()
        };
        if keep {
            self.node.text = Some(self.text);
        }
        self.node
    }
}

/// EPG Parser for XMLTV format
pub struct EpgParser;

impl EpgParser {
    /// Parse a guide held in a string
    pub fn parse(xml: &str) -> Result<TvDocument> {
        Self::parse_bytes(xml.as_bytes())
    }

    /// Parse decompressed guide bytes
    pub fn parse_bytes(bytes: &[u8]) -> Result<TvDocument> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Self::parse_reader(bytes)
    }

    /// Parse from any buffered reader. The declared encoding is honoured
    /// and every name, attribute and text is decoded to UTF-8.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<TvDocument> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().check_end_names = true;

        let mut buf = Vec::with_capacity(8192);
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let position = xml_reader.buffer_position();
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let node = start_node(e, xml_reader.decoder())?;
                    stack.push(OpenElement { node, text: String::new() });
                }
                Ok(Event::Empty(ref e)) => {
                    let node = start_node(e, xml_reader.decoder())?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    // quick-xml has already matched the end name
                    let open = stack
                        .pop()
                        .ok_or_else(|| EpgError::malformed(format!("unexpected end tag at byte {}", position)))?;
                    attach(&mut stack, &mut root, open.close())?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e.decode().map_err(EpgError::malformed)?;
                    push_text(&mut stack, &text, position)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = e.decode().map_err(EpgError::malformed)?;
                    push_text(&mut stack, &text, position)?;
                }
                Ok(Event::GeneralRef(ref e)) => {
                    let resolved = resolve_reference(e)?;
                    push_text(&mut stack, &resolved, position)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(EpgError::malformed(format!(
                        "XML error at byte {}: {}",
                        position, e
                    )));
                }
                // Declaration, comments, processing instructions and DOCTYPE are not kept
                Ok(_) => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(EpgError::malformed(format!(
                "unexpected end of document inside <{}>",
                open.node.name
            )));
        }

        root.map(TvDocument::new)
            .ok_or_else(|| EpgError::malformed("document has no root element"))
    }
}

fn start_node(e: &BytesStart, decoder: Decoder) -> Result<XmlNode> {
    let name = decoder
        .decode(e.name().as_ref())
        .map_err(EpgError::malformed)?
        .into_owned();

    let mut node = XmlNode::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(EpgError::malformed)?;
        let key = decoder.decode(attr.key.as_ref()).map_err(EpgError::malformed)?;
        let raw = decoder.decode(attr.value.as_ref()).map_err(EpgError::malformed)?;
        let value = unescape(&raw).map_err(EpgError::malformed)?;
        node.attributes.push((key.into_owned(), value.into_owned()));
    }
    Ok(node)
}

fn attach(stack: &mut [OpenElement], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.node.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(EpgError::malformed(format!(
            "second root element <{}>",
            node.name
        )));
    }
    *root = Some(node);
    Ok(())
}

fn push_text(stack: &mut [OpenElement], text: &str, position: impl std::fmt::Display) -> Result<()> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(EpgError::malformed(format!(
            "text outside the root element at byte {}",
            position
        ))),
    }
}

/// Resolve `&amp;`-style and `&#123;`-style references
fn resolve_reference(e: &BytesRef) -> Result<String> {
    if let Some(ch) = e.resolve_char_ref().map_err(EpgError::malformed)? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(EpgError::malformed)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| EpgError::malformed(format!("undefined entity &{};", name)))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
