//! XMLTV serializer: UTF-8 declaration plus two-space indentation

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use super::document::{TvDocument, XmlNode};
use crate::error::{EpgError, Result};

/// Render the guide to bytes
pub fn to_xml_bytes(doc: &TvDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(EpgError::serialize)?;
    write_node(&mut writer, &doc.root)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.text.is_none() && node.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(EpgError::serialize);
    }

    writer.write_event(Event::Start(start)).map_err(EpgError::serialize)?;
    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(EpgError::serialize)?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(EpgError::serialize)
}
