//! Tests for XMLTV tree parsing

use super::*;
use crate::error::EpgError;

#[test]
fn test_parse_simple_epg() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tv SYSTEM "xmltv.dtd">
<tv generator-info-name="epg.pw">
  <channel id="bbc1">
    <display-name>BBC One</display-name>
    <icon src="http://example.com/bbc1.png"/>
  </channel>
  <programme start="20240115120000 +0000" stop="20240115130000 +0000" channel="bbc1">
    <title>News at Noon</title>
    <desc>Daily news broadcast</desc>
    <category>News</category>
  </programme>
</tv>"#;

    let doc = EpgParser::parse(xml).unwrap();

    assert_eq!(doc.root.name, "tv");
    assert_eq!(doc.root.attribute("generator-info-name"), Some("epg.pw"));
    assert_eq!(doc.channel_count(), 1);
    assert_eq!(doc.programme_count(), 1);

    let channel = doc.channels().next().unwrap();
    assert_eq!(channel.attribute("id"), Some("bbc1"));
    assert_eq!(channel.child_text("display-name"), Some("BBC One"));
    assert_eq!(
        channel.child("icon").and_then(|i| i.attribute("src")),
        Some("http://example.com/bbc1.png")
    );

    let programme = doc.programmes().next().unwrap();
    assert_eq!(
        programme.attributes,
        vec![
            ("start".to_string(), "20240115120000 +0000".to_string()),
            ("stop".to_string(), "20240115130000 +0000".to_string()),
            ("channel".to_string(), "bbc1".to_string()),
        ]
    );
    assert_eq!(programme.child_text("title"), Some("News at Noon"));
    assert_eq!(programme.children.len(), 3);
}

#[test]
fn test_preserves_source_order() {
    let xml = r#"<tv>
  <channel id="a"/>
  <programme channel="a" start="20240101000000"/>
  <channel id="b"/>
  <programme channel="b" start="20240101000000"/>
</tv>"#;

    let doc = EpgParser::parse(xml).unwrap();
    let names: Vec<&str> = doc.root.children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["channel", "programme", "channel", "programme"]);
}

#[test]
fn test_entities_resolved() {
    let xml = r#"<tv>
  <channel id="tom&amp;jerry">
    <display-name>Tom &amp; Jerry &#8211; &lt;HD&gt;</display-name>
  </channel>
</tv>"#;

    let doc = EpgParser::parse(xml).unwrap();
    let channel = doc.channels().next().unwrap();
    assert_eq!(channel.attribute("id"), Some("tom&jerry"));
    assert_eq!(channel.child_text("display-name"), Some("Tom & Jerry \u{2013} <HD>"));
}

#[test]
fn test_cdata_text() {
    let xml = "<tv><programme channel=\"c1\"><title><![CDATA[Fight & Night]]></title></programme></tv>";
    let doc = EpgParser::parse(xml).unwrap();
    assert_eq!(
        doc.programmes().next().unwrap().child_text("title"),
        Some("Fight & Night")
    );
}

#[test]
fn test_whitespace_kept_on_leaf_only() {
    let xml = "<tv>\n  <channel id=\"c1\">\n    <display-name>   </display-name>\n    <icon></icon>\n  </channel>\n</tv>";
    let doc = EpgParser::parse(xml).unwrap();
    assert_eq!(doc.root.text, None);

    let channel = doc.channels().next().unwrap();
    assert_eq!(channel.text, None);
    assert_eq!(channel.child_text("display-name"), Some("   "));
    assert!(channel.child("icon").is_some());
    assert_eq!(channel.child_text("icon"), None);
}

#[test]
fn test_latin1_declared_encoding() {
    let xml: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
<tv><channel id=\"caf\xE9\"><display-name>Stra\xDFe Sport</display-name></channel></tv>";
    let doc = EpgParser::parse_bytes(xml).unwrap();
    let channel = doc.channels().next().unwrap();
    assert_eq!(channel.attribute("id"), Some("caf\u{e9}"));
    assert_eq!(channel.child_text("display-name"), Some("Stra\u{df}e Sport"));
}

#[test]
fn test_invalid_utf8_without_declaration_fails() {
    let xml: &[u8] = b"<tv><channel id=\"c1\"><display-name>Stra\xDFe</display-name></channel></tv>";
    assert!(matches!(
        EpgParser::parse_bytes(xml),
        Err(EpgError::MalformedDocument(_))
    ));
}

#[test]
fn test_bom_is_skipped() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(b"<tv><channel id=\"c1\"/></tv>");
    let doc = EpgParser::parse_bytes(&bytes).unwrap();
    assert_eq!(doc.channel_count(), 1);
}

#[test]
fn test_mismatched_end_tag_fails() {
    let xml = "<tv><channel id=\"c1\"></programme></tv>";
    assert!(matches!(EpgParser::parse(xml), Err(EpgError::MalformedDocument(_))));
}

#[test]
fn test_unclosed_document_fails() {
    let xml = "<tv><channel id=\"c1\">";
    match EpgParser::parse(xml) {
        Err(EpgError::MalformedDocument(msg)) => assert!(msg.contains("channel")),
        other => panic!("expected malformed document, got {:?}", other),
    }
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(EpgParser::parse(""), Err(EpgError::MalformedDocument(_))));
    assert!(matches!(EpgParser::parse("   \n"), Err(EpgError::MalformedDocument(_))));
}

#[test]
fn test_second_root_fails() {
    let xml = "<tv></tv><tv></tv>";
    assert!(matches!(EpgParser::parse(xml), Err(EpgError::MalformedDocument(_))));
}

#[test]
fn test_text_outside_root_fails() {
    assert!(matches!(
        EpgParser::parse("not xml at all"),
        Err(EpgError::MalformedDocument(_))
    ));
}

#[test]
fn test_undefined_entity_fails() {
    let xml = "<tv><channel id=\"c1\"><display-name>&bogus;</display-name></channel></tv>";
    assert!(matches!(EpgParser::parse(xml), Err(EpgError::MalformedDocument(_))));
}
