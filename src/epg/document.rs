//! In-memory XMLTV tree
//!
//! Keeps every element and attribute in source order so the guide can be
//! written back out with only the edits made by the transform and filter.

pub const TAG_CHANNEL: &str = "channel";
pub const TAG_PROGRAMME: &str = "programme";
pub const TAG_DISPLAY_NAME: &str = "display-name";
pub const TAG_TITLE: &str = "title";
pub const ATTR_ID: &str = "id";
pub const ATTR_CHANNEL: &str = "channel";
pub const ATTR_START: &str = "start";
pub const ATTR_STOP: &str = "stop";

/// A single element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Non-whitespace character data directly inside this element
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace an existing attribute in place, or append it
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    pub fn is_channel(&self) -> bool {
        self.name == TAG_CHANNEL
    }

    pub fn is_programme(&self) -> bool {
        self.name == TAG_PROGRAMME
    }
}

/// A parsed guide. The root is normally `<tv>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvDocument {
    pub root: XmlNode,
}

impl TvDocument {
    pub fn new(root: XmlNode) -> Self {
        Self { root }
    }

    pub fn channels(&self) -> impl Iterator<Item = &XmlNode> {
        self.root.children.iter().filter(|n| n.is_channel())
    }

    pub fn programmes(&self) -> impl Iterator<Item = &XmlNode> {
        self.root.children.iter().filter(|n| n.is_programme())
    }

    pub fn programmes_mut(&mut self) -> impl Iterator<Item = &mut XmlNode> {
        self.root.children.iter_mut().filter(|n| n.is_programme())
    }

    pub fn channel_count(&self) -> usize {
        self.channels().count()
    }

    pub fn programme_count(&self) -> usize {
        self.programmes().count()
    }
}
