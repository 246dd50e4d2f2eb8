#![forbid(unsafe_code)]

//! XML document wrapper over roxmltree with identifier-anchor registration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use roxmltree::NodeId;
use xades_core::{ns, Error};

/// Name of an attribute whose value identifies its element within the
/// document.
///
/// The un-namespaced, case-sensitive `Id` attribute is always treated as an
/// identifier; further names (optionally namespace qualified) can be added
/// per document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdAttr {
    namespace: Option<String>,
    name: String,
}

impl IdAttr {
    /// An un-namespaced attribute name.
    pub fn new(name: &str) -> Self {
        Self {
            namespace: None,
            name: name.to_owned(),
        }
    }

    /// An attribute name in the given namespace.
    pub fn qualified(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Some(namespace.to_owned()),
            name: name.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn value<'a, 'input>(&self, node: roxmltree::Node<'a, 'input>) -> Option<&'a str> {
        match &self.namespace {
            Some(uri) => node.attribute((uri.as_str(), self.name.as_str())),
            None => node.attribute(self.name.as_str()),
        }
    }
}

impl Default for IdAttr {
    fn default() -> Self {
        Self::new(ns::attr::ID)
    }
}

impl fmt::Display for IdAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(uri) => write!(f, "{{{uri}}}{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for IdAttr {
    type Err = Error;

    /// Parse `local` or Clark notation `{namespace}local`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument(format!("invalid id attribute name: {s:?}"));
        let attr = match s.strip_prefix('{') {
            Some(rest) => {
                let (uri, local) = rest.split_once('}').ok_or_else(invalid)?;
                if uri.is_empty() {
                    Self::new(local)
                } else {
                    Self::qualified(uri, local)
                }
            }
            None => Self::new(s),
        };
        if attr.name.is_empty() || attr.name.contains(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(attr)
    }
}

/// An owned XML document.  Stores the text and the identifier anchors
/// registered for it.
///
/// To work with the parsed tree, call [`XmlDocument::parse_doc`] which
/// returns a temporary `roxmltree::Document` borrowing from the text.  Node
/// ids handed out by this type (anchors) index into any tree returned by
/// `parse_doc`, since the text never changes.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    text: String,
    /// Additional identifier attribute names (beyond the fixed `Id`).
    extra_id_attrs: Vec<IdAttr>,
    /// Identifier value → element carrying it.
    anchors: BTreeMap<String, NodeId>,
    /// Every element carrying a non-empty identifier, in document order.
    anchor_elements: Vec<NodeId>,
}

impl XmlDocument {
    /// A fresh document with no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate XML from a string, taking ownership.
    pub fn parse(text: String) -> Result<Self, Error> {
        // Validate that the XML parses successfully.
        let _doc = roxmltree::Document::parse_with_options(&text, crate::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))?;
        Ok(Self {
            text,
            extra_id_attrs: Vec::new(),
            anchors: BTreeMap::new(),
            anchor_elements: Vec::new(),
        })
    }

    /// Parse and validate XML from bytes.
    pub fn parse_bytes(data: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {e}")))?
            .to_owned();
        Self::parse(text)
    }

    /// Get the raw XML text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the document has no content yet.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Register an additional identifier attribute name.
    pub fn add_id_attr(&mut self, attr: IdAttr) {
        if attr != IdAttr::default() && !self.extra_id_attrs.contains(&attr) {
            self.extra_id_attrs.push(attr);
        }
    }

    /// Every attribute name treated as an identifier, `Id` first.
    pub fn id_attrs(&self) -> impl Iterator<Item = IdAttr> + '_ {
        std::iter::once(IdAttr::default()).chain(self.extra_id_attrs.iter().cloned())
    }

    /// Parse the document and return a temporary `roxmltree::Document`.
    ///
    /// This re-parses the XML from the stored text.  For performance,
    /// call this once at the top of a processing pipeline and pass the
    /// resulting document reference down through the call chain.
    pub fn parse_doc(&self) -> Result<roxmltree::Document<'_>, Error> {
        if self.is_empty() {
            return Err(Error::XmlStructure("document has no root element".into()));
        }
        roxmltree::Document::parse_with_options(&self.text, crate::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))
    }

    /// Scan every element and register each non-empty identifier attribute
    /// as an anchor for its element.
    ///
    /// The registry is rebuilt from scratch, so repeating the scan yields
    /// the same anchors.  Every element with a non-empty identifier is
    /// flagged (see [`XmlDocument::is_anchor`]); when two elements carry the
    /// same value, lookup by value resolves to the first one in document
    /// order.  Returns the number of distinct identifier values.
    pub fn register_id_anchors(&mut self) -> Result<usize, Error> {
        if self.is_empty() {
            self.anchors.clear();
            self.anchor_elements.clear();
            return Ok(0);
        }

        let attrs: Vec<IdAttr> = self.id_attrs().collect();
        let mut anchors = BTreeMap::new();
        let mut anchor_elements = Vec::new();
        {
            let doc = self.parse_doc()?;
            for node in doc.descendants().filter(|n| n.is_element()) {
                for attr in &attrs {
                    let Some(value) = attr.value(node) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    if anchor_elements.last() != Some(&node.id()) {
                        anchor_elements.push(node.id());
                    }
                    if anchors.contains_key(value) {
                        tracing::warn!(
                            id = value,
                            element = node.tag_name().name(),
                            "duplicate identifier value, lookup keeps first element"
                        );
                        continue;
                    }
                    tracing::trace!(id = value, attr = %attr, "registered identifier anchor");
                    anchors.insert(value.to_owned(), node.id());
                }
            }
        }

        tracing::debug!(
            count = anchors.len(),
            elements = anchor_elements.len(),
            "identifier anchors registered"
        );
        self.anchors = anchors;
        self.anchor_elements = anchor_elements;
        Ok(self.anchors.len())
    }

    /// Registered anchors in identifier order.
    pub fn anchors(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.anchors.iter().map(|(id, node)| (id.as_str(), *node))
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Look up the element registered for an identifier value.
    pub fn find_anchor(&self, id: &str) -> Option<NodeId> {
        self.anchors.get(id).copied()
    }

    /// Whether the element carries a registered identifier, including
    /// elements whose value duplicates an earlier one.
    pub fn is_anchor(&self, node: NodeId) -> bool {
        self.anchor_elements.contains(&node)
    }
}
