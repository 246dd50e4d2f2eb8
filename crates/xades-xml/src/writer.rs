#![forbid(unsafe_code)]

//! XML writing utilities using uppsala's XmlWriter for template building.

use xades_core::Error;

/// An XML writer wrapping uppsala's XmlWriter.
///
/// Tracks the open elements so that end tags must match and
/// [`XmlWriter::into_string`] fails while any element is still open.  With
/// [`XmlWriter::with_indent`], nested elements go on their own lines.
pub struct XmlWriter {
    writer: uppsala::XmlWriter,
    /// Open elements, innermost last, with whether each has child elements.
    open: Vec<(String, bool)>,
    indent: Option<usize>,
    started: bool,
}

impl XmlWriter {
    /// Create a new XML writer producing compact output.
    pub fn new() -> Self {
        Self {
            writer: uppsala::XmlWriter::new(),
            open: Vec::new(),
            indent: None,
            started: false,
        }
    }

    /// Indent nested elements by `width` spaces, one element per line.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Start an element with the given name and optional attributes.
    pub fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
        self.before_element(name)?;
        self.writer.start_element(name, attrs);
        self.open.push((name.to_owned(), false));
        Ok(())
    }

    /// Write an empty element (self-closing).
    pub fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
        self.before_element(name)?;
        self.writer.empty_element(name, attrs);
        Ok(())
    }

    /// End the current element, which must be `name`.
    pub fn end_element(&mut self, name: &str) -> Result<(), Error> {
        let (open, has_children) = self
            .open
            .pop()
            .ok_or_else(|| Error::XmlStructure(format!("no open element to close: {name}")))?;
        if open != name {
            return Err(Error::XmlStructure(format!(
                "mismatched end tag: expected {open}, got {name}"
            )));
        }
        if has_children {
            self.newline();
        }
        self.writer.end_element(name);
        Ok(())
    }

    /// Write text content.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error> {
        if self.open.is_empty() {
            return Err(Error::XmlStructure("text outside the root element".into()));
        }
        self.writer.text(text);
        Ok(())
    }

    /// Finish writing and return the XML as a string.
    pub fn into_string(self) -> Result<String, Error> {
        if let Some((open, _)) = self.open.last() {
            return Err(Error::XmlStructure(format!("unclosed element: {open}")));
        }
        Ok(self.writer.into_string())
    }

    fn before_element(&mut self, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::XmlStructure("empty element name".into()));
        }
        match self.open.last_mut() {
            Some((_, has_children)) => *has_children = true,
            None if self.started => {
                return Err(Error::XmlStructure(format!(
                    "second root element: {name}"
                )));
            }
            None => {}
        }
        if self.started {
            self.newline();
        }
        self.started = true;
        Ok(())
    }

    fn newline(&mut self) {
        if let Some(width) = self.indent {
            let pad = " ".repeat(width * self.open.len());
            self.writer.text(&format!("\n{pad}"));
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_elements_with_escaping() {
        let mut w = XmlWriter::new();
        w.start_element("a", &[("Id", "x&y\"z")]).unwrap();
        w.empty_element("b", &[]).unwrap();
        w.start_element("c", &[]).unwrap();
        w.write_text("1 < 2 & 3").unwrap();
        w.end_element("c").unwrap();
        w.end_element("a").unwrap();
        let xml = w.into_string().unwrap();

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "a");
        assert_eq!(root.attribute("Id"), Some("x&y\"z"));
        let children: Vec<&str> = root
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(children, vec!["b", "c"]);
        assert_eq!(root.last_element_child().unwrap().text(), Some("1 < 2 & 3"));
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn indents_when_requested() {
        let mut w = XmlWriter::new().with_indent(2);
        w.start_element("a", &[]).unwrap();
        w.start_element("b", &[]).unwrap();
        w.empty_element("c", &[]).unwrap();
        w.end_element("b").unwrap();
        w.end_element("a").unwrap();
        let xml = w.into_string().unwrap();

        assert!(xml.starts_with("<a>\n  <b>\n    <c"), "{xml}");
        assert!(xml.ends_with("\n  </b>\n</a>"), "{xml}");
        roxmltree::Document::parse(&xml).unwrap();
    }

    #[test]
    fn rejects_unbalanced_output() {
        let mut w = XmlWriter::new();
        w.start_element("a", &[]).unwrap();
        assert!(w.end_element("b").is_err());

        let mut w = XmlWriter::new();
        w.start_element("a", &[]).unwrap();
        assert!(w.into_string().is_err());

        let mut w = XmlWriter::new();
        assert!(w.end_element("a").is_err());
        assert!(w.write_text("x").is_err());

        let mut w = XmlWriter::new();
        w.empty_element("a", &[]).unwrap();
        assert!(w.empty_element("b", &[]).is_err());
        assert!(w.start_element("", &[]).is_err());
    }
}
