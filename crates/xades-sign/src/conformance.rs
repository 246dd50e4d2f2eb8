#![forbid(unsafe_code)]

//! Occurrence check of qualifying properties against a profile.
//!
//! For every element of the view, each instance of its parent inside the
//! checked scope must contain a number of such children permitted by the
//! element's cardinality.  A required element whose parent does not occur
//! at all is reported as missing.  Signatures nested inside the scope, such
//! as counter-signatures, carry their own properties and are not searched.

use std::fmt;

use roxmltree::{Node, NodeId};
use xades_core::{ns, Error};
use xades_schema::{Cardinality, Element, ElementDescriptor, ElementView};
use xades_xml::XmlDocument;

/// An element occurring a number of times its cardinality does not permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub element: Element,
    /// Occurrences found under `parent`.
    pub found: usize,
    pub cardinality: Cardinality,
    /// The parent instance inspected, `None` when no parent exists.
    pub parent: Option<NodeId>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.element.descriptor();
        match self.parent {
            Some(_) => write!(
                f,
                "{d}: found {}, expected {}",
                self.found, self.cardinality
            ),
            None => write!(
                f,
                "{d}: missing, no {} present",
                d.parent().map_or("parent", ElementDescriptor::name)
            ),
        }
    }
}

/// Check the elements of `view` inside `scope` (the document element when
/// `None`).
pub fn check(
    document: &XmlDocument,
    scope: Option<NodeId>,
    view: &ElementView,
    xades_namespace: &str,
) -> Result<Vec<Violation>, Error> {
    let doc = document.parse_doc()?;
    let scope = match scope {
        Some(id) => doc.get_node(id).filter(Node::is_element).ok_or_else(|| {
            Error::InvalidArgument("attachment element is not part of the document".into())
        })?,
        None => doc.root_element(),
    };

    let mut violations = Vec::new();
    for d in view {
        let Some(parent) = d.parent() else {
            continue;
        };
        let parents: Vec<Node<'_, '_>> = scoped_elements(scope)
            .into_iter()
            .filter(|n| is_instance(*n, parent, xades_namespace))
            .collect();

        if parents.is_empty() {
            if d.cardinality().is_required() {
                violations.push(Violation {
                    element: d.element(),
                    found: 0,
                    cardinality: d.cardinality(),
                    parent: None,
                });
            }
            continue;
        }

        for p in parents {
            let found = p
                .children()
                .filter(|n| is_instance(*n, d, xades_namespace))
                .count();
            if !d.cardinality().permits(found) {
                violations.push(Violation {
                    element: d.element(),
                    found,
                    cardinality: d.cardinality(),
                    parent: Some(p.id()),
                });
            }
        }
    }

    tracing::debug!(
        profile = ?view.profile(),
        violations = violations.len(),
        "checked qualifying properties"
    );
    Ok(violations)
}

/// Elements under `scope` in document order, excluding the subtrees of
/// nested `ds:Signature` elements.
fn scoped_elements<'a, 'input>(scope: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let mut out = Vec::new();
    let mut stack = vec![scope];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(
            node.children()
                .filter(|c| c.is_element() && !is_signature(*c))
                .collect::<Vec<_>>()
                .into_iter()
                .rev(),
        );
    }
    out
}

fn is_signature(node: Node<'_, '_>) -> bool {
    node.tag_name().name() == ns::node::SIGNATURE && node.tag_name().namespace() == Some(ns::DSIG)
}

fn is_instance(node: Node<'_, '_>, d: &ElementDescriptor, xades_namespace: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == d.name()
        && node.tag_name().namespace().unwrap_or("") == d.namespace(xades_namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xades_schema::{elements_for, Profile};

    fn doc(xml: &str) -> XmlDocument {
        XmlDocument::parse(xml.to_owned()).unwrap()
    }

    const C_FORM: &str = r##"<ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#" Id="sig">
  <ds:Object>
    <xades:QualifyingProperties xmlns:xades="http://uri.etsi.org/01903/v1.3.2#" Target="#sig">
      <xades:UnsignedProperties>
        <xades:UnsignedSignatureProperties>
          <xades:CompleteCertificateRefs/>
          <xades:CompleteRevocationRefs/>
          <xades:CompleteRevocationRefs/>
        </xades:UnsignedSignatureProperties>
      </xades:UnsignedProperties>
    </xades:QualifyingProperties>
  </ds:Object>
</ds:Signature>"##;

    const COUNTER_SIGNED: &str = r##"<ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#" Id="outer">
  <ds:Object>
    <xades:QualifyingProperties xmlns:xades="http://uri.etsi.org/01903/v1.3.2#" Target="#outer">
      <xades:UnsignedProperties>
        <xades:UnsignedSignatureProperties>
          <xades:CounterSignature>
            <ds:Signature Id="inner">
              <ds:Object>
                <xades:QualifyingProperties Target="#inner">
                  <xades:UnsignedProperties>
                    <xades:UnsignedSignatureProperties/>
                  </xades:UnsignedProperties>
                </xades:QualifyingProperties>
              </ds:Object>
            </ds:Signature>
          </xades:CounterSignature>
          <xades:CompleteCertificateRefs/>
          <xades:CompleteRevocationRefs/>
        </xades:UnsignedSignatureProperties>
      </xades:UnsignedProperties>
    </xades:QualifyingProperties>
  </ds:Object>
</ds:Signature>"##;

    #[test]
    fn reports_too_many_occurrences() {
        let d = doc(C_FORM);
        let violations = check(&d, None, elements_for(Some(Profile::C)), ns::XADES_V132).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element, Element::CompleteRevocationRefs);
        assert_eq!(violations[0].found, 2);
        assert!(violations[0].parent.is_some());
        assert!(violations[0]
            .to_string()
            .ends_with("CompleteRevocationRefs: found 2, expected 1"));
    }

    #[test]
    fn reports_missing_parent_for_required_element() {
        let d = doc(C_FORM);
        let violations = check(&d, None, elements_for(Some(Profile::T)), ns::XADES_V132).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element, Element::SignatureTimeStamp);
        assert_eq!(violations[0].found, 0);

        let violations =
            check(&d, None, elements_for(Some(Profile::Epes)), ns::XADES_V132).unwrap();
        assert_eq!(violations[0].element, Element::SignaturePolicyIdentifier);
        assert_eq!(violations[0].parent, None);
        assert!(violations[0].to_string().contains("missing"));
    }

    #[test]
    fn other_namespace_does_not_count() {
        let d = doc(C_FORM);
        let violations = check(&d, None, elements_for(Some(Profile::C)), ns::XADES_V141).unwrap();
        let missing: Vec<Element> = violations.iter().map(|v| v.element).collect();
        assert_eq!(
            missing,
            vec![Element::CompleteCertificateRefs, Element::CompleteRevocationRefs]
        );
    }

    #[test]
    fn optional_elements_may_be_absent() {
        let d = doc(C_FORM);
        let violations = check(&d, None, elements_for(Some(Profile::Bes)), ns::XADES_V132).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn scope_limits_the_search() {
        let xml = r#"<root xmlns:xades="http://uri.etsi.org/01903/v1.3.2#">
  <a Id="first"><xades:UnsignedSignatureProperties><xades:SignatureTimeStamp/></xades:UnsignedSignatureProperties></a>
  <b Id="second"/>
</root>"#;
        let mut d = doc(xml);
        d.register_id_anchors().unwrap();
        let view = elements_for(Some(Profile::T));

        let first = d.find_anchor("first");
        assert!(check(&d, first, view, ns::XADES_V132).unwrap().is_empty());

        let second = d.find_anchor("second");
        assert_eq!(check(&d, second, view, ns::XADES_V132).unwrap().len(), 1);
    }

    #[test]
    fn counter_signatures_are_not_checked_against_the_outer_profile() {
        let mut d = doc(COUNTER_SIGNED);
        d.register_id_anchors().unwrap();
        let view = elements_for(Some(Profile::C));
        assert!(check(&d, None, view, ns::XADES_V132).unwrap().is_empty());
        assert!(check(&d, d.find_anchor("outer"), view, ns::XADES_V132)
            .unwrap()
            .is_empty());

        // Checking the inner signature itself does inspect its properties.
        let inner = check(&d, d.find_anchor("inner"), view, ns::XADES_V132).unwrap();
        let elements: Vec<Element> = inner.iter().map(|v| v.element).collect();
        assert_eq!(
            elements,
            vec![Element::CompleteCertificateRefs, Element::CompleteRevocationRefs]
        );
    }

    #[test]
    fn empty_document_cannot_be_checked() {
        let d = XmlDocument::new();
        assert!(check(&d, None, elements_for(Some(Profile::Bes)), ns::XADES_V132).is_err());
    }
}
