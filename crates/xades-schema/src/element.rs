#![forbid(unsafe_code)]

//! The fixed tree of XAdES qualifying-property elements.
//!
//! Every element is declared once in [`TABLE`], in declaration order, with
//! its parent, the profiles listing it and its cardinality.  Parents refer
//! to earlier rows by [`Element`], so the tree is acyclic by construction;
//! a `const` assertion rejects a table that violates this at compile time.
//!
//! Rows with no profiles are structural containers (`Object`,
//! `SignedProperties`, ...) that belong to every profile's tree through their
//! descendants.

use std::fmt;
use std::sync::OnceLock;

use xades_core::ns;

use self::Element as E;
use crate::cardinality::Cardinality::{self, ExactlyOne, OneOrMore, ZeroOrMore, ZeroOrOne};
use crate::identifier::HierarchicalId;
use crate::profile::Profile::{self, BLevel, Bes, Epes, TLevel, XL};

/// Number of rows in the element table.
pub const ELEMENT_COUNT: usize = 37;

/// An element of the qualifying-properties tree, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Element {
    Object,
    QualifyingProperties,
    SignedProperties,
    SignedSignatureProperties,
    SigningTime,
    SigningCertificate,
    SignaturePolicyIdentifier,
    SignatureProductionPlace,
    SignerRole,
    ClaimedRoles,
    CertifiedRoles,
    Signer,
    SignerDetails,
    SignedDataObjectProperties,
    DataObjectFormat,
    CommitmentTypeIndication,
    AllDataObjectsTimeStamp,
    IndividualDataObjectsTimeStamp,
    UnsignedProperties,
    UnsignedSignatureProperties,
    CounterSignature,
    SignatureTimeStamp,
    CompleteCertificateRefs,
    CompleteRevocationRefs,
    AttributeCertificateRefs,
    AttributeRevocationRefs,
    QualifyingPropertiesReference,
    // EN 319 132-1 baseline properties
    SigningCertificateV2,
    SignatureProductionPlaceV2,
    SignerRoleV2,
    CertifiedRolesV2,
    SignedAssertions,
    // Annex B extended forms
    SigAndRefsTimeStamp,
    RefsOnlyTimeStamp,
    CertificateValues,
    RevocationValues,
    ArchiveTimeStamp,
}

impl Element {
    /// Position of the element in the table.
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn position(self) -> u8 {
        self as u8
    }

    pub fn descriptor(self) -> &'static ElementDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// First element declared with the given local name.
    pub fn from_name(name: &str) -> Option<Element> {
        DESCRIPTORS
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.element)
    }
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    element: Element,
    name: &'static str,
    parent: Option<Element>,
    profiles: &'static [Profile],
    cardinality: Cardinality,
}

impl ElementDescriptor {
    const fn structural(element: Element, name: &'static str, parent: Option<Element>) -> Self {
        Self {
            element,
            name,
            parent,
            profiles: &[],
            cardinality: Cardinality::ExactlyOne,
        }
    }

    const fn property(
        element: Element,
        profiles: &'static [Profile],
        parent: Element,
        name: &'static str,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            element,
            name,
            parent: Some(parent),
            profiles,
            cardinality,
        }
    }

    pub fn element(&self) -> Element {
        self.element
    }

    /// Local name of the XML element.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static ElementDescriptor> {
        self.parent.map(Element::descriptor)
    }

    /// Profiles listing this element; empty for structural containers.
    pub fn profiles(&self) -> &'static [Profile] {
        self.profiles
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Position among all descriptors.
    pub fn local_index(&self) -> usize {
        self.element.index()
    }

    /// Whether the element is a container without profile membership.
    pub fn is_structural(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Whether the element is listed by `profile`.  Structural containers
    /// apply to no profile directly.
    pub fn applies_to(&self, profile: Profile) -> bool {
        self.profiles.contains(&profile)
    }

    /// Namespace the element lives in, given the XAdES namespace in use.
    /// Only `Object` belongs to XML-DSig.
    pub fn namespace<'a>(&self, xades_namespace: &'a str) -> &'a str {
        match self.element {
            Element::Object => ns::DSIG,
            _ => xades_namespace,
        }
    }

    /// Hierarchical identifier derived from the parent chain.
    ///
    /// Computed on first access and cached for the process lifetime.
    pub fn identifier(&self) -> &'static HierarchicalId {
        IDS[self.local_index()].get_or_init(|| {
            let parent = self.parent.map(|p| p.descriptor().identifier());
            let id = HierarchicalId::for_position(parent, self.element.position());
            tracing::trace!(element = self.name, id = %id, "computed element identifier");
            id
        })
    }

    /// Clause-style label, e.g. `[0.1.2.3.4.5] SigningTime`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static ElementDescriptor> {
        std::iter::successors(self.parent(), |d| d.parent())
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = &'static ElementDescriptor> + '_ {
        DESCRIPTORS
            .iter()
            .filter(move |d| d.parent == Some(self.element))
    }
}

impl fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.identifier(), self.name)
    }
}

/// Every descriptor in declaration order.
pub fn descriptors() -> &'static [ElementDescriptor] {
    &DESCRIPTORS
}

#[rustfmt::skip]
const TABLE: [ElementDescriptor; ELEMENT_COUNT] = [
    ElementDescriptor::structural(E::Object, ns::node::OBJECT, None),
    ElementDescriptor::structural(E::QualifyingProperties, ns::node::QUALIFYING_PROPERTIES, Some(E::Object)),
    ElementDescriptor::structural(E::SignedProperties, ns::node::SIGNED_PROPERTIES, Some(E::QualifyingProperties)),
    ElementDescriptor::structural(E::SignedSignatureProperties, ns::node::SIGNED_SIGNATURE_PROPERTIES, Some(E::SignedProperties)),
    ElementDescriptor::property(E::SigningTime, &[Bes, BLevel], E::SignedSignatureProperties, ns::node::SIGNING_TIME, ZeroOrOne),
    ElementDescriptor::property(E::SigningCertificate, &[Bes], E::SignedSignatureProperties, ns::node::SIGNING_CERTIFICATE, ZeroOrOne),
    ElementDescriptor::property(E::SignaturePolicyIdentifier, &[Epes, BLevel], E::SignedSignatureProperties, ns::node::SIGNATURE_POLICY_IDENTIFIER, ExactlyOne),
    ElementDescriptor::property(E::SignatureProductionPlace, &[Bes], E::SignedSignatureProperties, ns::node::SIGNATURE_PRODUCTION_PLACE, ZeroOrOne),
    ElementDescriptor::property(E::SignerRole, &[Bes], E::SignedSignatureProperties, ns::node::SIGNER_ROLE, ZeroOrOne),
    ElementDescriptor::property(E::ClaimedRoles, &[Bes, BLevel], E::SignerRole, ns::node::CLAIMED_ROLES, ZeroOrMore),
    ElementDescriptor::property(E::CertifiedRoles, &[Bes], E::SignerRole, ns::node::CERTIFIED_ROLES, ZeroOrMore),
    ElementDescriptor::property(E::Signer, &[Bes, BLevel], E::SignedSignatureProperties, ns::node::SIGNER, ZeroOrOne),
    ElementDescriptor::property(E::SignerDetails, &[Bes, BLevel], E::SignedSignatureProperties, ns::node::SIGNER_DETAILS, ZeroOrOne),
    ElementDescriptor::structural(E::SignedDataObjectProperties, ns::node::SIGNED_DATA_OBJECT_PROPERTIES, Some(E::SignedProperties)),
    ElementDescriptor::property(E::DataObjectFormat, &[Bes, BLevel], E::SignedDataObjectProperties, ns::node::DATA_OBJECT_FORMAT, ZeroOrMore),
    ElementDescriptor::property(E::CommitmentTypeIndication, &[Bes, BLevel], E::SignedDataObjectProperties, ns::node::COMMITMENT_TYPE_INDICATION, ZeroOrMore),
    ElementDescriptor::property(E::AllDataObjectsTimeStamp, &[Bes, BLevel], E::SignedDataObjectProperties, ns::node::ALL_DATA_OBJECTS_TIME_STAMP, ZeroOrMore),
    ElementDescriptor::property(E::IndividualDataObjectsTimeStamp, &[Bes, BLevel], E::SignedDataObjectProperties, ns::node::INDIVIDUAL_DATA_OBJECTS_TIME_STAMP, ZeroOrMore),
    ElementDescriptor::structural(E::UnsignedProperties, ns::node::UNSIGNED_PROPERTIES, Some(E::QualifyingProperties)),
    ElementDescriptor::structural(E::UnsignedSignatureProperties, ns::node::UNSIGNED_SIGNATURE_PROPERTIES, Some(E::UnsignedProperties)),
    ElementDescriptor::property(E::CounterSignature, &[Bes, BLevel], E::UnsignedSignatureProperties, ns::node::COUNTER_SIGNATURE, ZeroOrMore),
    ElementDescriptor::property(E::SignatureTimeStamp, &[Profile::T, TLevel], E::UnsignedSignatureProperties, ns::node::SIGNATURE_TIME_STAMP, OneOrMore),
    ElementDescriptor::property(E::CompleteCertificateRefs, &[Profile::C], E::UnsignedSignatureProperties, ns::node::COMPLETE_CERTIFICATE_REFS, ExactlyOne),
    ElementDescriptor::property(E::CompleteRevocationRefs, &[Profile::C], E::UnsignedSignatureProperties, ns::node::COMPLETE_REVOCATION_REFS, ExactlyOne),
    ElementDescriptor::property(E::AttributeCertificateRefs, &[Profile::C], E::UnsignedSignatureProperties, ns::node::ATTRIBUTE_CERTIFICATE_REFS, ZeroOrOne),
    ElementDescriptor::property(E::AttributeRevocationRefs, &[Profile::C], E::UnsignedSignatureProperties, ns::node::ATTRIBUTE_REVOCATION_REFS, ZeroOrOne),
    ElementDescriptor::structural(E::QualifyingPropertiesReference, ns::node::QUALIFYING_PROPERTIES_REFERENCE, Some(E::Object)),
    ElementDescriptor::property(E::SigningCertificateV2, &[BLevel], E::SignedSignatureProperties, ns::node::SIGNING_CERTIFICATE_V2, ExactlyOne),
    ElementDescriptor::property(E::SignatureProductionPlaceV2, &[BLevel], E::SignedSignatureProperties, ns::node::SIGNATURE_PRODUCTION_PLACE_V2, ZeroOrOne),
    ElementDescriptor::property(E::SignerRoleV2, &[BLevel], E::SignedSignatureProperties, ns::node::SIGNER_ROLE_V2, ZeroOrOne),
    ElementDescriptor::property(E::CertifiedRolesV2, &[BLevel], E::SignerRoleV2, ns::node::CERTIFIED_ROLES_V2, ZeroOrMore),
    ElementDescriptor::property(E::SignedAssertions, &[BLevel], E::SignerRoleV2, ns::node::SIGNED_ASSERTIONS, ZeroOrMore),
    ElementDescriptor::property(E::SigAndRefsTimeStamp, &[Profile::X], E::UnsignedSignatureProperties, ns::node::SIG_AND_REFS_TIME_STAMP, ZeroOrMore),
    ElementDescriptor::property(E::RefsOnlyTimeStamp, &[Profile::X], E::UnsignedSignatureProperties, ns::node::REFS_ONLY_TIME_STAMP, ZeroOrMore),
    ElementDescriptor::property(E::CertificateValues, &[XL], E::UnsignedSignatureProperties, ns::node::CERTIFICATE_VALUES, ExactlyOne),
    ElementDescriptor::property(E::RevocationValues, &[XL], E::UnsignedSignatureProperties, ns::node::REVOCATION_VALUES, ExactlyOne),
    ElementDescriptor::property(E::ArchiveTimeStamp, &[Profile::A], E::UnsignedSignatureProperties, ns::node::ARCHIVE_TIME_STAMP, OneOrMore),
];

// Table rows sit at their element's index, are named, and only refer to
// parents declared before them.
const _: () = {
    let mut i = 0;
    while i < TABLE.len() {
        let row = &TABLE[i];
        assert!(row.element as usize == i, "element table row out of order");
        assert!(!row.name.is_empty(), "element table row without a name");
        if let Some(parent) = row.parent {
            assert!((parent as usize) < i, "element declared before its parent");
        }
        i += 1;
    }
};

static DESCRIPTORS: [ElementDescriptor; ELEMENT_COUNT] = TABLE;

static IDS: [OnceLock<HierarchicalId>; ELEMENT_COUNT] = [const { OnceLock::new() }; ELEMENT_COUNT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_memoized() {
        for d in descriptors() {
            let first = d.identifier();
            let second = d.identifier();
            assert!(std::ptr::eq(first, second));
            assert_eq!(first.components(), second.components());
        }
    }

    #[test]
    fn child_identifier_extends_parent() {
        for d in descriptors() {
            match d.parent() {
                Some(parent) => {
                    assert_eq!(d.identifier().len(), parent.identifier().len() + 1, "{}", d.name());
                    assert!(d.identifier().is_descendant_of(parent.identifier()));
                    assert_eq!(
                        *d.identifier().components().last().unwrap() as usize,
                        d.local_index() + 1
                    );
                }
                None => {
                    assert_eq!(d.identifier().len(), 2);
                    assert_eq!(d.identifier().components()[0], 0);
                }
            }
        }
    }

    #[test]
    fn known_identifiers() {
        assert_eq!(Element::Object.descriptor().identifier().render(), "0.1");
        assert_eq!(
            Element::SignedSignatureProperties.descriptor().identifier().render(),
            "0.1.2.3.4"
        );
        assert_eq!(
            Element::SigningTime.descriptor().describe(),
            "[0.1.2.3.4.5] SigningTime"
        );
        assert_eq!(
            Element::ClaimedRoles.descriptor().identifier().render(),
            "0.1.2.3.4.9.10"
        );
        assert_eq!(
            Element::QualifyingPropertiesReference.descriptor().identifier().render(),
            "0.1.27"
        );
    }

    #[test]
    fn only_object_is_a_root() {
        let roots: Vec<&str> = descriptors()
            .iter()
            .filter(|d| d.parent().is_none())
            .map(|d| d.name())
            .collect();
        assert_eq!(roots, vec!["Object"]);
    }

    #[test]
    fn structural_nodes_apply_to_no_profile() {
        let sp = Element::SignedProperties.descriptor();
        assert!(sp.is_structural());
        for p in Profile::ALL {
            assert!(!sp.applies_to(p));
        }
        assert!(Element::SignerRole.descriptor().applies_to(Profile::Bes));
        assert!(!Element::SignerRole.descriptor().applies_to(Profile::BLevel));
    }

    #[test]
    fn declared_cardinalities_are_kept() {
        assert_eq!(
            Element::SigningTime.descriptor().cardinality(),
            Cardinality::ZeroOrOne
        );
        assert_eq!(
            Element::SignatureTimeStamp.descriptor().cardinality(),
            Cardinality::OneOrMore
        );
        assert_eq!(
            Element::CompleteRevocationRefs.descriptor().cardinality(),
            Cardinality::ExactlyOne
        );
    }

    #[test]
    fn lookup_by_name_and_tree_navigation() {
        assert_eq!(Element::from_name("SignerRoleV2"), Some(Element::SignerRoleV2));
        assert_eq!(Element::from_name("Nope"), None);

        let ancestors: Vec<&str> = Element::CertifiedRoles
            .descriptor()
            .ancestors()
            .map(|d| d.name())
            .collect();
        assert_eq!(
            ancestors,
            vec![
                "SignerRole",
                "SignedSignatureProperties",
                "SignedProperties",
                "QualifyingProperties",
                "Object"
            ]
        );

        let children: Vec<&str> = Element::SignerRoleV2
            .descriptor()
            .children()
            .map(|d| d.name())
            .collect();
        assert_eq!(children, vec!["CertifiedRolesV2", "SignedAssertions"]);
    }

    #[test]
    fn element_names_are_unique() {
        let mut names: Vec<&str> = descriptors().iter().map(|d| d.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ELEMENT_COUNT);
    }

    #[test]
    fn identifiers_are_concurrently_stable() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    descriptors()
                        .iter()
                        .map(|d| d.identifier().render())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
