#![forbid(unsafe_code)]

//! Per-profile views over the element table.
//!
//! Views are computed on first request and shared for the rest of the
//! process, so each profile's checklist is built once.

use std::sync::OnceLock;

use crate::cardinality::Cardinality;
use crate::element::{descriptors, Element, ElementDescriptor};
use crate::profile::Profile;

/// An ordered selection of element descriptors.
#[derive(Debug, Clone)]
pub struct ElementView {
    profile: Option<Profile>,
    elements: Vec<&'static ElementDescriptor>,
}

/// Flat record of one element, for documentation output and validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSummary {
    pub name: &'static str,
    pub identifier: String,
    pub cardinality: Cardinality,
    pub parent: Option<&'static str>,
}

static ALL: OnceLock<ElementView> = OnceLock::new();
static BY_PROFILE: [OnceLock<ElementView>; Profile::ALL.len()] =
    [const { OnceLock::new() }; Profile::ALL.len()];
static BY_LINEAGE: [OnceLock<ElementView>; Profile::ALL.len()] =
    [const { OnceLock::new() }; Profile::ALL.len()];

/// Every descriptor when `profile` is `None`, otherwise the descriptors
/// listing `profile`, in declaration order.
pub fn elements_for(profile: Option<Profile>) -> &'static ElementView {
    match profile {
        None => ALL.get_or_init(|| ElementView {
            profile: None,
            elements: descriptors().iter().collect(),
        }),
        Some(p) => BY_PROFILE[p.index()].get_or_init(|| ElementView::select(p, |d| d.applies_to(p))),
    }
}

impl ElementView {
    fn select(profile: Profile, keep: impl Fn(&ElementDescriptor) -> bool) -> Self {
        let elements: Vec<&'static ElementDescriptor> =
            descriptors().iter().filter(|&d| keep(d)).collect();
        tracing::debug!(profile = %profile, count = elements.len(), "built element view");
        Self {
            profile: Some(profile),
            elements,
        }
    }

    /// Descriptors listing `profile` or any profile it extends, in
    /// declaration order.
    pub fn for_lineage(profile: Profile) -> &'static ElementView {
        BY_LINEAGE[profile.index()].get_or_init(|| {
            let lineage: Vec<Profile> = profile.lineage().collect();
            ElementView::select(profile, |d| lineage.iter().any(|p| d.applies_to(*p)))
        })
    }

    /// Profile the view was filtered by, `None` for the unfiltered view.
    pub fn profile(&self) -> Option<Profile> {
        self.profile
    }

    pub fn elements(&self) -> &[&'static ElementDescriptor] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ElementDescriptor> + '_ {
        self.elements.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: Element) -> bool {
        self.get(element).is_some()
    }

    pub fn get(&self, element: Element) -> Option<&'static ElementDescriptor> {
        self.iter().find(|d| d.element() == element)
    }

    pub fn summaries(&self) -> Vec<ElementSummary> {
        self.iter()
            .map(|d| ElementSummary {
                name: d.name(),
                identifier: d.identifier().render(),
                cardinality: d.cardinality(),
                parent: d.parent().map(|p| p.name()),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ElementView {
    type Item = &'static ElementDescriptor;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'static ElementDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ordered_subset(sub: &ElementView, all: &ElementView) -> bool {
        let mut rest = all.iter();
        sub.iter().all(|d| rest.any(|a| a.element() == d.element()))
    }

    #[test]
    fn unfiltered_view_has_every_descriptor() {
        let all = elements_for(None);
        assert_eq!(all.len(), descriptors().len());
        assert_eq!(all.profile(), None);
        assert_eq!(all.elements()[0].name(), "Object");
    }

    #[test]
    fn profile_views_are_ordered_subsets() {
        let all = elements_for(None);
        for p in Profile::ALL {
            let view = elements_for(Some(p));
            assert!(is_ordered_subset(view, all), "{p}");
            assert!(view.iter().all(|d| d.applies_to(p)));
            assert_eq!(view.profile(), Some(p));
        }
    }

    #[test]
    fn every_profile_view_is_non_empty() {
        for p in Profile::ALL {
            assert!(!elements_for(Some(p)).is_empty(), "{p}");
        }
    }

    #[test]
    fn bes_view() {
        let bes = elements_for(Some(Profile::Bes));
        assert!(bes.contains(Element::SigningCertificate));
        assert!(bes.contains(Element::SignatureProductionPlace));
        assert!(bes.contains(Element::SignerRole));
        assert!(!bes.contains(Element::SignedProperties));
        assert!(!bes.contains(Element::SignaturePolicyIdentifier));
    }

    #[test]
    fn c_view_requires_complete_refs() {
        let c = elements_for(Some(Profile::C));
        for element in [Element::CompleteCertificateRefs, Element::CompleteRevocationRefs] {
            let d = c.get(element).unwrap();
            assert_eq!(d.cardinality(), Cardinality::ExactlyOne);
        }
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn views_are_shared() {
        let a = elements_for(Some(Profile::T));
        let b = elements_for(Some(Profile::T));
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn lineage_view_includes_base_profiles() {
        let t = ElementView::for_lineage(Profile::T);
        assert!(t.contains(Element::SignatureTimeStamp));
        assert!(t.contains(Element::SignaturePolicyIdentifier));
        assert!(t.contains(Element::SigningCertificate));
        assert!(!t.contains(Element::CompleteCertificateRefs));
        assert!(is_ordered_subset(t, elements_for(None)));

        let bes = ElementView::for_lineage(Profile::Bes);
        assert_eq!(bes.len(), elements_for(Some(Profile::Bes)).len());

        let t_level = ElementView::for_lineage(Profile::TLevel);
        assert!(t_level.contains(Element::SigningCertificateV2));
        assert!(!t_level.contains(Element::SigningCertificate));
    }

    #[test]
    fn summaries_carry_parent_and_identifier() {
        let summaries = elements_for(Some(Profile::BLevel)).summaries();
        let cert = summaries
            .iter()
            .find(|s| s.name == "SigningCertificateV2")
            .unwrap();
        assert_eq!(cert.parent, Some("SignedSignatureProperties"));
        assert_eq!(cert.identifier, "0.1.2.3.4.28");
        assert_eq!(cert.cardinality, Cardinality::ExactlyOne);
    }
}
