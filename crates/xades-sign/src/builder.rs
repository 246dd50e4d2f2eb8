#![forbid(unsafe_code)]

//! Profile-specific signature builders.
//!
//! One concrete type per profile, all exposing the [`SignatureBuilder`]
//! capability: the document and attachment point they work on, their
//! configuration, the elements their profile lineage defines, a template of
//! the mandatory qualifying properties and an occurrence check.

use std::any::Any;
use std::fmt;

use roxmltree::NodeId;
use xades_core::Error;
use xades_schema::{ElementView, Profile};
use xades_xml::XmlDocument;

use crate::config::XadesConfig;
use crate::conformance::{self, Violation};
use crate::template;

/// Common interface of the profile-specific builders.
pub trait SignatureBuilder: fmt::Debug + Send + Sync {
    fn profile(&self) -> Profile;

    fn document(&self) -> &XmlDocument;

    fn document_mut(&mut self) -> &mut XmlDocument;

    /// Element the qualifying properties are attached to, if any.
    fn attachment(&self) -> Option<NodeId>;

    fn config(&self) -> &XadesConfig;

    fn as_any(&self) -> &dyn Any;

    /// Elements of this profile and every profile it extends.
    fn elements(&self) -> &'static ElementView {
        ElementView::for_lineage(self.profile())
    }

    /// Mandatory qualifying-property skeleton for the signature
    /// `signature_id`.
    fn template(&self, signature_id: &str) -> Result<String, Error> {
        template::render(self.profile(), self.config(), signature_id)
    }

    /// Occurrence check of the document (or the attachment subtree) against
    /// this builder's elements.
    fn check(&self) -> Result<Vec<Violation>, Error> {
        conformance::check(
            self.document(),
            self.attachment(),
            self.elements(),
            &self.config().xades_namespace,
        )
    }
}

#[derive(Debug)]
struct Parts {
    document: XmlDocument,
    attachment: Option<NodeId>,
    config: XadesConfig,
}

macro_rules! profile_builders {
    ($($(#[$meta:meta])* $name:ident => $profile:expr;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $name {
                parts: Parts,
            }

            impl $name {
                pub fn new(
                    document: XmlDocument,
                    attachment: Option<NodeId>,
                    config: XadesConfig,
                ) -> Self {
                    Self {
                        parts: Parts {
                            document,
                            attachment,
                            config,
                        },
                    }
                }

                /// Take back the document.
                pub fn into_document(self) -> XmlDocument {
                    self.parts.document
                }
            }

            impl SignatureBuilder for $name {
                fn profile(&self) -> Profile {
                    $profile
                }

                fn document(&self) -> &XmlDocument {
                    &self.parts.document
                }

                fn document_mut(&mut self) -> &mut XmlDocument {
                    &mut self.parts.document
                }

                fn attachment(&self) -> Option<NodeId> {
                    self.parts.attachment
                }

                fn config(&self) -> &XadesConfig {
                    &self.parts.config
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

profile_builders! {
    /// XAdES-BES builder.
    BasicBuilder => Profile::Bes;
    /// XAdES-EPES builder.
    ExplicitPolicyBuilder => Profile::Epes;
    /// XAdES-T builder.
    TimestampBuilder => Profile::T;
    /// XAdES-C builder.
    CompleteValidationBuilder => Profile::C;
    /// XAdES-X builder.
    ExtendedBuilder => Profile::X;
    /// XAdES-X-L builder.
    ExtendedLongBuilder => Profile::XL;
    /// XAdES-A builder.
    ArchivalBuilder => Profile::A;
    /// Baseline B-level builder.
    BaselineBBuilder => Profile::BLevel;
    /// Baseline T-level builder.
    BaselineTBuilder => Profile::TLevel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use xades_schema::Element;

    #[test]
    fn builder_reports_its_profile_and_parts() {
        let builder = CompleteValidationBuilder::new(XmlDocument::new(), None, XadesConfig::default());
        assert_eq!(builder.profile(), Profile::C);
        assert!(builder.attachment().is_none());
        assert!(builder.document().is_empty());
        assert!(builder.elements().contains(Element::CompleteCertificateRefs));
        assert!(builder.elements().contains(Element::SignatureTimeStamp));
        assert!(builder.as_any().is::<CompleteValidationBuilder>());
        assert!(builder.into_document().is_empty());
    }
}
