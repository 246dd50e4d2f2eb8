#![forbid(unsafe_code)]

//! Profile object factory.
//!
//! Registers the document's identifier anchors, then hands the document,
//! attachment point and configuration to the builder of the requested
//! profile.

use roxmltree::NodeId;
use xades_core::Error;
use xades_schema::Profile;
use xades_xml::XmlDocument;

use crate::builder::{
    ArchivalBuilder, BaselineBBuilder, BaselineTBuilder, BasicBuilder, CompleteValidationBuilder,
    ExplicitPolicyBuilder, ExtendedBuilder, ExtendedLongBuilder, SignatureBuilder,
    TimestampBuilder,
};
use crate::config::XadesConfig;

/// Create the builder for `profile`.
///
/// Every element of `document` carrying a non-empty identifier attribute
/// (`Id`, plus the names in `config.id_attrs`) is registered as an anchor
/// before dispatch.
pub fn new_signature_builder(
    profile: Profile,
    mut document: XmlDocument,
    attachment: Option<NodeId>,
    config: XadesConfig,
) -> Result<Box<dyn SignatureBuilder>, Error> {
    for attr in &config.id_attrs {
        document.add_id_attr(attr.clone());
    }
    let anchors = document.register_id_anchors()?;
    tracing::debug!(profile = %profile, anchors, "creating signature builder");

    let builder: Box<dyn SignatureBuilder> = match profile {
        Profile::Bes => Box::new(BasicBuilder::new(document, attachment, config)),
        Profile::Epes => Box::new(ExplicitPolicyBuilder::new(document, attachment, config)),
        Profile::T => Box::new(TimestampBuilder::new(document, attachment, config)),
        Profile::C => Box::new(CompleteValidationBuilder::new(document, attachment, config)),
        Profile::X => Box::new(ExtendedBuilder::new(document, attachment, config)),
        Profile::XL => Box::new(ExtendedLongBuilder::new(document, attachment, config)),
        Profile::A => Box::new(ArchivalBuilder::new(document, attachment, config)),
        Profile::BLevel => Box::new(BaselineBBuilder::new(document, attachment, config)),
        Profile::TLevel => Box::new(BaselineTBuilder::new(document, attachment, config)),
    };
    Ok(builder)
}

/// Create the builder for the profile named `name` (code or short name).
///
/// Fails with [`Error::UnknownProfile`] when `name` is not a profile.
pub fn new_signature_builder_by_name(
    name: &str,
    document: XmlDocument,
    attachment: Option<NodeId>,
    config: XadesConfig,
) -> Result<Box<dyn SignatureBuilder>, Error> {
    let profile: Profile = name.parse()?;
    new_signature_builder(profile, document, attachment, config)
}

/// Create the builder for `profile` attached to `attachment` in `document`,
/// with the default configuration.
pub fn new_signature_builder_at(
    profile: Profile,
    document: XmlDocument,
    attachment: NodeId,
) -> Result<Box<dyn SignatureBuilder>, Error> {
    new_signature_builder(profile, document, Some(attachment), XadesConfig::default())
}

/// Create the builder for `profile` over a fresh empty document with the
/// default configuration.
///
/// Returns `None` when the scratch document cannot be set up.
pub fn new_default_signature_builder(profile: Profile) -> Option<Box<dyn SignatureBuilder>> {
    match new_signature_builder(profile, XmlDocument::new(), None, XadesConfig::default()) {
        Ok(builder) => Some(builder),
        Err(e) => {
            tracing::warn!(profile = %profile, error = %e, "cannot create scratch document");
            None
        }
    }
}
