#![forbid(unsafe_code)]

//! Skeleton of the qualifying properties a profile requires.
//!
//! The template holds the `ds:Object` wrapper, the `QualifyingProperties`
//! container targeting the signature, the signed-properties containers the
//! signature references, and every property of the profile's lineage whose
//! cardinality requires at least one occurrence, nested under its ancestors.
//! Property content is left empty for the caller to fill in.

use std::collections::BTreeSet;

use xades_core::{ns, Error};
use xades_schema::{Element, ElementDescriptor, ElementView, Profile};
use xades_xml::XmlWriter;

use crate::config::XadesConfig;

/// `Id` given to `SignedProperties` for the signature `signature_id`.
pub fn signed_properties_id(signature_id: &str) -> String {
    format!("{signature_id}-SignedProperties")
}

/// Elements emitted in the template of `profile`.
pub fn mandatory_elements(profile: Profile) -> BTreeSet<Element> {
    let mut included = BTreeSet::from([
        Element::Object,
        Element::QualifyingProperties,
        Element::SignedProperties,
        Element::SignedSignatureProperties,
    ]);
    for d in ElementView::for_lineage(profile)
        .iter()
        .filter(|d| d.cardinality().is_required())
    {
        included.insert(d.element());
        included.extend(d.ancestors().map(ElementDescriptor::element));
    }
    included
}

/// Render the template of `profile` for the signature whose `Id` is
/// `signature_id`.
pub fn render(profile: Profile, config: &XadesConfig, signature_id: &str) -> Result<String, Error> {
    if signature_id.is_empty() {
        return Err(Error::InvalidArgument("signature id must not be empty".into()));
    }
    let included = mandatory_elements(profile);
    tracing::debug!(profile = %profile, elements = included.len(), "rendering template");

    let mut writer = XmlWriter::new().with_indent(2);
    write_element(
        &mut writer,
        Element::Object.descriptor(),
        &included,
        config,
        signature_id,
    )?;
    writer.into_string()
}

fn write_element(
    writer: &mut XmlWriter,
    d: &ElementDescriptor,
    included: &BTreeSet<Element>,
    config: &XadesConfig,
    signature_id: &str,
) -> Result<(), Error> {
    let prefix = match d.element() {
        Element::Object => &config.signature_prefix,
        _ => &config.xades_prefix,
    };
    let name = qualified_name(prefix, d.name());

    let mut attrs: Vec<(String, String)> = Vec::new();
    match d.element() {
        Element::Object => {
            attrs.push((xmlns_attr(&config.signature_prefix), ns::DSIG.to_owned()));
        }
        Element::QualifyingProperties => {
            attrs.push((xmlns_attr(&config.xades_prefix), config.xades_namespace.clone()));
            attrs.push((ns::attr::TARGET.to_owned(), format!("#{signature_id}")));
        }
        Element::SignedProperties => {
            attrs.push((ns::attr::ID.to_owned(), signed_properties_id(signature_id)));
        }
        _ => {}
    }
    let attrs: Vec<(&str, &str)> = attrs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let children: Vec<&ElementDescriptor> = d
        .children()
        .filter(|c| included.contains(&c.element()))
        .collect();
    if children.is_empty() {
        return writer.empty_element(&name, &attrs);
    }

    writer.start_element(&name, &attrs)?;
    for child in children {
        write_element(writer, child, included, config, signature_id)?;
    }
    writer.end_element(&name)
}

fn qualified_name(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_owned()
    } else {
        format!("{prefix}:{local}")
    }
}

fn xmlns_attr(prefix: &str) -> String {
    if prefix.is_empty() {
        "xmlns".to_owned()
    } else {
        format!("xmlns:{prefix}")
    }
}
