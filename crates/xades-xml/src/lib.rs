#![forbid(unsafe_code)]

//! XML document abstraction for the XAdES profile libraries.
//!
//! Provides an owned document over `roxmltree` together with the registry
//! of identifier anchors (elements carrying an `Id` attribute) used for
//! same-document fragment references, and a small writer for generated
//! templates.

pub mod document;
pub mod writer;

pub use document::{IdAttr, XmlDocument};
pub use roxmltree::NodeId;
pub use writer::XmlWriter;

/// Return roxmltree parsing options that allow DTD.
///
/// DTD is allowed because roxmltree does not expand external entities or
/// perform entity substitution beyond the five predefined XML entities,
/// so it is safe.
pub fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}
