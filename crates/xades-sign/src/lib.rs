#![forbid(unsafe_code)]

//! Profile-specific XAdES signature builders.
//!
//! [`new_signature_builder`] registers the document's `Id` anchors and
//! returns the builder for the requested profile.

pub mod builder;
pub mod config;
pub mod conformance;
pub mod factory;
pub mod template;

pub use builder::SignatureBuilder;
pub use config::XadesConfig;
pub use conformance::Violation;
pub use factory::{
    new_default_signature_builder, new_signature_builder, new_signature_builder_at,
    new_signature_builder_by_name,
};
