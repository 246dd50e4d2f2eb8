#![forbid(unsafe_code)]

//! Structural schema of the XAdES signature profiles.
//!
//! Models the qualifying-property elements of ETSI TS 101 903 and
//! ETSI EN 319 132-1 as a fixed tree: which profile lists each element,
//! where it nests, how often it may occur, and a dotted hierarchical
//! identifier derived from its position.  All data here is immutable and
//! built once per process.

pub mod cardinality;
pub mod element;
pub mod identifier;
pub mod profile;
pub mod view;

pub use cardinality::Cardinality;
pub use element::{descriptors, Element, ElementDescriptor};
pub use identifier::HierarchicalId;
pub use profile::Profile;
pub use view::{elements_for, ElementSummary, ElementView};
