#![forbid(unsafe_code)]

//! Shared types for the XAdES profile libraries: the error type, namespace
//! and element name constants, and digest algorithm URIs.

pub mod algorithm;
pub mod error;
pub mod ns;

pub use error::{Error, Result};
