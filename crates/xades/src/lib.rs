#![forbid(unsafe_code)]

pub use xades_core as core;
pub use xades_schema as schema;
pub use xades_sign as sign;
pub use xades_xml as xml;
