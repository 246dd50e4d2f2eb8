#![forbid(unsafe_code)]

//! Builder configuration: namespace, prefixes and digest algorithm.

use xades_core::{algorithm, ns};
use xades_xml::IdAttr;

/// Settings shared by every profile-specific builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XadesConfig {
    /// Namespace URI of the qualifying properties.
    pub xades_namespace: String,
    /// Prefix bound to `xades_namespace`.
    pub xades_prefix: String,
    /// Prefix bound to the XML-DSig namespace.
    pub signature_prefix: String,
    /// Digest algorithm URI for certificate and reference digests.
    pub digest_algorithm: String,
    /// Additional identifier attribute names registered on the document.
    pub id_attrs: Vec<IdAttr>,
}

impl Default for XadesConfig {
    fn default() -> Self {
        Self {
            xades_namespace: ns::XADES_V132.to_owned(),
            xades_prefix: ns::XADES_PREFIX.to_owned(),
            signature_prefix: ns::DSIG_PREFIX.to_owned(),
            digest_algorithm: algorithm::SHA1.to_owned(),
            id_attrs: Vec::new(),
        }
    }
}

impl XadesConfig {
    /// Create a configuration with explicit namespace, prefixes and digest.
    pub fn new(
        xades_namespace: &str,
        xades_prefix: &str,
        signature_prefix: &str,
        digest_algorithm: &str,
    ) -> Self {
        Self {
            xades_namespace: xades_namespace.to_owned(),
            xades_prefix: xades_prefix.to_owned(),
            signature_prefix: signature_prefix.to_owned(),
            digest_algorithm: digest_algorithm.to_owned(),
            id_attrs: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.xades_namespace = namespace.to_owned();
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.xades_prefix = prefix.to_owned();
        self
    }

    pub fn with_signature_prefix(mut self, prefix: &str) -> Self {
        self.signature_prefix = prefix.to_owned();
        self
    }

    pub fn with_digest_algorithm(mut self, uri: &str) -> Self {
        self.digest_algorithm = uri.to_owned();
        self
    }

    /// Add an identifier attribute name to register during the document scan.
    pub fn add_id_attr(&mut self, attr: IdAttr) {
        self.id_attrs.push(attr);
    }

    /// Short name of the configured digest, if it is a known algorithm.
    pub fn digest_name(&self) -> Option<&'static str> {
        algorithm::digest_name(&self.digest_algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_xades_132() {
        let cfg = XadesConfig::default();
        assert_eq!(cfg.xades_namespace, "http://uri.etsi.org/01903/v1.3.2#");
        assert_eq!(cfg.xades_prefix, "xades");
        assert_eq!(cfg.signature_prefix, "dsign");
        assert_eq!(cfg.digest_name(), Some("SHA-1"));
        assert!(cfg.id_attrs.is_empty());
    }

    #[test]
    fn setters_override_defaults() {
        let mut cfg = XadesConfig::default()
            .with_namespace(ns::XADES_V141)
            .with_prefix("xa")
            .with_signature_prefix("ds")
            .with_digest_algorithm(algorithm::SHA256);
        cfg.add_id_attr(IdAttr::new("ID"));
        assert_eq!(cfg.xades_namespace, ns::XADES_V141);
        assert_eq!(cfg.xades_prefix, "xa");
        assert_eq!(cfg.signature_prefix, "ds");
        assert_eq!(cfg.digest_name(), Some("SHA-256"));
        assert_eq!(cfg.id_attrs, vec![IdAttr::new("ID")]);
    }
}
