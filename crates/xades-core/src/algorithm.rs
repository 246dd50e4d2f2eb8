#![forbid(unsafe_code)]

//! Digest algorithm URIs accepted in XAdES `DigestMethod` elements.
//!
//! Each constant is the canonical URI string that appears in `Algorithm`
//! attributes of `ds:DigestMethod` inside `SigningCertificate`,
//! `CompleteCertificateRefs` and the time-stamp containers.

pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
pub const SHA224: &str = "http://www.w3.org/2001/04/xmldsig-more#sha224";
pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";
pub const SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#sha384";
pub const SHA512: &str = "http://www.w3.org/2001/04/xmlenc#sha512";
pub const SHA3_256: &str = "http://www.w3.org/2007/05/xmldsig-more#sha3-256";
pub const SHA3_384: &str = "http://www.w3.org/2007/05/xmldsig-more#sha3-384";
pub const SHA3_512: &str = "http://www.w3.org/2007/05/xmldsig-more#sha3-512";

const DIGESTS: &[(&str, &str)] = &[
    (SHA1, "SHA-1"),
    (SHA224, "SHA-224"),
    (SHA256, "SHA-256"),
    (SHA384, "SHA-384"),
    (SHA512, "SHA-512"),
    (SHA3_256, "SHA3-256"),
    (SHA3_384, "SHA3-384"),
    (SHA3_512, "SHA3-512"),
];

/// Short display name for a digest URI, `None` when the URI is not known.
pub fn digest_name(uri: &str) -> Option<&'static str> {
    DIGESTS
        .iter()
        .find(|(u, _)| *u == uri)
        .map(|(_, name)| *name)
}

/// Resolve a digest given either its URI or its short name (`SHA-256`,
/// `sha256`).
pub fn digest_uri(name_or_uri: &str) -> Option<&'static str> {
    let wanted = name_or_uri.replace('-', "").to_ascii_lowercase();
    DIGESTS
        .iter()
        .find(|(uri, name)| {
            *uri == name_or_uri || name.replace('-', "").to_ascii_lowercase() == wanted
        })
        .map(|(uri, _)| *uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_digests() {
        assert_eq!(digest_name(SHA1), Some("SHA-1"));
        assert_eq!(digest_name(SHA256), Some("SHA-256"));
        assert_eq!(digest_name("urn:example:md2"), None);
    }

    #[test]
    fn resolves_short_names_and_uris() {
        assert_eq!(digest_uri("SHA-256"), Some(SHA256));
        assert_eq!(digest_uri("sha512"), Some(SHA512));
        assert_eq!(digest_uri("sha3-384"), Some(SHA3_384));
        assert_eq!(digest_uri(SHA1), Some(SHA1));
        assert_eq!(digest_uri("md5"), None);
    }
}
