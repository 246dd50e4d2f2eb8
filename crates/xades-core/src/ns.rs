#![forbid(unsafe_code)]

//! XML namespace constants used across the library.

/// XML Digital Signature namespace
pub const DSIG: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XAdES 1.3.2 namespace (ETSI TS 101 903 V1.3.2, also used by EN 319 132-1)
pub const XADES_V132: &str = "http://uri.etsi.org/01903/v1.3.2#";

/// XAdES 1.4.1 namespace (ETSI TS 101 903 V1.4.1 additions)
pub const XADES_V141: &str = "http://uri.etsi.org/01903/v1.4.1#";

/// Default prefix bound to the XAdES namespace.
pub const XADES_PREFIX: &str = "xades";

/// Default prefix bound to the XML-DSig namespace.
pub const DSIG_PREFIX: &str = "dsign";

// ── Element names ────────────────────────────────────────────────────

pub mod node {
    // DSig container
    pub const SIGNATURE: &str = "Signature";
    pub const OBJECT: &str = "Object";

    // Qualifying properties containers
    pub const QUALIFYING_PROPERTIES: &str = "QualifyingProperties";
    pub const QUALIFYING_PROPERTIES_REFERENCE: &str = "QualifyingPropertiesReference";
    pub const SIGNED_PROPERTIES: &str = "SignedProperties";
    pub const SIGNED_SIGNATURE_PROPERTIES: &str = "SignedSignatureProperties";
    pub const SIGNED_DATA_OBJECT_PROPERTIES: &str = "SignedDataObjectProperties";
    pub const UNSIGNED_PROPERTIES: &str = "UnsignedProperties";
    pub const UNSIGNED_SIGNATURE_PROPERTIES: &str = "UnsignedSignatureProperties";

    // Signed signature properties
    pub const SIGNING_TIME: &str = "SigningTime";
    pub const SIGNING_CERTIFICATE: &str = "SigningCertificate";
    pub const SIGNING_CERTIFICATE_V2: &str = "SigningCertificateV2";
    pub const SIGNATURE_POLICY_IDENTIFIER: &str = "SignaturePolicyIdentifier";
    pub const SIGNATURE_PRODUCTION_PLACE: &str = "SignatureProductionPlace";
    pub const SIGNATURE_PRODUCTION_PLACE_V2: &str = "SignatureProductionPlaceV2";
    pub const SIGNER_ROLE: &str = "SignerRole";
    pub const SIGNER_ROLE_V2: &str = "SignerRoleV2";
    pub const CLAIMED_ROLES: &str = "ClaimedRoles";
    pub const CERTIFIED_ROLES: &str = "CertifiedRoles";
    pub const CERTIFIED_ROLES_V2: &str = "CertifiedRolesV2";
    pub const SIGNED_ASSERTIONS: &str = "SignedAssertions";
    pub const SIGNER: &str = "Signer";
    pub const SIGNER_DETAILS: &str = "SignerDetails";

    // Signed data object properties
    pub const DATA_OBJECT_FORMAT: &str = "DataObjectFormat";
    pub const COMMITMENT_TYPE_INDICATION: &str = "CommitmentTypeIndication";
    pub const ALL_DATA_OBJECTS_TIME_STAMP: &str = "AllDataObjectsTimeStamp";
    pub const INDIVIDUAL_DATA_OBJECTS_TIME_STAMP: &str = "IndividualDataObjectsTimeStamp";

    // Unsigned signature properties
    pub const COUNTER_SIGNATURE: &str = "CounterSignature";
    pub const SIGNATURE_TIME_STAMP: &str = "SignatureTimeStamp";
    pub const COMPLETE_CERTIFICATE_REFS: &str = "CompleteCertificateRefs";
    pub const COMPLETE_REVOCATION_REFS: &str = "CompleteRevocationRefs";
    pub const ATTRIBUTE_CERTIFICATE_REFS: &str = "AttributeCertificateRefs";
    pub const ATTRIBUTE_REVOCATION_REFS: &str = "AttributeRevocationRefs";
    pub const SIG_AND_REFS_TIME_STAMP: &str = "SigAndRefsTimeStamp";
    pub const REFS_ONLY_TIME_STAMP: &str = "RefsOnlyTimeStamp";
    pub const CERTIFICATE_VALUES: &str = "CertificateValues";
    pub const REVOCATION_VALUES: &str = "RevocationValues";
    pub const ARCHIVE_TIME_STAMP: &str = "ArchiveTimeStamp";
}

// ── Attribute names ──────────────────────────────────────────────────

pub mod attr {
    pub const ID: &str = "Id";
    pub const TARGET: &str = "Target";
}
