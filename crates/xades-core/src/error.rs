#![forbid(unsafe_code)]

/// Errors produced by the XAdES profile libraries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("invalid XML structure: {0}")]
    XmlStructure(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error was caused by a caller-supplied value outside the
    /// accepted domain (bad profile name, malformed identifier).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::UnknownProfile(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profile_is_invalid_argument() {
        let err = Error::UnknownProfile("XAdES-Q".into());
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "unknown profile: XAdES-Q");
    }

    #[test]
    fn structural_errors_are_not_invalid_arguments() {
        assert!(!Error::XmlStructure("no root".into()).is_invalid_argument());
        assert!(!Error::Other("x".into()).is_invalid_argument());
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/xades/input.xml")?)
        }
        let err = read().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
        assert!(!err.is_invalid_argument());
    }
}
