//! Parse failure type.
//!
//! Every hard failure of the decoder is reported through [`ParseError`].
//! Anomalies the decoder tolerates (headerless parts, parts without a
//! `form-data` disposition, fields without a name) are skipped silently and
//! never surface here.

/// Errors that can occur while decoding a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The Content-Type media type is not `multipart/form-data`.
    WrongContentType(String),
    /// The Content-Type header carries no `boundary` parameter.
    MissingBoundary,
    /// A part header line has no `:` separator.
    HeaderLine(String),
    /// A part header name has whitespace around it.
    HeaderLineName(String),
    /// The boundary scanner itself failed.
    Split(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongContentType(given) => {
                write!(
                    f,
                    "expected Content-Type \"multipart/form-data\", \"{given}\" given"
                )
            }
            Self::MissingBoundary => write!(f, "missing Content-Type boundary"),
            Self::HeaderLine(line) => {
                write!(f, "HTTP header field value missing: \"{line}\"")
            }
            Self::HeaderLineName(line) => {
                write!(
                    f,
                    "HTTP header field name must not end with whitespace: \"{line}\""
                )
            }
            Self::Split(detail) => write!(f, "boundary split failed: {detail}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_fragment() {
        let err = ParseError::WrongContentType("text/plain".to_string());
        assert!(err.to_string().contains("\"text/plain\""));

        let err = ParseError::HeaderLine("Foo".to_string());
        assert!(err.to_string().contains("\"Foo\""));

        let err = ParseError::HeaderLineName("Foo : bar".to_string());
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn missing_boundary_message_is_stable() {
        assert_eq!(
            ParseError::MissingBoundary.to_string(),
            "missing Content-Type boundary"
        );
    }
}
