//! Content-Type boundary resolution.

use formpart_core::ParseError;

/// The only media type this decoder accepts.
pub const CONTENT_TYPE_MULTIPART: &str = "multipart/form-data";

/// Extract the multipart boundary from a Content-Type header value.
///
/// The header is split on `;` with each segment trimmed. The first segment
/// must equal `multipart/form-data` exactly (case-sensitive); the second
/// must start with `boundary=`. The boundary is the remainder of that
/// segment, trimmed, with one layer of surrounding `"` stripped. Trailing
/// segments (charset and friends) are ignored.
///
/// # Example
///
/// ```
/// use formpart_http::resolve_boundary;
///
/// let boundary = resolve_boundary("multipart/form-data; boundary=\"b----1234\"").unwrap();
/// assert_eq!(boundary, "b----1234");
/// ```
pub fn resolve_boundary(content_type: &str) -> Result<String, ParseError> {
    let mut segments = content_type.split(';').map(str::trim);

    let media_type = segments.next().unwrap_or_default();
    if media_type != CONTENT_TYPE_MULTIPART {
        return Err(ParseError::WrongContentType(media_type.to_string()));
    }

    let boundary = segments
        .next()
        .and_then(|segment| segment.strip_prefix("boundary="))
        .ok_or(ParseError::MissingBoundary)?;

    let boundary = unquote_boundary(boundary.trim());
    if boundary.is_empty() {
        // The delimiter token must be non-empty to split anything.
        return Err(ParseError::MissingBoundary);
    }

    Ok(boundary.to_string())
}

/// Strip one layer of surrounding double quotes.
fn unquote_boundary(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_plain_boundary() {
        let boundary = resolve_boundary("multipart/form-data;boundary=b----1234")
            .expect("boundary resolves");
        assert_eq!(boundary, "b----1234");
    }

    #[test]
    fn reads_a_quoted_boundary_with_padding() {
        let boundary = resolve_boundary("multipart/form-data ; boundary=\"b----1234\"")
            .expect("boundary resolves");
        assert_eq!(boundary, "b----1234");
    }

    #[test]
    fn wrong_media_type_reports_the_given_type() {
        let err = resolve_boundary("text/plain ; charset=UTF-8").expect_err("wrong type");
        assert_eq!(err, ParseError::WrongContentType("text/plain".to_string()));
    }

    #[test]
    fn media_type_match_is_case_sensitive() {
        let err = resolve_boundary("Multipart/Form-Data; boundary=x").expect_err("case matters");
        assert_eq!(
            err,
            ParseError::WrongContentType("Multipart/Form-Data".to_string())
        );
    }

    #[test]
    fn missing_boundary_segment() {
        assert_eq!(
            resolve_boundary("multipart/form-data"),
            Err(ParseError::MissingBoundary)
        );
        assert_eq!(
            resolve_boundary("multipart/form-data ; "),
            Err(ParseError::MissingBoundary)
        );
    }

    #[test]
    fn boundary_must_lead_the_second_segment() {
        // charset first pushes boundary out of the inspected position
        assert_eq!(
            resolve_boundary("multipart/form-data; charset=utf-8; boundary=x"),
            Err(ParseError::MissingBoundary)
        );
    }

    #[test]
    fn empty_boundary_is_missing() {
        assert_eq!(
            resolve_boundary("multipart/form-data; boundary="),
            Err(ParseError::MissingBoundary)
        );
        assert_eq!(
            resolve_boundary("multipart/form-data; boundary=\"\""),
            Err(ParseError::MissingBoundary)
        );
    }

    #[test]
    fn trailing_parameters_are_ignored() {
        let boundary = resolve_boundary("multipart/form-data; boundary=abc; charset=utf-8")
            .expect("boundary resolves");
        assert_eq!(boundary, "abc");
    }
}
