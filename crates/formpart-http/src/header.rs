//! Raw header line parsing.
//!
//! Each part header line (`Content-Disposition: form-data; name="foo"`)
//! becomes a [`HeaderLine`]: a name, a primary value, and a parameter map
//! keyed by lowercase parameter names.

use std::collections::HashMap;

use formpart_core::ParseError;

/// One parsed header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    name: String,
    value: String,
    parameters: HashMap<String, String>,
}

impl HeaderLine {
    /// Parse a raw header line (without its line terminator).
    ///
    /// The line must contain a `:`; the name side must carry no surrounding
    /// whitespace. The value is split on `;`: the first trimmed segment is
    /// the primary value, and every segment containing `=` contributes a
    /// lowercased key and an unquoted, trimmed value to the parameter map.
    /// Segments without `=` beyond the first are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use formpart_http::HeaderLine;
    ///
    /// let header = HeaderLine::parse("Content-Disposition: form-data; name=\"foo\"").unwrap();
    /// assert_eq!(header.name(), "Content-Disposition");
    /// assert_eq!(header.value(), "form-data");
    /// assert_eq!(header.parameter("name"), Some("foo"));
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let Some((name, rest)) = line.split_once(':') else {
            return Err(ParseError::HeaderLine(line.to_string()));
        };

        if name.trim() != name {
            return Err(ParseError::HeaderLineName(line.to_string()));
        }

        let value = rest.split(';').next().map(str::trim).unwrap_or_default().to_string();

        let mut parameters = HashMap::new();
        // The primary value itself may carry a `=` and count as a parameter.
        for segment in rest.split(';').map(str::trim) {
            let Some((key, raw)) = segment.split_once('=') else {
                continue;
            };
            parameters.insert(
                key.trim().to_ascii_lowercase(),
                unquote(raw.trim()).to_string(),
            );
        }

        Ok(Self {
            name: name.to_string(),
            value,
            parameters,
        })
    }

    /// The header name, verbatim.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The primary value: the first trimmed `;` segment.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A parameter value by lowercase key. Absent keys are `None`.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

/// Strip one matching layer of surrounding `"` or `'` quotes.
///
/// Inner whitespace survives: `" v1 "` unquotes to ` v1 `.
fn unquote(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_value() {
        let header = HeaderLine::parse("Foo: bar").expect("header parses");
        assert_eq!(header.name(), "Foo");
        assert_eq!(header.value(), "bar");
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = HeaderLine::parse("Foo").expect_err("no colon");
        assert_eq!(err, ParseError::HeaderLine("Foo".to_string()));
    }

    #[test]
    fn whitespace_before_colon_is_an_error() {
        let err = HeaderLine::parse("Foo : bar").expect_err("padded name");
        assert_eq!(err, ParseError::HeaderLineName("Foo : bar".to_string()));

        let err = HeaderLine::parse(" Foo: bar").expect_err("leading space");
        assert_eq!(err, ParseError::HeaderLineName(" Foo: bar".to_string()));
    }

    #[test]
    fn parameters_are_lowercased_and_unquoted() {
        let header = HeaderLine::parse("Foo: bar; K1=\"v1\"; k2='v2'; k3=v3")
            .expect("header parses");
        assert_eq!(header.value(), "bar");
        assert_eq!(header.parameter("k1"), Some("v1"));
        assert_eq!(header.parameter("k2"), Some("v2"));
        assert_eq!(header.parameter("k3"), Some("v3"));
    }

    #[test]
    fn quoted_whitespace_survives_unquoting() {
        let header = HeaderLine::parse("Foo: bar; k1=\" v1 \"").expect("header parses");
        assert_eq!(header.parameter("k1"), Some(" v1 "));
    }

    #[test]
    fn absent_parameter_is_none() {
        let header = HeaderLine::parse("Foo: bar; k1=v1").expect("header parses");
        assert_eq!(header.parameter("missing"), None);
    }

    #[test]
    fn segments_without_equals_are_ignored() {
        let header = HeaderLine::parse("Foo: bar; flag; k=v").expect("header parses");
        assert_eq!(header.value(), "bar");
        assert_eq!(header.parameter("flag"), None);
        assert_eq!(header.parameter("k"), Some("v"));
    }

    #[test]
    fn value_may_contain_further_colons() {
        let header = HeaderLine::parse("Host: example.com:8080").expect("header parses");
        assert_eq!(header.name(), "Host");
        assert_eq!(header.value(), "example.com:8080");
    }

    #[test]
    fn disposition_filename_with_quotes() {
        let header =
            HeaderLine::parse("Content-Disposition: form-data; name=\"foo\"; filename=\"text.txt\"")
                .expect("header parses");
        assert_eq!(header.value(), "form-data");
        assert_eq!(header.parameter("name"), Some("foo"));
        assert_eq!(header.parameter("filename"), Some("text.txt"));
    }

    #[test]
    fn unquote_requires_a_matching_pair() {
        assert_eq!(unquote("\"v"), "\"v");
        assert_eq!(unquote("'v\""), "'v\"");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("v"), "v");
    }
}
