//! multipart/form-data decoding.
//!
//! [`Parser`] decodes a raw request body into two parallel nested trees:
//! form fields (string leaves) and uploaded files ([`UploadedFile`] leaves).
//! Bracket-notation field names (`a[b][]`) produce nested structure in both
//! trees, with classic form-array semantics: `name[]` appends, `name[key]`
//! sets a named child, a repeated plain `name` overwrites.
//!
//! Parsing is one synchronous pass over an in-memory buffer. Boundary and
//! header level problems fail construction; parts the decoder cannot
//! process (no blank-line separator, no `form-data` disposition, unnamed
//! fields) are skipped silently.
//!
//! # Example
//!
//! ```
//! use formpart_http::Parser;
//! use formpart_core::Value;
//!
//! let body = concat!(
//!     "--b----1234\r\n",
//!     "Content-Disposition: form-data; name=\"greeting\"\r\n",
//!     "\r\n",
//!     "hello\r\n",
//!     "--b----1234--\r\n",
//! );
//!
//! let parser = Parser::new_in_memory(
//!     body.as_bytes(),
//!     "multipart/form-data; boundary=b----1234",
//! ).unwrap();
//!
//! assert_eq!(parser.boundary(), "b----1234");
//! assert_eq!(parser.fields().get("greeting").and_then(Value::as_str), Some("hello"));
//! assert!(parser.files().is_empty());
//! ```

use std::collections::HashMap;

use formpart_core::{
    MemoryStreamProvider, MemoryUploadedFileProvider, ParseError, ServerRequest, StreamProvider,
    UploadStatus, UploadedFile, UploadedFileProvider, ValueMap, assemble, percent_encode,
};
use log::{debug, trace};
use memchr::memmem;

use crate::content_type::resolve_boundary;
use crate::header::HeaderLine;

/// Cut a raw body into its parts using the resolved boundary.
///
/// A delimiter is the literal token `--<boundary>` at the start of the body
/// or preceded by CRLF (the CRLF belongs to the delimiter), followed by
/// optional space/tab transport padding and CRLF. The preamble before the
/// first delimiter and everything after the last delimiter (the closing
/// `--<boundary>--` marker plus epilogue) are discarded. Zero delimiters
/// yield zero parts, which is a valid empty submission.
pub fn split_parts<'a>(body: &'a [u8], boundary: &str) -> Result<Vec<&'a [u8]>, ParseError> {
    if boundary.is_empty() {
        // An empty token would match everywhere.
        return Err(ParseError::Split("empty boundary token".to_string()));
    }

    let token = format!("--{boundary}").into_bytes();
    let finder = memmem::Finder::new(&token);

    // Delimiter extents, leading CRLF and trailing padding/CRLF included.
    let mut delimiters: Vec<(usize, usize)> = Vec::new();
    let mut from = 0;
    while let Some(offset) = finder.find(&body[from..]) {
        let pos = from + offset;
        let start = if pos == 0 {
            0
        } else if pos >= 2 && body[pos - 2..pos] == *b"\r\n" {
            pos - 2
        } else {
            // Mid-line occurrence: not a delimiter.
            from = pos + 1;
            continue;
        };

        let mut end = pos + token.len();
        let mut padded = end;
        while padded < body.len() && matches!(body[padded], b' ' | b'\t') {
            padded += 1;
        }
        if body.len() >= padded + 2 && body[padded..padded + 2] == *b"\r\n" {
            end = padded + 2;
        }

        delimiters.push((start, end));
        from = end.max(pos + 1);
    }

    Ok(delimiters
        .windows(2)
        .map(|pair| {
            // Adjacent delimiters can share one CRLF; clamp to an empty part.
            let lo = pair[0].1;
            let hi = pair[1].0.max(lo);
            &body[lo..hi]
        })
        .collect())
}

/// Split one raw part into its header map and body.
///
/// Returns `Ok(None)` when the part has no blank-line separator: RFC 2046
/// permits headerless parts, but without a disposition header there is
/// nothing to process. Header lines are keyed by lowercased name; the last
/// occurrence of a duplicate name wins.
fn parse_part(part: &[u8]) -> Result<Option<(HashMap<String, HeaderLine>, &[u8])>, ParseError> {
    let Some(split_at) = memmem::find(part, b"\r\n\r\n") else {
        return Ok(None);
    };
    let head = &part[..split_at];
    let body = &part[split_at + 4..];

    let Ok(head) = std::str::from_utf8(head) else {
        return Err(ParseError::HeaderLine(
            String::from_utf8_lossy(head).into_owned(),
        ));
    };

    let mut headers = HashMap::new();
    for line in head.split("\r\n") {
        let header = HeaderLine::parse(line)?;
        headers.insert(header.name().to_ascii_lowercase(), header);
    }

    Ok(Some((headers, body)))
}

/// A fully decoded `multipart/form-data` body.
///
/// Construction is total: the boundary is resolved and the whole body parsed
/// before `new` returns, so a `Parser` value is always in its parsed state.
#[derive(Debug, Clone)]
pub struct Parser {
    boundary: String,
    fields: ValueMap<String>,
    files: ValueMap<UploadedFile>,
}

impl Parser {
    /// Decode `body` using the boundary declared in `content_type`.
    ///
    /// `file_provider` and `stream_provider` are consulted once per file
    /// part to build the [`UploadedFile`] handles placed in the file tree.
    pub fn new(
        body: &[u8],
        content_type: &str,
        file_provider: &dyn UploadedFileProvider,
        stream_provider: &dyn StreamProvider,
    ) -> Result<Self, ParseError> {
        let boundary = resolve_boundary(content_type)?;
        let parts = split_parts(body, &boundary)?;

        let mut field_spec: Vec<String> = Vec::new();
        let mut file_spec: Vec<String> = Vec::new();
        let mut handles: HashMap<u64, UploadedFile> = HashMap::new();
        let mut next_surrogate: u64 = 0;
        // Nameless file parts get zero-based integer keys, shared across
        // the whole parse run.
        let mut nameless_index: u64 = 0;

        for part in parts {
            let Some((headers, part_body)) = parse_part(part)? else {
                debug!("skipping part without header/body separator");
                continue;
            };

            let Some(disposition) = headers.get("content-disposition") else {
                debug!("skipping part without Content-Disposition header");
                continue;
            };
            if disposition.value() != "form-data" {
                debug!(
                    "skipping part with disposition {:?}, expected \"form-data\"",
                    disposition.value()
                );
                continue;
            }

            match disposition.parameter("filename") {
                Some(filename) if !filename.is_empty() => {
                    let media_type = headers
                        .get("content-type")
                        .map_or("text/plain", HeaderLine::value);
                    let stream = stream_provider.create_stream(part_body.to_vec());
                    let file = file_provider.create_uploaded_file(
                        stream,
                        part_body.len(),
                        UploadStatus::Ok,
                        filename,
                        media_type,
                    );

                    let key = match disposition.parameter("name") {
                        Some(name) => name.to_string(),
                        None => {
                            let key = nameless_index.to_string();
                            nameless_index += 1;
                            key
                        }
                    };

                    let id = next_surrogate;
                    next_surrogate += 1;
                    trace!("file part {key:?} ({media_type}) -> surrogate {id}");
                    file_spec.push(format!("{}={id}", percent_encode(key.as_bytes())));
                    handles.insert(id, file);
                }
                _ => {
                    let name = disposition.parameter("name").unwrap_or_default();
                    if name.is_empty() {
                        debug!("skipping field part without a name");
                        continue;
                    }
                    trace!("field part {name:?}, {} bytes", part_body.len());
                    field_spec.push(format!(
                        "{}={}",
                        percent_encode(name.as_bytes()),
                        percent_encode(part_body)
                    ));
                }
            }
        }

        let fields = assemble(&field_spec.join("&"));
        // The file tree is assembled with surrogate integer leaves, then
        // resolved against the side table; handle ownership moves into the
        // tree. Orphaned surrogates (overwritten keys) are dropped.
        let files = assemble(&file_spec.join("&")).filter_map_leaves(|surrogate| {
            surrogate
                .parse::<u64>()
                .ok()
                .and_then(|id| handles.remove(&id))
        });

        Ok(Self {
            boundary,
            fields,
            files,
        })
    }

    /// Decode with the in-memory default providers.
    pub fn new_in_memory(body: &[u8], content_type: &str) -> Result<Self, ParseError> {
        Self::new(
            body,
            content_type,
            &MemoryUploadedFileProvider,
            &MemoryStreamProvider,
        )
    }

    /// Build a parser straight from a request's body and Content-Type
    /// header. A missing header behaves as an empty header value.
    pub fn from_request<R: ServerRequest>(
        request: &R,
        file_provider: &dyn UploadedFileProvider,
        stream_provider: &dyn StreamProvider,
    ) -> Result<Self, ParseError> {
        let content_type = request.header_line("Content-Type").unwrap_or_default();
        Self::new(request.body(), content_type, file_provider, stream_provider)
    }

    /// The boundary token resolved from the Content-Type header.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The decoded form fields, like a decoded form-submission structure.
    #[must_use]
    pub fn fields(&self) -> &ValueMap<String> {
        &self.fields
    }

    /// The decoded uploaded files, in a tree of identical shape.
    #[must_use]
    pub fn files(&self) -> &ValueMap<UploadedFile> {
        &self.files
    }

    /// Consume the parser, returning `(fields, files)`.
    #[must_use]
    pub fn into_trees(self) -> (ValueMap<String>, ValueMap<UploadedFile>) {
        (self.fields, self.files)
    }

    /// Return `request` with both decoded trees attached via its
    /// immutable-update mutators.
    #[must_use]
    pub fn decorate_request<R: ServerRequest>(&self, request: R) -> R {
        request
            .with_parsed_body(self.fields.clone())
            .with_uploaded_files(self.files.clone())
    }
}
