//! HTTP request types and the decoration seam.
//!
//! [`ServerRequest`] is the minimal surface the parser needs from a host
//! framework's request type: the raw body, one header line, and two
//! immutable-update mutators for attaching the decoded trees. The concrete
//! [`Request`] here implements it so the decoder is usable stand-alone.

use std::collections::HashMap;

use crate::nested::ValueMap;
use crate::upload::UploadedFile;

/// A request-like object the parser can read from and decorate.
///
/// `with_parsed_body` and `with_uploaded_files` follow the immutable-update
/// pattern: they consume the request and return a new value with the tree
/// attached.
pub trait ServerRequest: Sized {
    /// Raw request body bytes.
    fn body(&self) -> &[u8];

    /// A header value by name (case-insensitive), as a single line.
    fn header_line(&self, name: &str) -> Option<&str>;

    /// Attach the decoded field tree.
    #[must_use]
    fn with_parsed_body(self, fields: ValueMap<String>) -> Self;

    /// Attach the decoded file tree.
    #[must_use]
    fn with_uploaded_files(self, files: ValueMap<UploadedFile>) -> Self;
}

/// HTTP headers collection with case-insensitive names.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create empty headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Insert a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Iterate over all headers as (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Request body.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// Empty body.
    #[default]
    Empty,
    /// Bytes body.
    Bytes(Vec<u8>),
}

impl Body {
    /// Get body as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Get body as bytes, consuming it.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Empty => Vec::new(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Check if body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// A plain HTTP request carrying the optional decoded form trees.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: String,
    path: String,
    headers: Headers,
    body: Body,
    parsed_body: Option<ValueMap<String>>,
    uploaded_files: Option<ValueMap<UploadedFile>>,
}

impl Request {
    /// Create a new request.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Get the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get mutable headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Set a header, builder style.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the body, builder style.
    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Get the body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The decoded field tree, if one has been attached.
    #[must_use]
    pub fn parsed_body(&self) -> Option<&ValueMap<String>> {
        self.parsed_body.as_ref()
    }

    /// The decoded file tree, if one has been attached.
    #[must_use]
    pub fn uploaded_files(&self) -> Option<&ValueMap<UploadedFile>> {
        self.uploaded_files.as_ref()
    }
}

impl ServerRequest for Request {
    fn body(&self) -> &[u8] {
        self.body.as_bytes()
    }

    fn header_line(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    fn with_parsed_body(mut self, fields: ValueMap<String>) -> Self {
        self.parsed_body = Some(fields);
        self
    }

    fn with_uploaded_files(mut self, files: ValueMap<UploadedFile>) -> Self {
        self.uploaded_files = Some(files);
        self
    }
}
