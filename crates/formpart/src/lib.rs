//! A `multipart/form-data` request-body decoder with nested form trees.
//!
//! formpart decodes a raw multipart body into two parallel trees: form
//! fields (string leaves) and uploaded files ([`UploadedFile`] leaves).
//! Bracket-notation field names build nested structure the way classic
//! form decoders do:
//!
//! - `name` — plain key, repeated occurrences overwrite
//! - `name[]` — appends to a sequence
//! - `name[key]` — sets a named child, nesting arbitrarily deep
//!
//! # Quick Start
//!
//! ```
//! use formpart::prelude::*;
//!
//! let body = concat!(
//!     "--b----1234\r\n",
//!     "Content-Disposition: form-data; name=\"tags[]\"\r\n",
//!     "\r\n",
//!     "rust\r\n",
//!     "--b----1234\r\n",
//!     "Content-Disposition: form-data; name=\"tags[]\"\r\n",
//!     "\r\n",
//!     "http\r\n",
//!     "--b----1234--\r\n",
//! );
//!
//! let parser = Parser::new_in_memory(
//!     body.as_bytes(),
//!     "multipart/form-data; boundary=b----1234",
//! ).unwrap();
//!
//! let tags = parser.fields().get("tags").and_then(Value::as_seq).unwrap();
//! assert_eq!(tags[0].as_str(), Some("rust"));
//! assert_eq!(tags[1].as_str(), Some("http"));
//! ```
//!
//! Requests can be decoded and decorated in one motion via the
//! [`ServerRequest`] seam:
//!
//! ```
//! use formpart::prelude::*;
//! use formpart::{Body, MemoryStreamProvider, MemoryUploadedFileProvider, Request};
//!
//! let request = Request::new("PUT", "/upload")
//!     .with_header("Content-Type", "multipart/form-data; boundary=b")
//!     .with_body(Body::Bytes(
//!         concat!(
//!             "--b\r\n",
//!             "Content-Disposition: form-data; name=\"bar\"\r\n",
//!             "\r\n",
//!             "baz\r\n",
//!             "--b--\r\n",
//!         )
//!         .into(),
//!     ));
//!
//! let parser = Parser::from_request(
//!     &request,
//!     &MemoryUploadedFileProvider,
//!     &MemoryStreamProvider,
//! ).unwrap();
//! let request = parser.decorate_request(request);
//!
//! let bar = request.parsed_body().and_then(|t| t.get("bar")).and_then(Value::as_str);
//! assert_eq!(bar, Some("baz"));
//! ```
//!
//! # Crate Structure
//!
//! - [`formpart_core`] — trees, uploaded-file handles, errors, the
//!   [`ServerRequest`] seam
//! - [`formpart_http`] — Content-Type resolution, header-line parsing,
//!   part splitting, the [`Parser`] facade

#![forbid(unsafe_code)]

// Re-export crates
pub use formpart_core as core;
pub use formpart_http as http;

// Re-export commonly used types
pub use formpart_core::{
    Body, Headers, MemoryStreamProvider, MemoryUploadedFileProvider, ParseError, Request,
    ServerRequest, Stream, StreamProvider, UploadStatus, UploadedFile, UploadedFileProvider,
    Value, ValueMap, assemble, percent_decode, percent_encode,
};
pub use formpart_http::{CONTENT_TYPE_MULTIPART, HeaderLine, Parser, resolve_boundary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ParseError, Parser, ServerRequest, UploadStatus, UploadedFile, Value, ValueMap,
    };
    pub use serde::Serialize;
}
