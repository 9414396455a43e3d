//! Wire-level `multipart/form-data` parsing for formpart.
//!
//! This crate contains everything that touches raw bytes and header text:
//! - [`resolve_boundary`] — Content-Type validation and boundary extraction
//! - [`HeaderLine`] — part header line parsing with parameter maps
//! - [`split_parts`] — boundary-delimiter segmentation of a raw body
//! - [`Parser`] — the facade tying it all together into the nested field
//!   and file trees from `formpart-core`
//!
//! # Design Principles
//!
//! - Literal scanning over `memchr`, no regular expressions
//! - One pass, borrowed part slices: the body is never copied until a file
//!   part's bytes move into its stream
//! - Lenient part handling, strict boundary/header handling

#![deny(unsafe_code)]

mod content_type;
mod header;
mod multipart;

pub use content_type::{CONTENT_TYPE_MULTIPART, resolve_boundary};
pub use header::HeaderLine;
pub use multipart::{Parser, split_parts};
