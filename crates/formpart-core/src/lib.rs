//! Core types for the formpart `multipart/form-data` decoder.
//!
//! This crate provides the fundamental building blocks:
//! - [`Value`] / [`ValueMap`] — the nested tree shared by field and file
//!   results, plus the bracket-notation [`assemble`] step
//! - [`UploadedFile`], [`Stream`] and the [`StreamProvider`] /
//!   [`UploadedFileProvider`] capability seams
//! - [`ParseError`] — the single typed failure of the decoder
//! - [`ServerRequest`] — the request abstraction used for decoration
//!
//! The wire-level parsing lives in `formpart-http`.
//!
//! # Design Principles
//!
//! - Purely synchronous: one in-memory transformation, no I/O suspension
//! - Lenient where form decoders are lenient: unprocessable parts are
//!   skipped, never errors
//! - Hard failures only at the boundary/header level, via [`ParseError`]

#![forbid(unsafe_code)]

mod encoding;
pub mod error;
mod nested;
mod request;
mod upload;

pub use encoding::{percent_decode, percent_encode};
pub use error::ParseError;
pub use nested::{Value, ValueMap, assemble};
pub use request::{Body, Headers, Request, ServerRequest};
pub use upload::{
    MemoryStreamProvider, MemoryUploadedFileProvider, Stream, StreamProvider, UploadStatus,
    UploadedFile, UploadedFileProvider,
};
