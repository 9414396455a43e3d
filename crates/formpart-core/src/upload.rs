//! Uploaded-file handles and the capability seams that build them.
//!
//! The decoder never constructs streams or uploaded files directly; it asks
//! a [`StreamProvider`] for a readable stream over a part body and an
//! [`UploadedFileProvider`] for the finished handle. The in-memory defaults
//! ([`MemoryStreamProvider`], [`MemoryUploadedFileProvider`]) are what most
//! callers want; the traits exist so hosts can observe or customize handle
//! construction.

use std::io::Read;

/// Upload status marker attached to each handle.
///
/// The in-memory decoder only ever produces [`UploadStatus::Ok`]; partial or
/// failed uploads are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// The upload completed.
    Ok,
}

/// A readable, cursor-based stream over an owned byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    data: Vec<u8>,
    cursor: usize,
}

impl Stream {
    /// Wrap a byte buffer.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Total length in bytes, independent of the read cursor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the stream holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The full contents, independent of the read cursor.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the stream, returning its contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = &self.data[self.cursor.min(self.data.len())..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.cursor += n;
        Ok(n)
    }
}

/// An uploaded file: content stream plus the metadata declared by the part.
///
/// Fully populated at construction and never mutated afterwards; ownership
/// transfers into the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    stream: Stream,
    size: usize,
    status: UploadStatus,
    filename: String,
    media_type: String,
}

impl UploadedFile {
    /// Build a handle from its parts.
    #[must_use]
    pub fn new(
        stream: Stream,
        size: usize,
        status: UploadStatus,
        filename: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            stream,
            size,
            status,
            filename: filename.into(),
            media_type: media_type.into(),
        }
    }

    /// The content stream.
    #[must_use]
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Consume the handle, returning the content stream.
    #[must_use]
    pub fn into_stream(self) -> Stream {
        self.stream
    }

    /// Declared body length in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Upload status marker.
    #[must_use]
    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Filename declared by the part's Content-Disposition.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Media type declared by the part's Content-Type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// Capability: turn a raw byte buffer into a readable stream.
pub trait StreamProvider {
    /// Build a stream over `bytes`.
    fn create_stream(&self, bytes: Vec<u8>) -> Stream;
}

/// Capability: build an uploaded-file handle from its parts.
pub trait UploadedFileProvider {
    /// Build a handle; called once per file part with a fully read body.
    fn create_uploaded_file(
        &self,
        stream: Stream,
        size: usize,
        status: UploadStatus,
        filename: &str,
        media_type: &str,
    ) -> UploadedFile;
}

/// Default in-memory [`StreamProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStreamProvider;

impl StreamProvider for MemoryStreamProvider {
    fn create_stream(&self, bytes: Vec<u8>) -> Stream {
        Stream::new(bytes)
    }
}

/// Default in-memory [`UploadedFileProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUploadedFileProvider;

impl UploadedFileProvider for MemoryUploadedFileProvider {
    fn create_uploaded_file(
        &self,
        stream: Stream,
        size: usize,
        status: UploadStatus,
        filename: &str,
        media_type: &str,
    ) -> UploadedFile {
        UploadedFile::new(stream, size, status, filename, media_type)
    }
}
