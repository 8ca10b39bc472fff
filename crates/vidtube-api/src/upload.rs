// Multipart file parts with upload progress reporting
//
// File-bearing requests (avatar, cover image, video, thumbnail) are sent
// as multipart. When a progress callback is attached, the file bytes are
// streamed in fixed-size chunks and the callback sees the running total.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use reqwest::multipart::Part;

use crate::error::Error;

const CHUNK_SIZE: usize = 64 * 1024;

/// An in-memory file ready to be attached to a multipart form.
#[derive(Clone)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_owned();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn len(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Bytes handed to the transport so far, out of the total upload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent: u64,
    pub total: u64,
}

impl UploadProgress {
    /// Completed fraction in `0.0..=1.0`. An empty upload counts as complete.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.sent as f64 / self.total as f64).min(1.0)
    }

    /// Completed percentage, rounded to the nearest integer.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let rounded = (self.sent.saturating_mul(100) + self.total / 2) / self.total;
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }
}

/// Progress callback, invoked from the transport as chunks are consumed.
pub type ProgressFn = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Shared counter across every file part of one request.
pub(crate) struct ProgressTracker {
    sent: AtomicU64,
    total: u64,
    callback: ProgressFn,
}

impl ProgressTracker {
    pub(crate) fn new(total: u64, callback: ProgressFn) -> Arc<Self> {
        Arc::new(Self {
            sent: AtomicU64::new(0),
            total,
            callback,
        })
    }

    fn advance(&self, len: usize) {
        let len = u64::try_from(len).unwrap_or(u64::MAX);
        let sent = self.sent.fetch_add(len, Ordering::Relaxed).saturating_add(len);
        (self.callback)(UploadProgress {
            sent,
            total: self.total,
        });
    }
}

/// Build a multipart part for a file, optionally reporting progress.
pub(crate) fn file_part(
    file: &FilePart,
    tracker: Option<&Arc<ProgressTracker>>,
) -> Result<Part, Error> {
    let body = match tracker {
        None => reqwest::Body::from(file.bytes.clone()),
        Some(tracker) => {
            let tracker = Arc::clone(tracker);
            let bytes = file.bytes.clone();
            let chunks: Vec<Bytes> = (0..bytes.len())
                .step_by(CHUNK_SIZE)
                .map(|start| bytes.slice(start..(start + CHUNK_SIZE).min(bytes.len())))
                .collect();
            let stream = futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
                tracker.advance(chunk.len());
                Ok::<_, std::io::Error>(chunk)
            }));
            reqwest::Body::wrap_stream(stream)
        }
    };

    Part::stream_with_length(body, file.len())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|e| Error::Upload(format!("invalid MIME type '{}': {e}", file.mime)))
}
