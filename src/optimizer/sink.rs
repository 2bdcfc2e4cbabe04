//! Intermediate response object consumed by the transformation engine.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// The response object the fetch callback populates for the engine: status
/// line, headers, buffered body, and an end latch.
///
/// The engine expects synchronous-looking population of this object before
/// it continues its own pipeline, so the callback writes here directly
/// instead of returning a value. Absent headers stay absent; nothing is
/// defaulted.
#[derive(Debug)]
pub struct ResponseSink {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
    ended: bool,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            ended: false,
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Append bytes to the buffered body. Writes after [`end`](Self::end)
    /// are discarded.
    pub fn write(&mut self, chunk: &[u8]) {
        if !self.ended {
            self.body.extend_from_slice(chunk);
        }
    }

    /// Mark the response complete. Further writes are discarded.
    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Consume the sink into its final parts.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body.freeze())
    }
}

impl Default for ResponseSink {
    fn default() -> Self {
        Self::new()
    }
}
