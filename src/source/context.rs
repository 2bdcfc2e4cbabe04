//! Per-request context types.
//!
//! # Design Decisions
//! - Store vs. origin mode is a tagged variant decided once at context
//!   construction, not a presence check repeated at call sites
//! - The context is immutable after construction and request-scoped

use std::sync::Arc;

use http::HeaderMap;

use crate::source::store::ObjectStore;

/// The path+query portion of the requested image, already separated from
/// scheme and host by the caller (e.g. `/img/cat.png` or `/a.jpg?w=200`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    pub fn new(path_and_query: impl Into<String>) -> Self {
        Self(path_and_query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the object store key: the full path+query with a single
    /// leading `/` stripped. Store keys must not begin with the separator.
    pub fn store_key(&self) -> &str {
        self.0.strip_prefix('/').unwrap_or(&self.0)
    }
}

impl std::fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TargetUrl {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capability pair granting access to one container of an object store.
///
/// Supplied by the caller per request; the underlying client handle is
/// shared read-only across concurrent requests and never mutated here.
#[derive(Clone)]
pub struct StoreBinding {
    pub store: Arc<dyn ObjectStore>,
    pub bucket: String,
}

impl std::fmt::Debug for StoreBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBinding")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Where the image bytes come from. Exactly one mode is active per request.
#[derive(Debug, Clone)]
pub enum Source {
    /// Look the object up by key in the bound container.
    Store(StoreBinding),
    /// GET from an upstream origin; base is the explicit override when
    /// present, else derived from the referer header.
    Origin { base_override: Option<String> },
}

impl Source {
    /// Select the mode from the caller-supplied capabilities: a present
    /// store binding always wins over origin fetch.
    pub fn select(store: Option<StoreBinding>, base_override: Option<String>) -> Self {
        match store {
            Some(binding) => Source::Store(binding),
            None => Source::Origin { base_override },
        }
    }
}

/// Immutable per-request value: inbound headers (notably `referer`), the
/// parsed target, and the selected source mode.
#[derive(Debug, Clone)]
pub struct RequestContext {
    headers: HeaderMap,
    target: Option<TargetUrl>,
    source: Source,
}

impl RequestContext {
    pub fn new(headers: HeaderMap, target: Option<TargetUrl>, source: Source) -> Self {
        Self {
            headers,
            target,
            source,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn target(&self) -> Option<&TargetUrl> {
        self.target.as_ref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }
}
