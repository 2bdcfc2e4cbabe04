//! Transformation engine boundary.
//!
//! The engine is the external collaborator that decodes, resizes/re-encodes
//! and finalizes the HTTP response. This crate supplies it only a
//! configuration and a fetch capability; everything after the fetch is the
//! engine's business.

use std::path::PathBuf;

use async_trait::async_trait;
use http::HeaderMap;
use thiserror::Error;

use crate::config::ImageConfig;
use crate::optimizer::sink::ResponseSink;
use crate::source::context::TargetUrl;
use crate::source::error::SourceError;

/// Configuration handed to the engine for one request.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory for any temporary artifacts the engine needs.
    pub scratch_dir: PathBuf,
    /// Image handling configuration, loader mode fixed to default by the
    /// adapter.
    pub image: ImageConfig,
}

/// Errors surfaced from an optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The fetch callback failed; the engine aborts the run.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Engine-side failure (decode, resize, encode). Opaque to this crate.
    #[error("image optimization failed: {0}")]
    Engine(String),
}

/// The engine's one I/O dependency: populate `sink` with the source image
/// for `target`.
///
/// Called exactly once per request with the inbound request's headers. On
/// success the implementation has written status, headers and body onto
/// `sink` and ended it; on failure it returns `Err` without partial writes,
/// which the engine treats as "fetch failed, abort optimization".
#[async_trait]
pub trait SourceFetch: Send + Sync {
    async fn fetch(
        &self,
        headers: &HeaderMap,
        sink: &mut ResponseSink,
        target: Option<&TargetUrl>,
    ) -> Result<(), SourceError>;
}

/// External transformation engine.
///
/// `Output` is whatever the engine produces for its host; the adapter
/// returns it untouched.
#[async_trait]
pub trait TransformEngine: Send + Sync {
    type Output: Send;

    /// Run one optimization: obtain source bytes through `fetch`, transform
    /// them, and finalize `response`.
    async fn optimize(
        &self,
        headers: &HeaderMap,
        response: &mut ResponseSink,
        target: &TargetUrl,
        config: &EngineConfig,
        fetch: &dyn SourceFetch,
    ) -> Result<Self::Output, OptimizeError>;
}
