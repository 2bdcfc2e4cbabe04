//! Source resolution: mode dispatch and the resolved-source invariant.

use std::time::Duration;

use bytes::Bytes;
use http::StatusCode;

use crate::config::FetchConfig;
use crate::source::context::{RequestContext, Source, StoreBinding, TargetUrl};
use crate::source::error::{SourceError, SourceResult};
use crate::source::origin::{referer_origin, OriginClient};

/// Result of source resolution. Only ever produced on success: failures
/// carry no partial payload.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub body: Bytes,
}

/// Produces a [`ResolvedSource`] for a request, or fails explicitly.
///
/// Store mode and origin-fetch mode are mutually exclusive; the active mode
/// was decided when the [`RequestContext`] was constructed. A single failed
/// attempt is terminal: no retries, no falling through to the other mode.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    origin: OriginClient,
}

impl SourceResolver {
    pub fn new(fetch: &FetchConfig) -> Self {
        Self {
            origin: OriginClient::new(Duration::from_secs(fetch.timeout_secs)),
        }
    }

    /// Use a caller-supplied origin client.
    pub fn with_origin_client(origin: OriginClient) -> Self {
        Self { origin }
    }

    /// Resolve the source bytes for `ctx`.
    ///
    /// Fails with [`SourceError::MissingTarget`] before any I/O when the
    /// parsed target URL is absent.
    pub async fn resolve(&self, ctx: &RequestContext) -> SourceResult<ResolvedSource> {
        let target = ctx.target().ok_or(SourceError::MissingTarget)?;

        match ctx.source() {
            Source::Store(binding) => self.resolve_store(binding, target).await,
            Source::Origin { base_override } => {
                self.resolve_origin(ctx, base_override.as_deref(), target).await
            }
        }
    }

    async fn resolve_store(
        &self,
        binding: &StoreBinding,
        target: &TargetUrl,
    ) -> SourceResult<ResolvedSource> {
        let key = target.store_key();

        tracing::debug!(bucket = %binding.bucket, key = %key, "Resolving source from store");

        let object = binding
            .store
            .get(&binding.bucket, key)
            .await
            .map_err(|e| SourceError::Store(e.to_string()))?;

        match object {
            Some(object) if !object.body.is_empty() => Ok(ResolvedSource {
                status: StatusCode::OK,
                content_type: object.content_type,
                cache_control: object.cache_control,
                body: object.body,
            }),
            // A present key with an empty body is treated the same as a
            // missing key.
            _ => {
                tracing::warn!(bucket = %binding.bucket, key = %key, "Object missing or empty");
                Err(SourceError::SourceNotFound {
                    bucket: binding.bucket.clone(),
                    key: key.to_string(),
                })
            }
        }
    }

    async fn resolve_origin(
        &self,
        ctx: &RequestContext,
        base_override: Option<&str>,
        target: &TargetUrl,
    ) -> SourceResult<ResolvedSource> {
        // Explicit override takes precedence over the referer header. With
        // neither present the base stays empty and the fetch target is
        // scheme-less, which fails at the client; that emergent behavior is
        // kept rather than substituting a default host.
        let base = match base_override {
            Some(base) => base.to_string(),
            None => referer_origin(ctx.headers()).unwrap_or_default(),
        };

        let url = format!("{}{}", base, target.as_str());

        tracing::debug!(url = %url, "Resolving source from origin");

        self.origin.fetch(&url).await
    }
}
