//! Bridges one request/response pair into the transformation engine.

use async_trait::async_trait;
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};

use crate::config::{ImageConfig, LoaderMode, OptimizerConfig};
use crate::optimizer::engine::{EngineConfig, OptimizeError, SourceFetch, TransformEngine};
use crate::optimizer::sink::ResponseSink;
use crate::source::context::{RequestContext, Source, StoreBinding, TargetUrl};
use crate::source::error::SourceError;
use crate::source::resolver::SourceResolver;

/// Per-request options for one optimization run.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Explicit base origin; takes precedence over the referer header.
    pub base_origin: Option<String>,
    /// Parsed target URL (path + query) of the requested image.
    pub target: TargetUrl,
    /// Object store binding. When present, store mode is used and origin
    /// fetch is never attempted.
    pub store: Option<StoreBinding>,
}

impl OptimizeOptions {
    /// Options for origin-fetch mode.
    pub fn origin(target: impl Into<TargetUrl>, base_origin: Option<String>) -> Self {
        Self {
            base_origin,
            target: target.into(),
            store: None,
        }
    }

    /// Options for store mode. A present binding always wins over origin
    /// fetch.
    pub fn store(target: impl Into<TargetUrl>, binding: StoreBinding) -> Self {
        Self {
            base_origin: None,
            target: target.into(),
            store: Some(binding),
        }
    }
}

/// Wires the source resolver into an engine as the engine's only byte-fetch
/// capability, and owns request/response marshaling around it.
pub struct OptimizerAdapter<E> {
    config: OptimizerConfig,
    resolver: SourceResolver,
    engine: E,
}

impl<E: TransformEngine> OptimizerAdapter<E> {
    pub fn new(config: OptimizerConfig, engine: E) -> Self {
        let resolver = SourceResolver::new(&config.fetch);
        Self {
            config,
            resolver,
            engine,
        }
    }

    /// Use a caller-supplied resolver (shared connection pool).
    pub fn with_resolver(config: OptimizerConfig, resolver: SourceResolver, engine: E) -> Self {
        Self {
            config,
            resolver,
            engine,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run one optimization: build the engine configuration, bind the
    /// resolver as the fetch capability, and delegate. The engine's output
    /// is returned untouched.
    pub async fn optimize(
        &self,
        headers: &HeaderMap,
        response: &mut ResponseSink,
        options: OptimizeOptions,
    ) -> Result<E::Output, OptimizeError> {
        let engine_config = EngineConfig {
            scratch_dir: self.config.scratch_dir.clone(),
            image: ImageConfig {
                // No external loader delegation regardless of config input.
                loader: LoaderMode::Default,
                ..self.config.image.clone()
            },
        };

        let fetch = ResolverFetch {
            resolver: &self.resolver,
            source: Source::select(options.store, options.base_origin),
        };

        tracing::debug!(path = %options.target, "Dispatching to transformation engine");

        self.engine
            .optimize(headers, response, &options.target, &engine_config, &fetch)
            .await
    }
}

/// Adapts [`SourceResolver::resolve`] to the engine's callback shape:
/// status, headers and body are written onto the sink, and failures are
/// returned for the engine to abort on.
struct ResolverFetch<'a> {
    resolver: &'a SourceResolver,
    source: Source,
}

#[async_trait]
impl<'a> SourceFetch for ResolverFetch<'a> {
    async fn fetch(
        &self,
        headers: &HeaderMap,
        sink: &mut ResponseSink,
        target: Option<&TargetUrl>,
    ) -> Result<(), SourceError> {
        let ctx = RequestContext::new(headers.clone(), target.cloned(), self.source.clone());
        let resolved = self.resolver.resolve(&ctx).await?;

        sink.set_status(resolved.status);
        if let Some(content_type) = &resolved.content_type {
            sink.insert_header(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        }
        if let Some(cache_control) = &resolved.cache_control {
            sink.insert_header(CACHE_CONTROL, HeaderValue::from_str(cache_control)?);
        }
        sink.write(&resolved.body);
        sink.end();

        Ok(())
    }
}
