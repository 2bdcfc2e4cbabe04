//! Image delivery shim: source resolution and optimizer wiring.
//!
//! Given an already-parsed image request this crate decides where the raw
//! bytes come from (object store lookup or upstream origin fetch), retrieves
//! them, and hands them to an external transformation engine through a
//! narrow fetch-callback contract. The engine owns decode/resize/encode and
//! the final client response; this crate owns everything up to that point.
//!
//! ```text
//! inbound request (headers + parsed target)
//!     → OptimizerAdapter (builds engine config, binds fetch capability)
//!     → TransformEngine (external; calls back exactly once per request)
//!     → SourceResolver (store mode | origin-fetch mode)
//!     → ResponseSink (status + Content-Type/Cache-Control + body)
//! ```

pub mod config;
pub mod optimizer;
pub mod source;

pub use config::{ImageConfig, OptimizerConfig};
pub use optimizer::{
    EngineConfig, OptimizeError, OptimizeOptions, OptimizerAdapter, ResponseSink, SourceFetch,
    TransformEngine,
};
pub use source::{
    ObjectStore, RequestContext, ResolvedSource, Source, SourceError, SourceResolver,
    StoreBinding, StoredObject, TargetUrl,
};
