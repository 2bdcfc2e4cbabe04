//! Optimizer adapter subsystem.
//!
//! # Data Flow
//! ```text
//! OptimizerAdapter::optimize(headers, sink, options)
//!     → engine.rs  (EngineConfig: scratch dir + image config, loader=default)
//!     → TransformEngine::optimize(...)   (external collaborator)
//!         → SourceFetch::fetch(...)      (resolver-backed callback,
//!                                         writes into the ResponseSink)
//!     → engine output returned untouched
//! ```
//!
//! # Design Decisions
//! - The engine is an injected trait, not an inline closure, so tests can
//!   substitute a double
//! - The fetch callback mutates the sink and returns `Err` on failure; the
//!   engine treats that as "fetch failed, abort optimization"
//! - No state is retained across requests

pub mod adapter;
pub mod engine;
pub mod sink;

pub use adapter::{OptimizeOptions, OptimizerAdapter};
pub use engine::{EngineConfig, OptimizeError, SourceFetch, TransformEngine};
pub use sink::ResponseSink;
