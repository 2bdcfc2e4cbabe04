//! Source resolution subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (target + headers + Source variant)
//!     → resolver.rs (mode dispatch)
//!     → store.rs   (object store lookup)    for Source::Store
//!     → origin.rs  (upstream HTTP GET)      for Source::Origin
//!     → ResolvedSource {status, content_type?, cache_control?, body}
//! ```
//!
//! # Design Decisions
//! - Store mode and origin mode are mutually exclusive, decided once at
//!   context construction; never combined or retried against each other
//! - A single failed attempt is terminal for the request (no retries)
//! - The full body is buffered before being handed onward; no streaming

pub mod context;
pub mod error;
pub mod origin;
pub mod resolver;
pub mod store;

pub use context::{RequestContext, Source, StoreBinding, TargetUrl};
pub use error::SourceError;
pub use origin::OriginClient;
pub use resolver::{ResolvedSource, SourceResolver};
pub use store::{ObjectStore, StoredObject};
