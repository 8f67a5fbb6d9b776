//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (linear scan in registration order)
//!     → matcher.rs (anchored pattern match, capture extraction)
//!     → Return: Dispatch(handler, params) | MethodNotAllowed(methods) | NotFound
//!
//! Route Registration (at startup):
//!     (method, pattern, handler) triples
//!     → Compile pattern as ^(?:pattern)$
//!     → Append to table
//!     → Freeze behind Arc
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime (shared without locks)
//! - First registered route whose path and method both match wins
//! - Parameters are positional strings; validation belongs to handlers
//! - Generic over the handler type so the table carries no transport types

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::{PathParams, Resolution, Route, RouteError, Router};
