//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → admin gate (Basic auth for /admin paths)
//!     → server.rs dispatch (routing::Router resolve)
//!     → request.rs (buffered body + path params → RouteRequest)
//!     → customers / admin handlers (store operations)
//!     → response.rs (JSON body, Location, Allow)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RouteRequest, X_REQUEST_ID};
pub use server::{AppState, Handler, HttpServer};
