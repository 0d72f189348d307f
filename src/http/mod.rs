//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, route precedence)
//!     → request.rs (request ID)
//!     → websocket.rs (/ws upgrades)  |  relay core (everything else)
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod websocket;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
