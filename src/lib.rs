//! Edge HTTP relay for bandwidth-measurement traffic.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 SPEED RELAY                   │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌──────────────────────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│       dispatcher          │  │
//!                      │  │ server  │   │  /ws        → websocket   │  │
//!                      │  └─────────┘   │  /locations → passthrough │  │
//!                      │                │  /<N>[kmg]  → __down      │  │
//!                      │                └────────────┬─────────────┘  │
//!                      │                             │                │
//!   Client Response    │  ┌─────────┐   ┌───────────▼─────────────┐  │
//!   ◀──────────────────┼──│response │◀──│  relay (hyper client,    │◀─┼── speed-test
//!                      │  │ passthru│   │  scheme propagation)     │  │   upstream
//!                      │  └─────────┘   └─────────────────────────┘  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  config │ observability │ lifecycle │ net│ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The relay has one job: inspect the inbound path, rewrite it to a target on
//! the configured speed-test upstream with the client's own scheme, and pass
//! the response back untouched. A single `/ws` route upgrades to a WebSocket
//! that observes frames without ever answering.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod relay;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
