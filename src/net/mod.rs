//! Network layer subsystem.
//!
//! The accept loop itself belongs to axum; this module only owns the TLS
//! material for listeners that terminate secure transport. Whether TLS is
//! configured here also decides the scheme propagated to the upstream.

pub mod tls;
