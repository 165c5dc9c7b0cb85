//! Axum server, routing, and connection handling.
//!
//! # Responsibilities
//! - Bind the listener, plain or rustls-terminated.
//! - Define the Axum router with all routes and shared middleware.
//! - Hand every handler a per-request [`extract::Cookies`] jar.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;
