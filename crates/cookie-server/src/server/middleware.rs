//! Axum middleware layers applied to the router.
//!
//! Includes request tracing and timeout enforcement.

use std::time::Duration;

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
