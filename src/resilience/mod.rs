//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Startup store connection:
//!     → retries.rs (bounded attempts, log each failure)
//!     → backoff.rs (k² × base delay before attempt k)
//! ```
//!
//! # Design Decisions
//! - Only startup retries; request-time store failures surface immediately as 500
//! - Request timeouts are enforced by the HTTP layer (tower-http)

pub mod backoff;
pub mod retries;

pub use retries::{retry, RetryError, RetryPolicy};
