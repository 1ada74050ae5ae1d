//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → cors.rs (pre-flight answered here, headers on every response)
//!     → request.rs (assign and echo x-request-id)
//!     → response.rs (JSON bodies for layer-generated 408/413)
//!     → server.rs (limits, timeout, metrics, api routes)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
