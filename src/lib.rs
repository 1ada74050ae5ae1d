//! Football match tracker library.
//!
//! HTTP service that stores football matches and their live counters
//! (goals, yellow cards, red cards, extra time) in PostgreSQL or in memory.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod resilience;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
