//! Match storage subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Arc<dyn MatchStore> (injected through router state)
//!     → memory.rs   (ordered Vec behind a RwLock)
//!     → postgres.rs (sqlx pool, one statement per operation)
//! ```
//!
//! # Design Decisions
//! - Both backends implement one trait; handlers never know which one they use
//! - Counter and extra-time increments are atomic in both backends
//! - "Not found" is a value (`None` / `false`), not an error

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use traits::{MatchStore, StoreError, StoreKind, StoreResult};
