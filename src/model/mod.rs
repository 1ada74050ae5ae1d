//! Match domain model.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → MatchPayload (all fields optional, nothing trusted)
//!     → MatchPayload::validate
//!     → NewMatch (teams non-empty, date parsed)
//!     → store
//!     → Match (id + counters assigned by the store)
//! ```
//!
//! # Design Decisions
//! - Validation finishes before any store call; invalid input never reaches storage
//! - Dates are calendar dates, rendered `YYYY-MM-DD` everywhere
//! - Counters are never set directly, only through `Counter` increments

pub mod matches;

pub use matches::{
    extra_time_message, parse_match_date, Counter, InputError, Match, MatchId, MatchPayload,
    NewMatch, EXTRA_TIME_CAP,
};
