//! Quadratic backoff for startup retries.

use std::time::Duration;

/// Delay to wait before attempt `attempt` (0-based): `attempt² × base`.
///
/// With a one-second base the schedule is 0s, 1s, 4s, 9s, 16s, ...
pub fn quadratic_backoff(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(attempt.saturating_mul(attempt))
}
