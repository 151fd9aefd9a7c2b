//! Re-attempting repository clones that fail for transient reasons.

use std::fmt::Display;
use std::time::Duration;

use tracing::warn;

use crate::config::RetrySettings;

/// Errors that know whether trying again could help.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Run `attempt` (numbered from 1) until it succeeds, fails permanently, or
/// `settings.max_attempts` is used up. At least one attempt is always made.
pub fn with_retries<T, E, F>(settings: &RetrySettings, location: &str, mut attempt: F) -> Result<T, E>
where
    E: Transient + Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = settings.max_attempts.max(1);
    let mut number = 1;
    loop {
        match attempt(number) {
            Ok(value) => return Ok(value),
            Err(err) if number < max_attempts && err.is_transient() => {
                let pause = pause_after(settings, number);
                warn!(
                    repository = location,
                    attempt = number,
                    max_attempts,
                    pause_ms = pause.as_millis() as u64,
                    error = %err,
                    "Clone failed; trying again"
                );
                std::thread::sleep(pause);
                number += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Pause after failed attempt `number`: the base delay doubled per earlier
/// failure, never above the configured maximum.
fn pause_after(settings: &RetrySettings, number: u32) -> Duration {
    let cap = Duration::from_millis(settings.max_delay_ms);
    let doublings = number.saturating_sub(1).min(31);
    Duration::from_millis(settings.base_delay_ms)
        .saturating_mul(1 << doublings)
        .min(cap)
}
