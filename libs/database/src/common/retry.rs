use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default};

/// Backoff policy for startup connections
///
/// The database is frequently still booting when the service starts (compose, k8s),
/// so the first connection is retried with exponential backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts after the first failure
    pub max_retries: u32,

    pub initial_delay: Duration,

    /// Ceiling for a single backoff step
    pub max_delay: Duration,

    pub backoff_multiplier: f64,

    /// Randomize each delay to 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal delay before retry number `attempt` (1-based), capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let nominal_ms = self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let capped_ms = nominal_ms.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped_ms as u64)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Environment variables:
/// - `DB_CONNECT_RETRIES` (optional, default: 5)
/// - `DB_RETRY_INITIAL_DELAY_MS` (optional, default: 200)
/// - `DB_RETRY_MAX_DELAY_MS` (optional, default: 5000)
#[cfg(feature = "config")]
impl FromEnv for RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_retries = env_parse_or_default("DB_CONNECT_RETRIES", defaults.max_retries)?;
        let initial_delay_ms = env_parse_or_default(
            "DB_RETRY_INITIAL_DELAY_MS",
            defaults.initial_delay.as_millis() as u64,
        )?;
        let max_delay_ms =
            env_parse_or_default("DB_RETRY_MAX_DELAY_MS", defaults.max_delay.as_millis() as u64)?;

        Ok(Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            ..defaults
        })
    }
}

/// Retry an async operation with exponential backoff
///
/// # Example
/// ```ignore
/// use database::common::{retry_with_backoff, RetryConfig};
///
/// let db = retry_with_backoff(|| Database::connect(options.clone()), RetryConfig::new()).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "Operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!(attempts = attempt, error = %e, "Operation failed, giving up");
                    return Err(e);
                }

                let nominal = config.delay_for(attempt);
                let delay = if config.use_jitter {
                    apply_jitter(nominal)
                } else {
                    nominal
                };

                warn!(
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Scale `delay` to a pseudo-random 50-100% of itself
fn apply_jitter(delay: Duration) -> Duration {
    let factor = (RandomState::new().hash_one(SystemTime::now()) % 50) as f64 / 100.0 + 0.5;
    delay.mul_f64(factor)
}

/// Retry with [`RetryConfig::default`]
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
