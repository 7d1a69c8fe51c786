//! Per-attempt timeout configuration.
//!
//! Timing is threaded explicitly through every probe call; the engine keeps
//! no hidden defaults.

use std::time::Duration;
use thiserror::Error;

/// Connection timeouts for a probe run.
///
/// The banner read runs under a stricter deadline than the connect attempt;
/// the banner timeout never exceeds the connect timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    connect_timeout: Duration,
    banner_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("timeout must be greater than zero")]
    NonPositive,
}

impl Timing {
    /// Default connect timeout.
    pub const DEFAULT_CONNECT: Duration = Duration::from_secs(2);
    /// Default banner-read timeout.
    pub const DEFAULT_BANNER: Duration = Duration::from_secs(1);

    /// Build a timing config from a connect timeout.
    pub fn new(connect_timeout: Duration) -> Result<Self, TimingError> {
        if connect_timeout.is_zero() {
            return Err(TimingError::NonPositive);
        }
        Ok(Self {
            connect_timeout,
            banner_timeout: Self::DEFAULT_BANNER.min(connect_timeout),
        })
    }

    /// Build a timing config from fractional seconds, as taken on the CLI.
    pub fn from_secs(secs: f64) -> Result<Self, TimingError> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(TimingError::NonPositive);
        }
        Self::new(Duration::from_secs_f64(secs))
    }

    /// Override the banner timeout. Values above the connect timeout are
    /// clamped down to it.
    pub fn with_banner_timeout(mut self, banner_timeout: Duration) -> Result<Self, TimingError> {
        if banner_timeout.is_zero() {
            return Err(TimingError::NonPositive);
        }
        self.banner_timeout = banner_timeout.min(self.connect_timeout);
        Ok(self)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn banner_timeout(&self) -> Duration {
        self.banner_timeout
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            connect_timeout: Self::DEFAULT_CONNECT,
            banner_timeout: Self::DEFAULT_BANNER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert!(Timing::from_secs(0.0).is_err());
        assert!(Timing::from_secs(-1.0).is_err());
        assert!(Timing::from_secs(f64::NAN).is_err());
        assert!(Timing::new(Duration::ZERO).is_err());
    }

    #[test]
    fn test_banner_timeout_never_exceeds_connect() {
        let timing = Timing::from_secs(0.5).unwrap();
        assert_eq!(timing.connect_timeout(), Duration::from_millis(500));
        assert_eq!(timing.banner_timeout(), Duration::from_millis(500));

        let timing = Timing::from_secs(3.0).unwrap();
        assert_eq!(timing.banner_timeout(), Timing::DEFAULT_BANNER);

        let timing = timing.with_banner_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(timing.banner_timeout(), Duration::from_secs(3));
    }
}
