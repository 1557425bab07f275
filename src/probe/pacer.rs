//! Rate expressions such as `10s`, `300m` or `5000h`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    #[error("invalid rate: {0:?}")]
    InvalidRate(String),
}

/// Fixed pacing derived from `<count><unit>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePacer {
    limit: u64,
    interval: Duration,
}

impl RatePacer {
    pub fn parse(expression: &str) -> Result<Self, RateError> {
        let invalid = || RateError::InvalidRate(expression.to_string());

        if expression.len() < 2 {
            return Err(invalid());
        }

        let split = expression.len() - 1;
        let interval = match expression.as_bytes()[split] {
            b's' => Duration::from_secs(1),
            b'm' => Duration::from_secs(60),
            b'h' => Duration::from_secs(3600),
            _ => return Err(invalid()),
        };

        // The unit byte is ASCII, so `split` is a char boundary.
        let limit: u64 = expression[..split].parse().map_err(|_| invalid())?;
        if limit == 0 {
            return Err(invalid());
        }

        Ok(Self { limit, interval })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Delay slept before every request. Truncates to whole nanoseconds.
    pub fn wait_time(&self) -> Duration {
        let nanos = self.interval.as_nanos() / u128::from(self.limit);
        Duration::from_nanos(nanos as u64)
    }
}

impl FromStr for RatePacer {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RatePacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.interval.as_secs() {
            1 => "s",
            60 => "m",
            _ => "h",
        };
        write!(f, "{}{}", self.limit, unit)
    }
}
