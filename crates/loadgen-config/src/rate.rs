// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

//! Event rate specification in `burst/interval` notation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::RateError;

/// An event emission rate: `burst` events per `interval`.
///
/// Parsed from the compact `{burst}/{interval}` notation, for example
/// `200/5s`. The interval quantity may be omitted, so `100/s` and `100/1s`
/// describe the same rate. After parsing, `interval` is always strictly
/// positive; `burst` is deliberately unchecked, and a value of zero or less
/// is read as "unlimited" by the generators that consume the rate.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use loadgen_config::RateSpec;
///
/// let rate: RateSpec = "200/5s".parse().unwrap();
/// assert_eq!(rate.burst, 200);
/// assert_eq!(rate.interval, Duration::from_secs(5));
/// assert_eq!(rate.to_string(), "200/5s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSpec {
    pub burst: i64,
    pub interval: Duration,
}

impl RateSpec {
    /// Whether this rate places no bound on event emission.
    pub fn is_unlimited(&self) -> bool {
        self.burst <= 0
    }
}

impl Default for RateSpec {
    /// The `0/s` rate: no events per second, read as unlimited downstream.
    fn default() -> Self {
        Self {
            burst: 0,
            interval: Duration::from_secs(1),
        }
    }
}

impl FromStr for RateSpec {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (burst, interval) = match s.split_once('/') {
            Some((burst, interval)) if !burst.is_empty() && !interval.is_empty() => {
                (burst, interval)
            }
            _ => {
                return Err(RateError::InvalidFormat {
                    input: s.to_string(),
                })
            }
        };

        let burst: i64 = burst.parse().map_err(|source| RateError::InvalidBurst {
            burst: burst.to_string(),
            source,
        })?;

        // A leading sign would otherwise collide with the shorthand prefix
        // below and turn `-1s` into the nonsense string `1-1s`. Strip it,
        // parse the magnitude, and report non-positivity instead.
        let (negative, unsigned) = match interval.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, interval),
        };

        // Unit-only shorthand: `/s` means one second, `/ms` one millisecond.
        let mut magnitude = unsigned.to_string();
        if !magnitude.starts_with(|c: char| c.is_ascii_digit()) {
            magnitude.insert(0, '1');
        }

        let parsed = humantime::parse_duration(&magnitude).map_err(|source| {
            RateError::InvalidInterval {
                interval: magnitude.clone(),
                source,
            }
        })?;
        if negative || parsed.is_zero() {
            return Err(RateError::NonPositiveInterval {
                interval: interval.to_string(),
            });
        }

        Ok(Self {
            burst,
            interval: parsed,
        })
    }
}

impl fmt::Display for RateSpec {
    /// Renders `{burst}/{interval}`. Lossy with respect to shorthand input:
    /// parsing `10/s` and formatting yields `10/1s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.burst,
            humantime::format_duration(self.interval)
        )
    }
}

impl serde::Serialize for RateSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
