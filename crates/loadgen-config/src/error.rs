// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

use std::num::ParseIntError;

/// Errors from parsing a `burst/interval` rate specification.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("invalid rate {input:?}, expected format burst/duration")]
    InvalidFormat { input: String },

    #[error("invalid burst {burst} in event rate: {source}")]
    InvalidBurst {
        burst: String,
        source: ParseIntError,
    },

    #[error("invalid interval {interval:?} in event rate: {source}")]
    InvalidInterval {
        interval: String,
        source: humantime::DurationError,
    },

    #[error("invalid interval {interval:?}, must be positive")]
    NonPositiveInterval { interval: String },
}

/// Errors from resolving flags into the final configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid header {input:?}: format must be key=value")]
    InvalidHeaderFormat { input: String },

    #[error("invalid server url {input:?}: {source}")]
    InvalidUrl {
        input: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Rate(#[from] RateError),
}
