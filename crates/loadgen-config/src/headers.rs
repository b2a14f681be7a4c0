// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

//! `key=value` header flag parsing.

use crate::error::ConfigError;

/// Parses one `--header` occurrence of the form `key=value`.
///
/// Only the first `=` separates, so values may themselves contain `=`.
/// Folding repeated occurrences into a map happens during configuration
/// resolution, where the last occurrence of a key wins.
pub fn parse_header(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(ConfigError::InvalidHeaderFormat {
            input: s.to_string(),
        }),
    }
}
