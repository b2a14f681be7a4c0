// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

//! The resolved, process-wide configuration value.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::cli::{Args, RewriteToggles, DEFAULT_SERVER_URL};
use crate::error::ConfigError;
use crate::rate::RateSpec;

/// Resolved process-wide configuration.
///
/// Built exactly once at startup, before any worker reads it, and never
/// mutated afterwards. The value is `Send + Sync`, so handing a reference
/// (or a clone) to concurrent senders needs no further synchronization:
/// construction in `main` happens-before every spawn.
///
/// Serializing produces the effective-configuration dump with credential
/// fields redacted.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// APM Server ingestion endpoint.
    pub server_url: Url,
    /// Secret token, empty when unset. Semantically exclusive with
    /// `api_key` even though both may be supplied.
    #[serde(serialize_with = "redacted")]
    pub secret_token: String,
    /// API key, empty when unset.
    #[serde(serialize_with = "redacted")]
    pub api_key: String,
    /// Validate the remote server TLS certificates.
    pub secure: bool,
    /// Event emission rate.
    pub event_rate: RateSpec,
    /// Keep sending when the server answers with an HTTP error.
    pub ignore_errors: bool,
    /// Rewrite event IDs every iteration.
    pub rewrite_ids: bool,
    /// Rewrite event timestamps every iteration.
    pub rewrite_timestamps: bool,
    /// Per-field rewrite toggles.
    pub rewrites: RewriteToggles,
    /// Extra request headers. `None` when no `--header` flag was ever
    /// given, as opposed to an empty map.
    pub headers: Option<HashMap<String, String>>,
}

impl Config {
    /// Resolves parsed flags into the final configuration.
    ///
    /// Flag-level syntax (rate, headers, TLS boolean) has already been
    /// validated by the flag parser; this step validates the server URL and
    /// folds repeated headers into a map, last occurrence winning. Errors
    /// here are startup-fatal for the binary; library callers decide.
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        // An exported-but-empty ELASTIC_APM_SERVER_URL counts as unset.
        let server = if args.server.is_empty() {
            DEFAULT_SERVER_URL
        } else {
            args.server.as_str()
        };
        let server_url = Url::parse(server).map_err(|source| ConfigError::InvalidUrl {
            input: server.to_string(),
            source,
        })?;

        let headers = if args.headers.is_empty() {
            None
        } else {
            Some(args.headers.into_iter().collect::<HashMap<_, _>>())
        };

        let config = Config {
            server_url,
            secret_token: args.secret_token,
            api_key: args.api_key,
            secure: args.secure,
            event_rate: args.event_rate,
            ignore_errors: args.ignore_errors,
            rewrite_ids: args.rewrite_ids,
            rewrite_timestamps: args.rewrite_timestamps,
            rewrites: args.rewrites,
            headers,
        };
        debug!(
            server = %config.server_url,
            event_rate = %config.event_rate,
            "configuration resolved"
        );
        Ok(config)
    }
}

fn redacted<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            server: DEFAULT_SERVER_URL.to_string(),
            secret_token: String::new(),
            api_key: String::new(),
            secure: false,
            event_rate: RateSpec::default(),
            headers: Vec::new(),
            ignore_errors: false,
            rewrite_ids: false,
            rewrite_timestamps: false,
            rewrites: RewriteToggles::default(),
        }
    }

    #[test]
    fn test_resolve_default_server() {
        let config = Config::resolve(base_args()).unwrap();
        assert_eq!(config.server_url.as_str(), "http://127.0.0.1:8200/");
    }

    #[test]
    fn test_resolve_empty_server_falls_back_to_default() {
        let mut args = base_args();
        args.server = String::new();
        let config = Config::resolve(args).unwrap();
        assert_eq!(config.server_url.as_str(), "http://127.0.0.1:8200/");
    }

    #[test]
    fn test_resolve_rejects_malformed_url() {
        let mut args = base_args();
        args.server = "not a url".to_string();
        let err = Config::resolve(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_resolve_no_headers_is_absent_not_empty() {
        let config = Config::resolve(base_args()).unwrap();
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_resolve_headers_last_occurrence_wins() {
        let mut args = base_args();
        args.headers = vec![
            ("X-Key".to_string(), "value1".to_string()),
            ("X-Other".to_string(), "o".to_string()),
            ("X-Key".to_string(), "value2".to_string()),
        ];
        let config = Config::resolve(args).unwrap();
        let headers = config.headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["X-Key"], "value2");
        assert_eq!(headers["X-Other"], "o");
    }

    #[test]
    fn test_effective_dump_redacts_credentials() {
        let mut args = base_args();
        args.secret_token = "s3cret".to_string();
        let config = Config::resolve(args).unwrap();
        let dump = serde_json::to_value(&config).unwrap();
        assert_eq!(dump["secret_token"], "********");
        assert_eq!(dump["api_key"], "");
        assert!(!serde_json::to_string(&config).unwrap().contains("s3cret"));
    }

    #[test]
    fn test_effective_dump_shape() {
        let config = Config::resolve(base_args()).unwrap();
        let dump = serde_json::to_value(&config).unwrap();
        assert_eq!(dump["server_url"], "http://127.0.0.1:8200/");
        assert_eq!(dump["event_rate"], "0/1s");
        assert_eq!(dump["rewrites"]["span.name"], false);
        assert_eq!(dump["headers"], serde_json::Value::Null);
    }
}
