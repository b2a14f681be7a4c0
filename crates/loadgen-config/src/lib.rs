// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

//! Flag and environment configuration for the APM load generator.
//!
//! This crate turns command-line flags and environment variables into one
//! validated, immutable [`Config`] value, resolved once at startup before
//! anything else runs. Precedence, highest first: explicit flag value,
//! environment variable, built-in default.
//!
//! ```no_run
//! use clap::Parser;
//! use loadgen_config::{Args, Config};
//!
//! let args = Args::parse();
//! let config = Config::resolve(args).unwrap_or_else(|err| {
//!     eprintln!("{err}");
//!     std::process::exit(1);
//! });
//! println!("sending {} to {}", config.event_rate, config.server_url);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod headers;
pub mod rate;

pub use cli::{rewrite_flag_name, Args, RewriteToggles, DEFAULT_SERVER_URL, REWRITABLE_FIELDS};
pub use config::Config;
pub use error::{ConfigError, RateError};
pub use rate::RateSpec;
