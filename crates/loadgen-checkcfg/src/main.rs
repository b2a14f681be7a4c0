// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! The startup configuration gate, runnable on its own.
//!
//! Resolves the load generator configuration exactly the way an embedding
//! tool would at startup and prints the effective settings as JSON, with
//! credentials redacted. Any invalid flag or environment value exits with a
//! non-zero status and a message naming the offending input.

use std::env;
use std::process;

use clap::Parser;
use loadgen_config::{Args, Config};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Invalid flag syntax (rate, headers, TLS boolean) exits here, with
    // clap naming the flag and the rejected value.
    let args = Args::parse();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(log_level).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("logging subsystem enabled");

    let config = match Config::resolve(args) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err}");
            process::exit(1);
        }
    };

    info!(
        server = %config.server_url,
        event_rate = %config.event_rate,
        "configuration is valid"
    );

    match serde_json::to_string_pretty(&config) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => {
            error!("could not render effective configuration: {err}");
            process::exit(1);
        }
    }
}
