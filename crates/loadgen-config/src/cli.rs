// Copyright 2025-Present the apm-loadgen authors
// SPDX-License-Identifier: Apache-2.0

//! The command-line flag surface.
//!
//! Flags carrying an `env` attribute fall back to that environment variable
//! when not given on the invocation, and to the listed hardcoded default
//! when the variable is unset or empty; an explicit flag value always wins.
//! All other flags have only a hardcoded default.

use clap::{Arg, ArgAction, ArgMatches, Command, Parser};

use crate::headers::parse_header;
use crate::rate::RateSpec;

/// Default APM Server endpoint when neither flag nor environment supply one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8200";

/// Semantic event fields with a dedicated rewrite toggle.
///
/// This set is fixed; the flag for each entry is derived mechanically by
/// [`rewrite_flag_name`], so adding a toggle means adding a table entry
/// here, not new registration code.
pub const REWRITABLE_FIELDS: [&str; 6] = [
    "service.name",
    "service.node.name",
    "service.target.name",
    "span.name",
    "transaction.name",
    "transaction.type",
];

/// Flag name for a rewritable field: dots become hyphens, `rewrite-` prefix,
/// pluralizing `s` suffix. `span.name` becomes `rewrite-span-names`.
pub fn rewrite_flag_name(field: &str) -> String {
    format!("rewrite-{}s", field.replace('.', "-"))
}

/// Command-line arguments of the load generator.
#[derive(Debug, Parser)]
#[command(
    name = "apm-loadgen",
    about = "Sends synthetic telemetry events to an APM ingestion server"
)]
pub struct Args {
    /// APM Server URL.
    #[arg(
        long,
        value_name = "URL",
        env = "ELASTIC_APM_SERVER_URL",
        default_value = DEFAULT_SERVER_URL
    )]
    pub server: String,

    /// Secret token for the APM Server.
    #[arg(
        long,
        env = "ELASTIC_APM_SECRET_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub secret_token: String,

    /// API key for the APM Server.
    #[arg(
        long,
        env = "ELASTIC_APM_API_KEY",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub api_key: String,

    /// Validate the remote server TLS certificates.
    #[arg(
        long,
        env = "ELASTIC_APM_VERIFY_SERVER_CERT",
        value_parser = parse_secure,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub secure: bool,

    /// Event rate as {burst}/{interval}, for example 200/5s. A burst of
    /// zero or less evaluates to unlimited.
    #[arg(long, value_name = "BURST/INTERVAL", default_value = "0/s")]
    pub event_rate: RateSpec,

    /// Extra header to send to the server, as key=value. May be repeated;
    /// the last occurrence of a key wins.
    #[arg(long = "header", value_name = "KEY=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Ignore HTTP errors while sending events.
    #[arg(long)]
    pub ignore_errors: bool,

    /// Rewrite event IDs every iteration, maintaining event relationships.
    #[arg(long)]
    pub rewrite_ids: bool,

    /// Rewrite event timestamps every iteration, maintaining relative
    /// offsets.
    #[arg(long)]
    pub rewrite_timestamps: bool,

    #[command(flatten)]
    pub rewrites: RewriteToggles,
}

/// Boolish flag values, matching what Go's `strconv.ParseBool` accepts plus
/// `yes`/`no`/`on`/`off`. An exported-but-empty environment variable counts
/// as unset and falls back to off.
fn parse_secure(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" => Ok(false),
        "1" | "t" | "true" | "y" | "yes" | "on" => Ok(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Ok(false),
        other => Err(format!("invalid boolean value {other:?}")),
    }
}

/// The per-field rewrite toggles, all off by default.
///
/// Registered and stored table-style from [`REWRITABLE_FIELDS`]: the flags
/// are added in a loop over the table and the booleans live in an array
/// indexed by table position. No keys outside the table exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteToggles {
    enabled: [bool; REWRITABLE_FIELDS.len()],
}

impl RewriteToggles {
    /// Whether rewriting is enabled for `field`, or `None` when `field` is
    /// not in the rewritable set.
    pub fn is_enabled(&self, field: &str) -> Option<bool> {
        REWRITABLE_FIELDS
            .iter()
            .position(|f| *f == field)
            .map(|i| self.enabled[i])
    }

    /// `(field, enabled)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        REWRITABLE_FIELDS.iter().copied().zip(self.enabled)
    }
}

impl clap::FromArgMatches for RewriteToggles {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut enabled = [false; REWRITABLE_FIELDS.len()];
        for (slot, field) in enabled.iter_mut().zip(REWRITABLE_FIELDS) {
            *slot = matches.get_flag(&rewrite_flag_name(field));
        }
        Ok(Self { enabled })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl clap::Args for RewriteToggles {
    fn augment_args(mut cmd: Command) -> Command {
        for field in REWRITABLE_FIELDS {
            let name = rewrite_flag_name(field);
            cmd = cmd.arg(
                Arg::new(name.clone())
                    .long(name)
                    .action(ArgAction::SetTrue)
                    .help(format!("Replace `{field}` in every generated event")),
            );
        }
        cmd
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

impl serde::Serialize for RewriteToggles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}
