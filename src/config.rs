//! Runtime configuration from environment variables.
//!
//! | Variable                  | Default                                   |
//! |---------------------------|-------------------------------------------|
//! | `HABITICA_USER_ID`        | required for `run`                        |
//! | `HABITICA_API_TOKEN`      | required for `run`                        |
//! | `CADENCE_API_URL`         | `https://habitica.com/api/v3/tasks/user`  |
//! | `CADENCE_HOME`            | `.cadence`                                |
//! | `CADENCE_SCHEDULE`        | `$CADENCE_HOME/schedule.txt`              |
//! | `CADENCE_LEDGER`          | `$CADENCE_HOME/ledger.json`               |
//! | `CADENCE_LEASE_TTL_SECS`  | `1800`                                    |
//! | `CADENCE_RECORD`          | unset; a directory enables recording      |
//!
//! The binary loads a `.env` file first, so any of these may live there.

use std::fmt;
use std::path::PathBuf;

use chrono::TimeDelta;

use crate::adapters::live::habitica::HABITICA_TASKS_URL;
use crate::error::ConfigError;

const DEFAULT_HOME: &str = ".cadence";
const DEFAULT_LEASE_TTL_SECS: i64 = 30 * 60;

/// The two opaque values Habitica expects on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Sent as `x-api-user`.
    pub user_id: String,
    /// Sent as `x-api-key`.
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Resolved configuration.
#[derive(Clone)]
pub struct Config {
    /// Tasks endpoint of the remote API.
    pub api_url: String,
    /// Recurrence schedule file.
    pub schedule_path: PathBuf,
    /// Ledger file.
    pub ledger_path: PathBuf,
    /// Age after which a run lease is considered abandoned.
    pub lease_ttl: TimeDelta,
    /// Directory receiving cassettes when recording is enabled.
    pub record_dir: Option<PathBuf>,
    user_id: Option<String>,
    api_token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("schedule_path", &self.schedule_path)
            .field("ledger_path", &self.ledger_path)
            .field("lease_ttl", &self.lease_ttl)
            .field("record_dir", &self.record_dir)
            .field("user_id", &self.user_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let home = get("CADENCE_HOME").map_or_else(|| PathBuf::from(DEFAULT_HOME), PathBuf::from);
        let schedule_path =
            get("CADENCE_SCHEDULE").map_or_else(|| home.join("schedule.txt"), PathBuf::from);
        let ledger_path =
            get("CADENCE_LEDGER").map_or_else(|| home.join("ledger.json"), PathBuf::from);

        let lease_ttl = match get("CADENCE_LEASE_TTL_SECS") {
            None => TimeDelta::seconds(DEFAULT_LEASE_TTL_SECS),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .and_then(TimeDelta::try_seconds)
                .ok_or(ConfigError::Invalid { name: "CADENCE_LEASE_TTL_SECS", value: raw })?,
        };

        Ok(Self {
            api_url: get("CADENCE_API_URL").unwrap_or_else(|| HABITICA_TASKS_URL.to_string()),
            schedule_path,
            ledger_path,
            lease_ttl,
            record_dir: get("CADENCE_RECORD").map(PathBuf::from),
            user_id: get("HABITICA_USER_ID"),
            api_token: get("HABITICA_API_TOKEN"),
        })
    }

    /// Credentials for the remote API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first unset variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let user_id = self.user_id.clone().ok_or(ConfigError::Missing("HABITICA_USER_ID"))?;
        let api_token = self.api_token.clone().ok_or(ConfigError::Missing("HABITICA_API_TOKEN"))?;
        Ok(Credentials { user_id, api_token })
    }

    /// Replaces the schedule and ledger paths when overrides are given.
    #[must_use]
    pub fn with_paths(mut self, schedule: Option<PathBuf>, ledger: Option<PathBuf>) -> Self {
        if let Some(schedule) = schedule {
            self.schedule_path = schedule;
        }
        if let Some(ledger) = ledger {
            self.ledger_path = ledger;
        }
        self
    }
}
