/*!
 * Configuration
 * Environment-driven settings for the listing client
 *
 * Environment variables:
 * - PTABLE_SNAPSHOT_CAPACITY: maximum records per snapshot (default: NPROC)
 * - PTABLE_WORKLOAD: demo processes booted by the binary (default: 8)
 * - PTABLE_TRACE_JSON: JSON log output when `1` or `true` (default: false)
 */

use crate::core::errors::KernelError;
use crate::core::limits::{DEFAULT_SNAPSHOT_CAPACITY, DEFAULT_WORKLOAD};
use std::str::FromStr;

pub const ENV_SNAPSHOT_CAPACITY: &str = "PTABLE_SNAPSHOT_CAPACITY";
pub const ENV_WORKLOAD: &str = "PTABLE_WORKLOAD";
pub const ENV_TRACE_JSON: &str = "PTABLE_TRACE_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot_capacity: usize,
    pub workload: usize,
    pub trace_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
            workload: DEFAULT_WORKLOAD,
            trace_json: false,
        }
    }
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, KernelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KernelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            snapshot_capacity: parse_var(&lookup, ENV_SNAPSHOT_CAPACITY)?
                .unwrap_or(defaults.snapshot_capacity),
            workload: parse_var(&lookup, ENV_WORKLOAD)?.unwrap_or(defaults.workload),
            trace_json: lookup(ENV_TRACE_JSON)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.trace_json),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, KernelError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                KernelError::Configuration(format!("{key}={raw:?}: {e}"))
            })
        })
        .transpose()
}
