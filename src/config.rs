use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_DATA_PATH: &str = "Final_Data.csv";
pub const DEFAULT_API_URL: &str = "https://api.gradient.ai/api";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

const ENV_DATA_PATH: &str = "JOB_DATA_PATH";
const ENV_API_URL: &str = "CAREER_API_URL";
const ENV_ACCESS_TOKEN: &str = "CAREER_ACCESS_TOKEN";
const ENV_WORKSPACE_ID: &str = "CAREER_WORKSPACE_ID";
const ENV_MODEL_ID: &str = "CAREER_MODEL_ID";
const ENV_TIMEOUT: &str = "CAREER_API_TIMEOUT_SECS";

/// Variables shown on the career page, in display order.
const RECOGNISED_VARS: [&str; 7] = [
    ENV_DATA_PATH,
    ENV_API_URL,
    ENV_ACCESS_TOKEN,
    ENV_WORKSPACE_ID,
    ENV_MODEL_ID,
    ENV_TIMEOUT,
    "RUST_LOG",
];

/// Connection settings for the hosted completion service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub access_token: String,
    pub workspace_id: String,
    pub model_id: String,
    pub timeout: Duration,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    /// `None` unless token, workspace and model are all set.
    pub service: Option<ServiceConfig>,
    /// Which recognised variables were set at startup (never their values).
    pub env_report: Vec<(&'static str, bool)>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = var(ENV_DATA_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let timeout_secs = match var(ENV_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT} must be a whole number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let service = match (var(ENV_ACCESS_TOKEN), var(ENV_WORKSPACE_ID), var(ENV_MODEL_ID)) {
            (Some(access_token), Some(workspace_id), Some(model_id)) => Some(ServiceConfig {
                base_url: var(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                access_token,
                workspace_id,
                model_id,
                timeout: Duration::from_secs(timeout_secs),
            }),
            _ => None,
        };

        let env_report = RECOGNISED_VARS
            .iter()
            .map(|&key| (key, var(key).is_some()))
            .collect();

        Ok(Config {
            data_path,
            service,
            env_report,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(cfg.service.is_none());
        assert!(cfg.env_report.iter().all(|(_, set)| !set));
    }

    #[test]
    fn service_requires_token_workspace_and_model() {
        let partial = config(&[(ENV_ACCESS_TOKEN, "t"), (ENV_WORKSPACE_ID, "w")]).unwrap();
        assert!(partial.service.is_none());

        let full = config(&[
            (ENV_ACCESS_TOKEN, "t"),
            (ENV_WORKSPACE_ID, "w"),
            (ENV_MODEL_ID, "m"),
            (ENV_TIMEOUT, "15"),
        ])
        .unwrap();
        let service = full.service.unwrap();
        assert_eq!(service.base_url, DEFAULT_API_URL);
        assert_eq!(service.model_id, "m");
        assert_eq!(service.timeout, Duration::from_secs(15));
        assert!(full
            .env_report
            .contains(&(ENV_ACCESS_TOKEN, true)));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[(ENV_DATA_PATH, "  ")]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(cfg.env_report.contains(&(ENV_DATA_PATH, false)));
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let err = config(&[(ENV_TIMEOUT, "soon")]).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT));
    }
}
