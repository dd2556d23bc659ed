use serde::Deserialize;
use std::env;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub service_port: u16,
    pub cors_domains: Vec<String>,
    pub upload_memory_limit: usize,

    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,

    pub aws_s3_bucket_name: String,
}

impl Config {
    /// Reads the process environment. `.env` is loaded by `main` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Config {
            host: vars.get("HOST", "0.0.0.0"),
            service_port: vars.get_parsed("PORT", 5000)?,
            cors_domains: vars.get_list("CORS_DOMAINS"),
            upload_memory_limit: vars.get_parsed("UPLOAD_MEMORY_LIMIT", 10 * 1024 * 1024)?,

            aws_region: vars.get("AWS_REGION", "us-east-1"),
            aws_access_key_id: vars.get("AWS_ACCESS_KEY_ID", ""),
            aws_secret_access_key: vars.get("AWS_SECRET_ACCESS_KEY", ""),

            aws_s3_bucket_name: vars.get_required("S3_BUCKET_NAME")?,
        })
    }

    /// Static credentials are only used when both halves are present.
    pub fn has_static_credentials(&self) -> bool {
        !self.aws_access_key_id.is_empty() && !self.aws_secret_access_key.is_empty()
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn get(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        self.lookup(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn get_list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn get_parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
    {
        match self.lookup(key) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}
