pub mod log_level;

use figment::{Figment, providers::Env};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::log_level::LogLevel;

const DEFAULT_REGION: &str = "eu-west-1";
const DEFAULT_SOURCE_CATEGORY: &str = "aws";
const DEFAULT_DATAPLANE_LOG_GROUP_SUFFIX: &str = "/dataplane";

/// Environment variables read by the forwarder, and the `Config` field each one lands in.
const ENV_FIELDS: [(&str, &str); 8] = [
    ("LOGLEVEL", "log_level"),
    ("AWS_REGION", "region"),
    ("DATAPLANE_BUCKET_NAME", "dataplane_bucket_name"),
    ("CONTROLPLANE_BUCKET_NAME", "controlplane_bucket_name"),
    ("S3_BUCKET_NAME", "s3_bucket_name"),
    ("DATAPLANE_LOG_GROUP_SUFFIX", "dataplane_log_group_suffix"),
    ("DD_TAGS", "tags"),
    ("DD_SOURCE_CATEGORY", "source_category"),
];

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub region: String,
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub dataplane_bucket_name: Option<String>,
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub controlplane_bucket_name: Option<String>,
    /// Single destination bucket used before dataplane/controlplane routing existed.
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub s3_bucket_name: Option<String>,
    pub dataplane_log_group_suffix: String,
    /// Static tags prepended to `ddtags`, comma separated `key:value` pairs.
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub tags: Option<String>,
    pub source_category: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            region: DEFAULT_REGION.to_string(),
            // Routing
            dataplane_bucket_name: None,
            controlplane_bucket_name: None,
            s3_bucket_name: None,
            dataplane_log_group_suffix: DEFAULT_DATAPLANE_LOG_GROUP_SUFFIX.to_string(),
            // Enrichment
            tags: None,
            source_category: DEFAULT_SOURCE_CATEGORY.to_string(),
        }
    }
}

impl Config {
    /// Bucket for logs coming from a dataplane log group, falling back to the legacy bucket.
    #[must_use]
    pub fn dataplane_bucket(&self) -> Option<&str> {
        self.dataplane_bucket_name
            .as_deref()
            .or(self.s3_bucket_name.as_deref())
    }

    /// Bucket for every other log group, falling back to the legacy bucket.
    #[must_use]
    pub fn controlplane_bucket(&self) -> Option<&str> {
        self.controlplane_bucket_name
            .as_deref()
            .or(self.s3_bucket_name.as_deref())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse forwarder config: {0}")]
    ParseError(String),
}

pub fn get_config() -> Result<Config, ConfigError> {
    let figment = Figment::new().merge(Env::raw().filter_map(|key| {
        ENV_FIELDS
            .iter()
            .find(|(env_key, _)| key.as_str().eq_ignore_ascii_case(env_key))
            .map(|(_, field)| (*field).into())
    }));

    let mut config: Config = figment
        .extract()
        .map_err(|err| ConfigError::ParseError(err.to_string()))?;

    // Blank values behave as if the variable was never set
    if config.region.trim().is_empty() {
        config.region = DEFAULT_REGION.to_string();
    }
    if config.source_category.trim().is_empty() {
        config.source_category = DEFAULT_SOURCE_CATEGORY.to_string();
    }
    if config.dataplane_log_group_suffix.trim().is_empty() {
        config.dataplane_log_group_suffix = DEFAULT_DATAPLANE_LOG_GROUP_SUFFIX.to_string();
    }

    Ok(config)
}

fn deserialize_string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(s))
            }
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(serde::de::Error::custom("expected a string or an integer")),
    }
}
