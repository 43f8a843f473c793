use serde_json::{Map, Value};

use crate::FORWARDER_VERSION;
use crate::config::Config;
use crate::events::SourceIdentity;
use crate::lifecycle::invocation_context::InvocationContext;

const SOURCE_CATEGORY_KEY: &str = "ddsourcecategory";
const AWS_KEY: &str = "aws";
const TAGS_KEY: &str = "ddtags";

const FUNCTION_VERSION_KEY: &str = "function_version";
const INVOKED_FUNCTION_ARN_KEY: &str = "invoked_function_arn";
const LOG_GROUP_KEY: &str = "logGroup";
const LOG_STREAM_KEY: &str = "logStream";
const OWNER_KEY: &str = "owner";

// ForwarderNameKey is the tag key for the forwarder's lowercased function name
const FORWARDER_NAME_KEY: &str = "forwardername";
// ForwarderMemorySizeKey is the tag key for the forwarder's allocated memory
const FORWARDER_MEMORY_SIZE_KEY: &str = "forwarder_memorysize";
const FORWARDER_VERSION_KEY: &str = "forwarder_version";

/// Fields merged into every forwarded record.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    pub source_category: String,
    pub function_version: String,
    pub invoked_function_arn: String,
    pub source: Option<SourceIdentity>,
    pub tags: String,
}

impl Metadata {
    #[must_use]
    pub fn new(
        context: &InvocationContext,
        config: &Config,
        source: Option<&SourceIdentity>,
    ) -> Self {
        Metadata {
            source_category: config.source_category.clone(),
            function_version: context.function_version.clone(),
            invoked_function_arn: context.invoked_function_arn.clone(),
            source: source.cloned(),
            tags: build_tags(config.tags.as_deref(), context),
        }
    }

    /// Nested map shape used when merging into a record.
    #[must_use]
    pub fn as_map(&self) -> Map<String, Value> {
        let mut aws = Map::new();
        aws.insert(
            FUNCTION_VERSION_KEY.to_string(),
            Value::String(self.function_version.clone()),
        );
        aws.insert(
            INVOKED_FUNCTION_ARN_KEY.to_string(),
            Value::String(self.invoked_function_arn.clone()),
        );
        if let Some(source) = &self.source {
            aws.insert(
                LOG_GROUP_KEY.to_string(),
                Value::String(source.log_group.clone()),
            );
            aws.insert(
                LOG_STREAM_KEY.to_string(),
                Value::String(source.log_stream.clone()),
            );
            aws.insert(OWNER_KEY.to_string(), Value::String(source.owner.clone()));
        }

        let mut map = Map::new();
        map.insert(
            SOURCE_CATEGORY_KEY.to_string(),
            Value::String(self.source_category.clone()),
        );
        map.insert(AWS_KEY.to_string(), Value::Object(aws));
        map.insert(TAGS_KEY.to_string(), Value::String(self.tags.clone()));
        map
    }
}

/// Reads the source log group back out of an enriched record.
#[must_use]
pub fn log_group(record: &Map<String, Value>) -> Option<&str> {
    record.get(AWS_KEY)?.get(LOG_GROUP_KEY)?.as_str()
}

/// Reads the source log stream back out of an enriched record.
#[must_use]
pub fn log_stream(record: &Map<String, Value>) -> Option<&str> {
    record.get(AWS_KEY)?.get(LOG_STREAM_KEY)?.as_str()
}

fn build_tags(static_tags: Option<&str>, context: &InvocationContext) -> String {
    let forwarder_tags = [
        (FORWARDER_NAME_KEY, context.function_name.to_lowercase()),
        (
            FORWARDER_MEMORY_SIZE_KEY,
            context.memory_limit_in_mb.to_string(),
        ),
        (FORWARDER_VERSION_KEY, FORWARDER_VERSION.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| format!("{k}:{v}"));

    static_tags
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .chain(forwarder_tags)
        .collect::<Vec<String>>()
        .join(",")
}
