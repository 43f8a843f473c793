use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `messageType` CloudWatch Logs uses to check a subscription destination is reachable.
pub const CONTROL_MESSAGE_TYPE: &str = "CONTROL_MESSAGE";

/// Decompressed body of an `awslogs` event.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogDeliveryPayload {
    /// `DATA_MESSAGE` for regular deliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    /// Account owning the originating log group
    #[serde(default)]
    pub owner: String,
    pub log_group: String,
    pub log_stream: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription_filters: Vec<String>,
    #[serde(default)]
    pub log_events: Vec<RawLogRecord>,
}

impl LogDeliveryPayload {
    #[must_use]
    pub fn is_control_message(&self) -> bool {
        self.message_type.as_deref() == Some(CONTROL_MESSAGE_TYPE)
    }

    #[must_use]
    pub fn source(&self) -> SourceIdentity {
        SourceIdentity {
            log_group: self.log_group.clone(),
            log_stream: self.log_stream.clone(),
            owner: self.owner.clone(),
        }
    }
}

/// Single log event inside a delivery.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RawLogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Kept as a raw value so records of unexpected shape can be told apart and dropped.
    #[serde(default)]
    pub message: Value,
}

/// Where a batch of logs came from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SourceIdentity {
    pub log_group: String,
    pub log_stream: String,
    pub owner: String,
}
