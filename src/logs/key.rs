use chrono::DateTime;

use crate::logs::constants::{
    CLUSTER_SEGMENT_INDEX, CONTAINER_INSIGHTS_CLUSTER_SEGMENT_INDEX, CONTAINER_INSIGHTS_PREFIX,
    OBJECT_KEY_EXTENSION, OBJECT_KEY_TIME_FORMAT,
};
use crate::logs::errors::ForwarderError;
use crate::logs::processor::EnrichedRecord;

/// Builds `<cluster>/<stream>/logs_<YYYY-MM-DD_HH:MM>.log` for a batch.
///
/// Source identity is read from the first enriched record, the minute from
/// `timestamp_ms`, the first delivered record's timestamp.
pub fn build_object_key(
    first: &EnrichedRecord,
    timestamp_ms: i64,
) -> Result<String, ForwarderError> {
    let log_group = first.log_group().ok_or_else(|| {
        ForwarderError::KeyDerivation("record carries no source log group".to_string())
    })?;
    let log_stream = first.log_stream().ok_or_else(|| {
        ForwarderError::KeyDerivation("record carries no source log stream".to_string())
    })?;

    let cluster = cluster_name(log_group)?;
    let timestamp = format_timestamp(timestamp_ms)?;

    Ok(format!(
        "{cluster}/{log_stream}/logs_{timestamp}.{OBJECT_KEY_EXTENSION}"
    ))
}

/// Extracts the cluster segment of a log group.
///
/// `/aws/eks/<cluster>/...` normally, `/aws/eks/containerinsights/<cluster>/...` for
/// container insights groups.
pub fn cluster_name(log_group: &str) -> Result<&str, ForwarderError> {
    let index = if log_group.starts_with(CONTAINER_INSIGHTS_PREFIX) {
        CONTAINER_INSIGHTS_CLUSTER_SEGMENT_INDEX
    } else {
        CLUSTER_SEGMENT_INDEX
    };

    match log_group.split('/').nth(index) {
        Some(segment) if !segment.is_empty() => Ok(segment),
        Some(_) => Err(ForwarderError::KeyDerivation(format!(
            "empty cluster segment in log group `{log_group}`"
        ))),
        None => Err(ForwarderError::KeyDerivation(format!(
            "log group `{log_group}` has no segment at index {index}"
        ))),
    }
}

/// Formats epoch milliseconds as UTC `YYYY-MM-DD_HH:MM`.
pub fn format_timestamp(timestamp_ms: i64) -> Result<String, ForwarderError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|datetime| datetime.format(OBJECT_KEY_TIME_FORMAT).to_string())
        .ok_or_else(|| {
            ForwarderError::KeyDerivation(format!("timestamp {timestamp_ms} is out of range"))
        })
}
