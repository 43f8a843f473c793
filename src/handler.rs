use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::lifecycle::invocation_context::InvocationContext;
use crate::logs::decoder;
use crate::logs::errors::ForwarderError;
use crate::logs::flusher::{Flusher, ObjectStore};
use crate::logs::key::build_object_key;
use crate::logs::metadata::Metadata;
use crate::logs::processor::Processor;

/// Forwards one `awslogs` delivery to the object store.
///
/// Events without an `awslogs.data` envelope and upload failures are logged and
/// reported as success. Decode, merge and key errors fail the invocation before
/// anything is written.
#[tracing::instrument(skip_all, fields(request_id = %context.request_id))]
pub async fn handle<S: ObjectStore + ?Sized>(
    event: &Value,
    context: &InvocationContext,
    config: &Config,
    store: &S,
) -> Result<(), ForwarderError> {
    let data = match decoder::extract_data(event) {
        Ok(data) => data,
        Err(e) => {
            error!("Ignoring event: {e}");
            return Ok(());
        }
    };

    let payload = decoder::decode(data)?;
    if payload.is_control_message() {
        debug!("Skipping control message for {}", payload.log_group);
        return Ok(());
    }

    let source = payload.source();
    let metadata = Metadata::new(context, config, Some(&source));
    let batch = Processor::new(&metadata).process(&payload.log_events)?;
    if batch.dropped > 0 {
        warn!(
            "Dropped {} of {} records from {} with unsupported messages",
            batch.dropped,
            payload.log_events.len(),
            source.log_group
        );
    }

    let Some(first) = batch.first() else {
        warn!("No records to forward from {}", source.log_group);
        return Ok(());
    };
    // Keyed on the first delivered record, even when normalization dropped it
    let first_timestamp = payload
        .log_events
        .first()
        .map_or(first.timestamp, |record| record.timestamp);
    let key = build_object_key(first, first_timestamp)?;

    Flusher::new(store, config)
        .flush(&source.log_group, &key, &batch.records)
        .await;

    Ok(())
}
