use serde_json::{Map, Value};
use tracing::debug;

use crate::events::RawLogRecord;
use crate::logs::constants::MESSAGE_KEY;
use crate::logs::errors::MergeConflict;
use crate::logs::merge::merge;
use crate::logs::metadata::{self, Metadata};

/// A log record with the invocation metadata merged in.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedRecord {
    /// Epoch milliseconds of the source record
    pub timestamp: i64,
    pub fields: Map<String, Value>,
}

impl EnrichedRecord {
    #[must_use]
    pub fn log_group(&self) -> Option<&str> {
        metadata::log_group(&self.fields)
    }

    #[must_use]
    pub fn log_stream(&self) -> Option<&str> {
        metadata::log_stream(&self.fields)
    }

    /// Line written to the object store for this record.
    ///
    /// The `message` field when it's a string, the whole record as JSON otherwise.
    #[must_use]
    pub fn to_line(&self) -> String {
        match self.fields.get(MESSAGE_KEY) {
            Some(Value::String(message)) => message.clone(),
            _ => Value::Object(self.fields.clone()).to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedBatch {
    pub records: Vec<EnrichedRecord>,
    /// Records skipped because their message had an unsupported shape
    pub dropped: usize,
}

impl NormalizedBatch {
    #[must_use]
    pub fn first(&self) -> Option<&EnrichedRecord> {
        self.records.first()
    }
}

#[derive(Clone, Debug)]
pub struct Processor {
    metadata: Map<String, Value>,
}

impl Processor {
    #[must_use]
    pub fn new(metadata: &Metadata) -> Self {
        Processor {
            metadata: metadata.as_map(),
        }
    }

    /// Enriches every supported record, in order.
    ///
    /// Records whose message is neither a string nor a JSON object are dropped. A
    /// single merge conflict fails the whole batch.
    pub fn process(&self, records: &[RawLogRecord]) -> Result<NormalizedBatch, MergeConflict> {
        let mut batch = NormalizedBatch {
            records: Vec::with_capacity(records.len()),
            dropped: 0,
        };

        for record in records {
            let Some(fields) = Self::get_fields(&record.message) else {
                debug!(
                    "Dropping log record with unsupported message: {:?}",
                    record.id
                );
                batch.dropped += 1;
                continue;
            };

            batch.records.push(EnrichedRecord {
                timestamp: record.timestamp,
                fields: merge(fields, &self.metadata)?,
            });
        }

        Ok(batch)
    }

    fn get_fields(message: &Value) -> Option<Map<String, Value>> {
        match message {
            Value::Object(obj) => Some(obj.clone()),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(obj)) => Some(obj),
                _ => {
                    let mut fields = Map::new();
                    fields.insert(MESSAGE_KEY.to_string(), Value::String(s.clone()));
                    Some(fields)
                }
            },
            _ => None,
        }
    }
}
