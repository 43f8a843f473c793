use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::logs::errors::ForwarderError;
use crate::logs::processor::EnrichedRecord;

/// Destination the forwarder writes batches to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>)
    -> Result<(), ForwarderError>;
}

/// Picks the bucket for a log group: dataplane when the group ends with the configured
/// suffix, controlplane otherwise.
#[must_use]
pub fn route_bucket<'a>(config: &'a Config, log_group: &str) -> Option<&'a str> {
    if log_group.ends_with(&config.dataplane_log_group_suffix) {
        config.dataplane_bucket()
    } else {
        config.controlplane_bucket()
    }
}

/// One line per record, newline separated, no trailing newline.
#[must_use]
pub fn serialize_batch(records: &[EnrichedRecord]) -> String {
    records
        .iter()
        .map(EnrichedRecord::to_line)
        .collect::<Vec<String>>()
        .join("\n")
}

pub struct Flusher<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: ObjectStore + ?Sized> Flusher<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Flusher { store, config }
    }

    /// Writes `records` as a single object at `key`.
    pub async fn try_flush(
        &self,
        log_group: &str,
        key: &str,
        records: &[EnrichedRecord],
    ) -> Result<(), ForwarderError> {
        let Some(bucket) = route_bucket(self.config, log_group) else {
            return Err(ForwarderError::Upload(format!(
                "no bucket configured for log group `{log_group}`"
            )));
        };

        let body = serialize_batch(records).into_bytes();
        debug!(
            "Uploading {} records ({} bytes) to s3://{bucket}/{key}",
            records.len(),
            body.len()
        );
        self.store.put_object(bucket, key, body).await
    }

    /// Same as [`Flusher::try_flush`], but failures are only logged.
    ///
    /// Returns whether the object was written.
    pub async fn flush(&self, log_group: &str, key: &str, records: &[EnrichedRecord]) -> bool {
        match self.try_flush(log_group, key, records).await {
            Ok(()) => {
                info!("Forwarded {} records to {key}", records.len());
                true
            }
            Err(e) => {
                error!("Failed to upload logs to {key}: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Keeps every write in memory, optionally failing all of them.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) objects: Mutex<Vec<(String, String, Vec<u8>)>>,
        pub(crate) fail: bool,
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: Vec<u8>,
        ) -> Result<(), ForwarderError> {
            if self.fail {
                return Err(ForwarderError::Upload("access denied".to_string()));
            }
            self.objects
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string(), body));
            Ok(())
        }
    }

    fn record(fields: Value) -> EnrichedRecord {
        EnrichedRecord {
            timestamp: 1_700_000_000_000,
            fields: fields.as_object().unwrap().clone(),
        }
    }

    fn config() -> Config {
        Config {
            dataplane_bucket_name: Some("dataplane-logs".to_string()),
            controlplane_bucket_name: Some("controlplane-logs".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_route_bucket() {
        let config = config();
        assert_eq!(
            route_bucket(&config, "/aws/containerinsights/forgerock/dataplane"),
            Some("dataplane-logs")
        );
        assert_eq!(
            route_bucket(&config, "/aws/eks/forgerock/cluster"),
            Some("controlplane-logs")
        );
        assert_eq!(
            route_bucket(&Config::default(), "/aws/eks/forgerock/cluster"),
            None
        );
    }

    #[test]
    fn test_route_bucket_custom_suffix() {
        let config = Config {
            dataplane_log_group_suffix: "/application".to_string(),
            ..config()
        };
        assert_eq!(
            route_bucket(&config, "/aws/eks/containerinsights/prod/application"),
            Some("dataplane-logs")
        );
        assert_eq!(
            route_bucket(&config, "/aws/eks/containerinsights/prod/dataplane"),
            Some("controlplane-logs")
        );
    }

    #[test]
    fn test_serialize_batch() {
        let records = vec![
            record(json!({"message": "first line"})),
            record(json!({"kind": "Event"})),
            record(json!({"message": "third line"})),
        ];
        assert_eq!(
            serialize_batch(&records),
            "first line\n{\"kind\":\"Event\"}\nthird line"
        );
        assert_eq!(serialize_batch(&[]), "");
    }

    #[tokio::test]
    async fn test_flush_writes_one_object() {
        let store = MemoryStore::default();
        let config = config();
        let records = vec![record(json!({"message": "a"})), record(json!({"message": "b"}))];

        Flusher::new(&store, &config)
            .try_flush("/aws/eks/forgerock/cluster", "forgerock/stream/logs.log", &records)
            .await
            .unwrap();

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, "controlplane-logs");
        assert_eq!(objects[0].1, "forgerock/stream/logs.log");
        assert_eq!(objects[0].2, b"a\nb");
    }

    #[tokio::test]
    async fn test_flush_without_bucket() {
        let store = MemoryStore::default();
        let config = Config::default();
        let flusher = Flusher::new(&store, &config);

        let result = flusher
            .try_flush("/aws/eks/forgerock/cluster", "key", &[])
            .await;
        assert!(matches!(result, Err(ForwarderError::Upload(_))));

        assert!(!flusher.flush("/aws/eks/forgerock/cluster", "key", &[]).await);
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_flush_swallows_store_errors() {
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let config = config();
        let flusher = Flusher::new(&store, &config);
        let records = vec![record(json!({"message": "a"}))];

        assert!(flusher.try_flush("/x/y/z", "key", &records).await.is_err());
        assert!(!flusher.flush("/x/y/z", "key", &records).await);
    }

    #[tokio::test]
    async fn test_flush_reports_success() {
        let store = MemoryStore::default();
        let config = config();
        let records = vec![record(json!({"message": "a"}))];

        assert!(
            Flusher::new(&store, &config)
                .flush("/x/y/z", "key", &records)
                .await
        );
        assert_eq!(store.objects.lock().unwrap().len(), 1);
    }
}
