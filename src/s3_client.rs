use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::config::Config;
use crate::logs::constants::OBJECT_CONTENT_TYPE;
use crate::logs::errors::ForwarderError;
use crate::logs::flusher::ObjectStore;

/// [`ObjectStore`] backed by S3.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Loads credentials from the Lambda environment, pinned to the configured region.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        debug!("S3 client configured for region {}", config.region);

        S3ObjectStore {
            client: aws_sdk_s3::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), ForwarderError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(OBJECT_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                ForwarderError::Upload(format!(
                    "s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}
