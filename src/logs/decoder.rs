use std::io::{BufRead, BufReader};

use base64::prelude::*;
use flate2::read::MultiGzDecoder;
use serde_json::Value;
use tracing::debug;

use crate::events::LogDeliveryPayload;
use crate::logs::constants::DECOMPRESSION_CHUNK_SIZE_BYTES;
use crate::logs::errors::{DecodeError, ForwarderError};

/// Returns the `awslogs.data` field of an incoming event.
pub fn extract_data(event: &Value) -> Result<&str, ForwarderError> {
    let Some(awslogs) = event.get("awslogs") else {
        return Err(ForwarderError::Input("missing `awslogs` field".to_string()));
    };

    awslogs
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| ForwarderError::Input("missing `awslogs.data` field".to_string()))
}

/// Decodes base64, inflates the gzip stream and parses the resulting document.
pub fn decode(data: &str) -> Result<LogDeliveryPayload, DecodeError> {
    let compressed = BASE64_STANDARD.decode(data.trim())?;
    let decompressed = decompress(&compressed)?;
    debug!(
        "Decompressed {} bytes into {} bytes",
        compressed.len(),
        decompressed.len()
    );

    Ok(serde_json::from_slice(&decompressed)?)
}

/// Inflates `compressed` chunk by chunk.
///
/// Payloads can reach tens of megabytes once inflated, reading through a bounded
/// buffer keeps the inflater working on small slices instead of one huge transform.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, std::io::Error> {
    let mut reader =
        BufReader::with_capacity(DECOMPRESSION_CHUNK_SIZE_BYTES, MultiGzDecoder::new(compressed));
    let mut decompressed = Vec::with_capacity(compressed.len().saturating_mul(4));

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        let len = chunk.len();
        decompressed.extend_from_slice(chunk);
        reader.consume(len);
    }

    Ok(decompressed)
}
