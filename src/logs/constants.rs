/// Log groups starting with this prefix carry the cluster name one segment further down.
pub const CONTAINER_INSIGHTS_PREFIX: &str = "/aws/eks/containerinsights";

/// Position of the cluster name in a `/`-split log group, e.g. `/aws/eks/<cluster>/cluster`.
pub const CLUSTER_SEGMENT_INDEX: usize = 3;

/// Position of the cluster name in a `/`-split container insights log group.
pub const CONTAINER_INSIGHTS_CLUSTER_SEGMENT_INDEX: usize = 4;

/// Size of the buffer used while inflating the gzip payload.
pub const DECOMPRESSION_CHUNK_SIZE_BYTES: usize = 64 * 1_024;

/// `strftime` format of the timestamp embedded in object keys.
pub const OBJECT_KEY_TIME_FORMAT: &str = "%Y-%m-%d_%H:%M";

pub const OBJECT_KEY_EXTENSION: &str = "log";

pub const MESSAGE_KEY: &str = "message";

pub const OBJECT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
