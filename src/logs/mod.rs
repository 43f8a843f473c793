pub mod constants;
pub mod decoder;
pub mod errors;
pub mod flusher;
pub mod key;
pub mod merge;
pub mod metadata;
pub mod processor;
