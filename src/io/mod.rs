mod cursor;
mod writer;

pub use cursor::ByteCursor;
pub use writer::{
    BackpressuredWriter, DEFAULT_HIGH_WATER_MARK, LineSink, SinkStatus, StreamSink, WriterConfig,
};

use crate::error::{Error, Result};
use std::path::Path;

/// Read a whole file into memory for decoding.
pub async fn read_buffer(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| Error::io(path, e))
}
