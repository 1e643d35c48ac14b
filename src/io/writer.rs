//! Ordered line output with sink-driven backpressure.
//!
//! A [`LineSink`] always accepts the bytes it is given but may answer
//! [`SinkStatus::Blocked`] to say it wants no more until it has drained.
//! [`BackpressuredWriter`] queues lines while the sink is blocked, waits
//! for the drain, then resumes writing in submission order.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{trace, warn};

use crate::error::{Error, Result};

/// Default buffered byte count at which a [`StreamSink`] reports `Blocked`
pub const DEFAULT_HIGH_WATER_MARK: usize = 16 * 1024;

/// Whether a sink can take more data right away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    Ready,
    Blocked,
}

/// Destination for [`BackpressuredWriter`].
#[async_trait]
pub trait LineSink: Send {
    /// Accept `data`. The data is taken even when the answer is `Blocked`.
    fn write(&mut self, data: &[u8]) -> std::io::Result<SinkStatus>;

    /// Suspend until the sink is ready for more data.
    async fn drained(&mut self) -> std::io::Result<()>;

    /// Flush everything accepted so far and release the destination.
    async fn close(&mut self) -> std::io::Result<()>;
}

/// Output settings
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Bytes a [`StreamSink`] buffers before it reports `Blocked`
    pub high_water_mark: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the high-water mark (minimum 1 byte)
    pub fn high_water_mark(mut self, bytes: usize) -> Self {
        self.high_water_mark = bytes.max(1);
        self
    }
}

/// [`LineSink`] over any tokio writer.
///
/// Accepted bytes collect in memory until the high-water mark is reached;
/// draining writes them through to the inner writer.
pub struct StreamSink<W> {
    inner: W,
    buffer: Vec<u8>,
    high_water_mark: usize,
}

impl<W: AsyncWrite + Unpin + Send> StreamSink<W> {
    pub fn new(inner: W, config: &WriterConfig) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(config.high_water_mark),
            high_water_mark: config.high_water_mark,
        }
    }

    /// Bytes accepted but not yet written through
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> LineSink for StreamSink<W> {
    fn write(&mut self, data: &[u8]) -> std::io::Result<SinkStatus> {
        self.buffer.extend_from_slice(data);
        if self.buffer.len() >= self.high_water_mark {
            Ok(SinkStatus::Blocked)
        } else {
            Ok(SinkStatus::Ready)
        }
    }

    /// Bytes leave the buffer as soon as the inner writer takes them, so a
    /// cancelled drain never writes anything twice.
    async fn drained(&mut self) -> std::io::Result<()> {
        while !self.buffer.is_empty() {
            let n = self.inner.write(&self.buffer).await?;
            if n == 0 {
                return Err(std::io::ErrorKind::WriteZero.into());
            }
            self.buffer.drain(..n);
        }
        self.inner.flush().await
    }

    async fn close(&mut self) -> std::io::Result<()> {
        self.drained().await?;
        self.inner.shutdown().await
    }
}

/// Sequential line writer that suspends while its sink is blocked.
///
/// Taking `&mut self` in [`write_line`](Self::write_line) means at most one
/// caller can be waiting for a drain. Lines are written exactly once and in
/// submission order. Call [`close`](Self::close) on every exit path; lines
/// still queued when the writer is dropped are lost.
///
/// The first sink error fails the writer: later writes are refused and
/// nothing is handed to the sink again.
pub struct BackpressuredWriter<S: LineSink> {
    sink: S,
    queue: VecDeque<String>,
    blocked: bool,
    failed: bool,
    lines_written: u64,
}

impl<S: LineSink> BackpressuredWriter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            queue: VecDeque::new(),
            blocked: false,
            failed: false,
            lines_written: 0,
        }
    }

    /// Queue `line` (a newline is appended) and write out as much of the
    /// queue as the sink will take.
    ///
    /// If the sink is blocked this waits for it to drain first. A line
    /// queued before the wait stays queued if the returned future is
    /// dropped; [`close`](Self::close) still writes it.
    ///
    /// # Errors
    ///
    /// [`Error::Sink`] if the sink fails, or if it already failed on an
    /// earlier call. A line the sink rejected is not retried.
    pub async fn write_line(&mut self, line: impl Into<String>) -> Result<()> {
        if self.failed {
            return Err(Error::Sink(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "sink failed on an earlier write",
            )));
        }

        let mut line = line.into();
        line.push('\n');
        self.queue.push_back(line);

        if self.blocked {
            self.wait_for_drain().await?;
        }
        self.pump()
    }

    /// Write every queued line, then close and return the sink.
    ///
    /// After a sink failure the queue is discarded and the sink is only
    /// closed.
    pub async fn close(mut self) -> Result<S> {
        if self.failed {
            warn!("discarding {} queued lines after sink failure", self.queue.len());
            self.queue.clear();
        }

        while !self.failed && (self.blocked || !self.queue.is_empty()) {
            if self.blocked {
                self.wait_for_drain().await?;
            }
            self.pump()?;
        }

        trace!("closing sink after {} lines", self.lines_written);
        self.sink.close().await.map_err(Error::Sink)?;
        Ok(self.sink)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Lines queued but not yet handed to the sink
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Lines handed to the sink so far
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    async fn wait_for_drain(&mut self) -> Result<()> {
        trace!("sink blocked with {} lines queued", self.queue.len());
        if let Err(e) = self.sink.drained().await {
            self.failed = true;
            return Err(Error::Sink(e));
        }
        self.blocked = false;
        Ok(())
    }

    fn pump(&mut self) -> Result<()> {
        while !self.blocked {
            let Some(line) = self.queue.pop_front() else {
                break;
            };
            let status = match self.sink.write(line.as_bytes()) {
                Ok(status) => status,
                Err(e) => {
                    self.failed = true;
                    return Err(Error::Sink(e));
                }
            };
            self.lines_written += 1;
            self.blocked = status == SinkStatus::Blocked;
        }
        Ok(())
    }
}

impl BackpressuredWriter<StreamSink<tokio::fs::File>> {
    /// Create (or truncate) `path` and write lines into it.
    pub async fn create(path: impl AsRef<Path>, config: &WriterConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::create(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        Ok(Self::new(StreamSink::new(file, config)))
    }
}
