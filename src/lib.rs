//! # cascinstall
//!
//! Decoder and indexer for the install manifest of a CASC game-client
//! content store.
//!
//! This library turns the raw bytes of an install manifest into an owned
//! [`Catalog`] of tags and files, builds lookup indices over it, and streams
//! listings out through a writer that respects sink backpressure. It also
//! provides the primitives a full archive reader builds on: the lookup3
//! name hash and an LSB-first bit reader.
//!
//! ## Features
//!
//! - Bit-exact install manifest decoding with tag membership resolution
//! - Jenkins lookup3 (`hashlittle2`) hashing of archive paths
//! - LSB-first bit reader for bit-packed codecs
//! - Insertion-ordered multi-value indices (tag, name hash, content hash)
//! - Plain and CSV listings written through a backpressured line writer
//!
//! ## Example
//!
//! ```no_run
//! use cascinstall::{BackpressuredWriter, ListFormat, StreamSink, TagFilter, WriterConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let data = std::fs::read("install.manifest")?;
//!     let catalog = cascinstall::parse(&data)?;
//!
//!     let config = WriterConfig::default();
//!     let mut writer = BackpressuredWriter::new(StreamSink::new(tokio::io::stdout(), &config));
//!     let filter = TagFilter::only(["Windows", "enUS"]);
//!     cascinstall::write_listing(&catalog, &filter, ListFormat::Plain, &mut writer).await?;
//!     writer.close().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod codec;
pub mod error;
pub mod index;
pub mod io;
pub mod manifest;

pub use cli::Cli;
pub use codec::{BitReader, HashKey, hash, hash_default};
pub use error::{Error, Result};
pub use index::{CatalogIndex, IndexMultiMap, Slot};
pub use io::{BackpressuredWriter, ByteCursor, LineSink, SinkStatus, StreamSink, WriterConfig};
pub use manifest::{
    Catalog, FileRecord, InstallManifestParser, ListFormat, ManifestHeader, ParserConfig,
    TagFilter, TagRecord, TagType, parse, write_listing,
};
