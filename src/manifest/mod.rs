//! Install manifest decoding.
//!
//! The install manifest lists the files a client installation needs along
//! with named tags (platform, architecture, locale, ...) whose bitmasks say
//! which files belong to which configuration.
//!
//! ## Architecture
//!
//! - `structures`: header, tag, file and catalog types
//! - `parser`: binary decoding and tag resolution
//! - [`listing`]: tag filtering and line-oriented output of a catalog
//!
//! ## Limitations
//!
//! - Only the manifest itself is decoded; payloads addressed by the content
//!   hashes live in the archive and need a separate reader

pub mod listing;
mod parser;
mod structures;

pub use listing::{ListFormat, TagFilter, write_listing};
pub use parser::{InstallManifestParser, ParserConfig, parse};
pub use structures::*;
