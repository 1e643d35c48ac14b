//! Install manifest decoder.
//!
//! ## Layout
//!
//! All multi-byte fields are big-endian except the signature:
//!
//! ```text
//! [2] signature "IN" (0x4E49 little-endian)
//! [1] version
//! [1] hash size
//! [2] tag count
//! [4] file count
//! tag count times:   name\0, [2] type, [mask size] mask
//! file count times:  name\0, [hash size] content hash, [4] size
//! ```
//!
//! Tag membership is resolved after every record is read: each set mask
//! bit appends the tag's name to the file it addresses.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::io::ByteCursor;

use super::structures::*;

/// Decoder options
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Reject buffers with bytes left after the last file record
    pub require_fully_consumed: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_fully_consumed(mut self, strict: bool) -> Self {
        self.require_fully_consumed = strict;
        self
    }
}

/// Install manifest parser.
///
/// Stateless apart from its configuration; one parser can decode any
/// number of buffers.
#[derive(Debug, Clone, Default)]
pub struct InstallManifestParser {
    config: ParserConfig,
}

impl InstallManifestParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Decode a complete manifest buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSignature`] if the buffer does not start with `IN`
    /// - [`Error::Truncated`] if any record runs past the end of the buffer
    /// - [`Error::TrailingData`] if strict consumption is enabled and bytes remain
    pub fn parse(&self, data: &[u8]) -> Result<Catalog> {
        let mut cursor = ByteCursor::new(data);

        let header = self.parse_header(&mut cursor)?;
        debug!(
            "install manifest v{}: {} tags, {} files, {}-byte hashes",
            header.version, header.tag_count, header.file_count, header.hash_size
        );

        let mask_size = header.mask_size();
        let mut tags = Vec::with_capacity(header.tag_count as usize);
        for _ in 0..header.tag_count {
            tags.push(self.parse_tag(&mut cursor, mask_size)?);
        }

        // Cap the reservation by what the buffer could possibly hold
        let min_file_record = 1 + header.hash_size as u64 + 4;
        let capacity = (header.file_count as u64).min(cursor.remaining() / min_file_record);
        let mut files = Vec::with_capacity(capacity as usize);
        for _ in 0..header.file_count {
            files.push(self.parse_file(&mut cursor, header.hash_size as usize)?);
        }

        if self.config.require_fully_consumed && cursor.remaining() > 0 {
            return Err(Error::TrailingData {
                offset: cursor.position(),
                remaining: cursor.remaining(),
            });
        }

        resolve_tags(&tags, &mut files);

        Ok(Catalog::new(header, tags, files))
    }

    fn parse_header(&self, cursor: &mut ByteCursor<'_>) -> Result<ManifestHeader> {
        let signature = cursor.read_u16_le()?;
        if signature != ManifestHeader::SIGNATURE {
            return Err(Error::InvalidSignature { found: signature });
        }

        Ok(ManifestHeader {
            version: cursor.read_u8()?,
            hash_size: cursor.read_u8()?,
            tag_count: cursor.read_u16_be()?,
            file_count: cursor.read_u32_be()?,
        })
    }

    fn parse_tag(&self, cursor: &mut ByteCursor<'_>, mask_size: usize) -> Result<TagRecord> {
        let name = cursor.read_cstring()?;
        let tag_type = TagType::from_u16(cursor.read_u16_be()?);
        let mask = cursor.read_bytes(mask_size)?;
        trace!("tag '{}' ({})", name, tag_type.label());

        Ok(TagRecord {
            name,
            tag_type,
            mask,
        })
    }

    fn parse_file(&self, cursor: &mut ByteCursor<'_>, hash_size: usize) -> Result<FileRecord> {
        let name = cursor.read_cstring()?;
        let content_hash = cursor.read_hex(hash_size)?;
        let size = cursor.read_u32_be()?;
        trace!("file '{}' {} ({} bytes)", name, content_hash, size);

        Ok(FileRecord {
            name,
            content_hash,
            size,
            tags: Vec::new(),
        })
    }
}

/// Append each tag's name to every file its mask selects.
///
/// Tags are visited in manifest order, so each file's tag list follows
/// tag order.
fn resolve_tags(tags: &[TagRecord], files: &mut [FileRecord]) {
    let file_count = files.len();
    for tag in tags {
        for index in tag.file_indices(file_count) {
            files[index].tags.push(tag.name.clone());
        }
    }
}

/// Decode a manifest buffer with the default configuration.
pub fn parse(data: &[u8]) -> Result<Catalog> {
    InstallManifestParser::new().parse(data)
}
