/// Install tag categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Platform,
    Architecture,
    Locale,
    Region,
    Category,
    Alternate,
    Unknown(u16),
}

impl TagType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0001 => TagType::Platform,
            0x0002 => TagType::Architecture,
            0x0003 => TagType::Locale,
            0x0004 => TagType::Region,
            0x0005 => TagType::Category,
            0x4000 => TagType::Alternate,
            _ => TagType::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            TagType::Platform => 0x0001,
            TagType::Architecture => 0x0002,
            TagType::Locale => 0x0003,
            TagType::Region => 0x0004,
            TagType::Category => 0x0005,
            TagType::Alternate => 0x4000,
            TagType::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TagType::Platform => "platform".to_string(),
            TagType::Architecture => "architecture".to_string(),
            TagType::Locale => "locale".to_string(),
            TagType::Region => "region".to_string(),
            TagType::Category => "category".to_string(),
            TagType::Alternate => "alternate".to_string(),
            TagType::Unknown(v) => format!("unknown({:#06x})", v),
        }
    }
}

/// Install manifest header - 10 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestHeader {
    pub version: u8,
    pub hash_size: u8,
    pub tag_count: u16,
    pub file_count: u32,
}

impl ManifestHeader {
    /// "IN" read as a little-endian u16
    pub const SIGNATURE: u16 = 0x4E49;

    /// Bytes in each tag's membership mask: one bit per file, rounded up
    pub fn mask_size(&self) -> usize {
        (self.file_count as usize).div_ceil(8)
    }
}

/// A named tag and its file membership bitmask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub tag_type: TagType,
    pub mask: Vec<u8>,
}

impl TagRecord {
    /// Whether the mask selects `file_index`.
    ///
    /// Bit `j` of mask byte `i`, most significant bit first, addresses file
    /// `i * 8 + j`.
    pub fn contains(&self, file_index: usize) -> bool {
        self.mask
            .get(file_index / 8)
            .is_some_and(|byte| byte & (0x80 >> (file_index % 8)) != 0)
    }

    /// Indices of all files the mask selects, in ascending order.
    ///
    /// Padding bits past `file_count` are skipped.
    pub fn file_indices(&self, file_count: usize) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte != 0)
            .flat_map(|(i, byte)| {
                (0..8usize)
                    .filter(move |j| byte & (0x80 >> j) != 0)
                    .map(move |j| i * 8 + j)
            })
            .filter(move |&index| index < file_count)
    }
}

/// Parsed install manifest file entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    /// Content hash as lowercase hex, `hash_size * 2` characters
    pub content_hash: String,
    pub size: u32,
    /// Names of the tags selecting this file, in tag order
    pub tags: Vec<String>,
}

impl FileRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Fully decoded install manifest.
///
/// Owns all of its records; nothing borrows from the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    header: ManifestHeader,
    tags: Vec<TagRecord>,
    files: Vec<FileRecord>,
}

impl Catalog {
    pub(crate) fn new(header: ManifestHeader, tags: Vec<TagRecord>, files: Vec<FileRecord>) -> Self {
        Self {
            header,
            tags,
            files,
        }
    }

    pub fn header(&self) -> &ManifestHeader {
        &self.header
    }

    pub fn tags(&self) -> &[TagRecord] {
        &self.tags
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn tag(&self, name: &str) -> Option<&TagRecord> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// First file with the given name
    pub fn file(&self, name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn files_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a FileRecord> + 'a {
        self.files.iter().filter(move |f| f.has_tag(tag))
    }

    /// Sum of all file sizes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size as u64).sum()
    }

    pub fn into_parts(self) -> (ManifestHeader, Vec<TagRecord>, Vec<FileRecord>) {
        (self.header, self.tags, self.files)
    }
}
