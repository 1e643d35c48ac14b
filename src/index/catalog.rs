use tracing::debug;

use crate::codec::HashKey;
use crate::manifest::{Catalog, FileRecord};

use super::multimap::IndexMultiMap;

/// Lookup tables over a decoded [`Catalog`].
///
/// Values are indices into `catalog.files()`. Duplicate names or content
/// hashes simply collect several indices under one key.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    by_tag: IndexMultiMap<String, usize>,
    by_name: IndexMultiMap<HashKey, usize>,
    by_content: IndexMultiMap<String, usize>,
}

impl CatalogIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut by_tag = IndexMultiMap::new();
        let mut by_name = IndexMultiMap::new();
        let mut by_content = IndexMultiMap::new();

        for (index, file) in catalog.files().iter().enumerate() {
            by_name.set(HashKey::for_path(&file.name), index);
            by_content.set(file.content_hash.clone(), index);
        }

        // Keys follow manifest tag order; a tag selecting no file gets no key
        let file_count = catalog.files().len();
        for tag in catalog.tags() {
            for index in tag.file_indices(file_count) {
                by_tag.set(tag.name.clone(), index);
            }
        }

        debug!(
            "indexed {} files: {} tags, {} names, {} content hashes",
            file_count,
            by_tag.len(),
            by_name.len(),
            by_content.len()
        );

        Self {
            by_tag,
            by_name,
            by_content,
        }
    }

    /// Indices of files carrying `tag`, ascending
    pub fn files_for_tag(&self, tag: &str) -> &[usize] {
        self.by_tag.values_of(tag)
    }

    /// Indices of files whose normalised path matches `path`
    pub fn lookup_path(&self, path: &str) -> &[usize] {
        self.by_name.values_of(&HashKey::for_path(path))
    }

    pub fn lookup_content_hash(&self, content_hash: &str) -> &[usize] {
        self.by_content.values_of(&content_hash.to_ascii_lowercase())
    }

    /// Resolve index results back to their records.
    pub fn records<'a>(
        &self,
        catalog: &'a Catalog,
        indices: &[usize],
    ) -> Vec<&'a FileRecord> {
        indices
            .iter()
            .filter_map(|&i| catalog.files().get(i))
            .collect()
    }

    pub fn tags(&self) -> &IndexMultiMap<String, usize> {
        &self.by_tag
    }

    pub fn names(&self) -> &IndexMultiMap<HashKey, usize> {
        &self.by_name
    }

    pub fn content_hashes(&self) -> &IndexMultiMap<String, usize> {
        &self.by_content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ManifestHeader, TagRecord, TagType};

    fn file(name: &str, hash: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            content_hash: hash.to_string(),
            size: 1,
            tags: Vec::new(),
        }
    }

    fn sample() -> Catalog {
        let header = ManifestHeader {
            version: 1,
            hash_size: 2,
            tag_count: 2,
            file_count: 3,
        };
        let tags = vec![
            TagRecord {
                name: "Windows".to_string(),
                tag_type: TagType::Platform,
                mask: vec![0b1010_0000],
            },
            TagRecord {
                name: "OSX".to_string(),
                tag_type: TagType::Platform,
                mask: vec![0b0100_0000],
            },
        ];
        let files = vec![
            file("Data/a.bin", "aaaa"),
            file("Data/b.bin", "bbbb"),
            file("data\\A.BIN", "aaaa"),
        ];
        Catalog::new(header, tags, files)
    }

    #[test]
    fn test_tag_index() {
        let catalog = sample();
        let index = CatalogIndex::build(&catalog);
        assert_eq!(index.files_for_tag("Windows"), &[0, 2]);
        assert_eq!(index.files_for_tag("OSX"), &[1]);
        assert!(index.files_for_tag("Linux").is_empty());
        assert_eq!(
            index.tags().keys().cloned().collect::<Vec<_>>(),
            vec!["Windows".to_string(), "OSX".to_string()]
        );
    }

    #[test]
    fn test_empty_tag_has_no_key() {
        let (header, mut tags, files) = sample().into_parts();
        tags.push(TagRecord {
            name: "Linux".to_string(),
            tag_type: TagType::Platform,
            mask: vec![0],
        });
        let catalog = Catalog::new(header, tags, files);
        let index = CatalogIndex::build(&catalog);
        assert!(!index.tags().contains_key("Linux"));
        assert!(index.files_for_tag("Linux").is_empty());
        assert_eq!(index.tags().len(), 2);
    }

    #[test]
    fn test_path_lookup_collides_on_normalised_name() {
        let catalog = sample();
        let index = CatalogIndex::build(&catalog);
        assert_eq!(index.lookup_path("DATA/A.bin"), &[0, 2]);
        let records = index.records(&catalog, index.lookup_path("data/b.bin"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content_hash, "bbbb");
    }

    #[test]
    fn test_content_lookup() {
        let catalog = sample();
        let index = CatalogIndex::build(&catalog);
        assert_eq!(index.lookup_content_hash("AAAA"), &[0, 2]);
        assert_eq!(index.content_hashes().len(), 2);
    }
}
