#![allow(dead_code)]

/// Encodes install manifests for tests.
pub struct ManifestBuilder {
    pub signature: [u8; 2],
    pub version: u8,
    pub hash_size: u8,
    pub tags: Vec<(String, u16, Vec<usize>)>,
    pub files: Vec<(String, Vec<u8>, u32)>,
}

impl ManifestBuilder {
    pub fn new(hash_size: u8) -> Self {
        Self {
            signature: [0x49, 0x4E],
            version: 1,
            hash_size,
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn tag(mut self, name: &str, tag_type: u16, members: &[usize]) -> Self {
        self.tags.push((name.to_string(), tag_type, members.to_vec()));
        self
    }

    pub fn file(mut self, name: &str, hash: &[u8], size: u32) -> Self {
        assert_eq!(hash.len(), self.hash_size as usize);
        self.files.push((name.to_string(), hash.to_vec(), size));
        self
    }

    /// `count` files named `file{i}` with hash bytes all equal to `i`.
    pub fn numbered_files(mut self, count: usize) -> Self {
        for i in 0..count {
            let hash = vec![i as u8; self.hash_size as usize];
            self = self.file(&format!("file{}", i), &hash, i as u32 * 10);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let file_count = self.files.len();
        let mask_size = file_count.div_ceil(8);

        let mut out = Vec::new();
        out.extend_from_slice(&self.signature);
        out.push(self.version);
        out.push(self.hash_size);
        out.extend_from_slice(&(self.tags.len() as u16).to_be_bytes());
        out.extend_from_slice(&(file_count as u32).to_be_bytes());

        for (name, tag_type, members) in &self.tags {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
            out.extend_from_slice(&tag_type.to_be_bytes());
            let mut mask = vec![0u8; mask_size];
            for &index in members {
                mask[index / 8] |= 0x80 >> (index % 8);
            }
            out.extend_from_slice(&mask);
        }

        for (name, hash, size) in &self.files {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
            out.extend_from_slice(hash);
            out.extend_from_slice(&size.to_be_bytes());
        }

        out
    }
}
