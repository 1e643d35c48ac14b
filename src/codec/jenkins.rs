//! Bob Jenkins' lookup3 hash (`hashlittle2`).
//!
//! The content store derives its 64-bit name lookup keys from this hash.
//! The implementation is bit-exact with the reference `hashlittle2`: the
//! primary seed feeds all three state words, the secondary seed only `c`,
//! and the two output words are `(b, c)`.

use std::fmt;

/// Initial value of the three state words before length and seeds are added
const GOLDEN: u32 = 0xDEAD_BEEF;

/// Two-word lookup3 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashKey {
    /// Secondary output word (`b`)
    pub low: u32,
    /// Primary output word (`c`), equal to `hashlittle` for a zero secondary seed
    pub high: u32,
}

impl HashKey {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Hash an archive path the way the content store keys its names:
    /// ASCII upper-case with `/` separators turned into `\`.
    pub fn for_path(path: &str) -> Self {
        let normalized: Vec<u8> = path
            .bytes()
            .map(|b| match b {
                b'/' => b'\\',
                _ => b.to_ascii_uppercase(),
            })
            .collect();
        hash_default(&normalized)
    }

    /// Both words packed as `high << 32 | low`.
    pub fn as_u64(&self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }
}

impl From<HashKey> for u64 {
    fn from(key: HashKey) -> Self {
        key.as_u64()
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.as_u64())
    }
}

/// Hash `key` with both seeds set to zero.
pub fn hash_default(key: &[u8]) -> HashKey {
    hash(key, 0, 0)
}

/// Hash `key` with a primary (`seed1`) and secondary (`seed2`) seed.
///
/// An empty key returns the seeded initial state without any mixing.
pub fn hash(key: &[u8], seed1: u32, seed2: u32) -> HashKey {
    let init = GOLDEN
        .wrapping_add(key.len() as u32)
        .wrapping_add(seed1);
    let mut a = init;
    let mut b = init;
    let mut c = init.wrapping_add(seed2);

    if key.is_empty() {
        return HashKey::new(b, c);
    }

    let mut rest = key;
    while rest.len() > 12 {
        a = a.wrapping_add(le_word(&rest[0..4]));
        b = b.wrapping_add(le_word(&rest[4..8]));
        c = c.wrapping_add(le_word(&rest[8..12]));
        mix(&mut a, &mut b, &mut c);
        rest = &rest[12..];
    }

    // 1..=12 trailing bytes; zero padding matches the reference fall-through
    let mut tail = [0u8; 12];
    tail[..rest.len()].copy_from_slice(rest);
    a = a.wrapping_add(le_word(&tail[0..4]));
    b = b.wrapping_add(le_word(&tail[4..8]));
    c = c.wrapping_add(le_word(&tail[8..12]));

    final_mix(&mut a, &mut b, &mut c);

    HashKey::new(b, c)
}

fn le_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);

    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

#[inline]
fn final_mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}
