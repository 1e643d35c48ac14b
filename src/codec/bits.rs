//! LSB-first bit reader used by bit-packed decompression codecs.

use crate::error::{Error, Result};

/// Widest read supported by [`BitReader::read_bits`].
pub const MAX_BITS: u32 = 16;

/// Bit-level cursor over a borrowed byte buffer.
///
/// Source bytes are pulled one at a time into a 32-bit accumulator, each
/// byte landing above the bits already buffered. Reads take bits from the
/// bottom of the accumulator.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    bit_buffer: u32,
    bit_count: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Read the next `count` bits.
    ///
    /// Returns `Ok(None)` when fewer than `count` bits are left; nothing is
    /// consumed in that case, so a narrower read may still succeed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBitCount`] if `count` is zero or above [`MAX_BITS`].
    pub fn read_bits(&mut self, count: u32) -> Result<Option<u32>> {
        if count == 0 || count > MAX_BITS {
            return Err(Error::InvalidBitCount { requested: count });
        }

        if !self.ensure_bits(count) {
            return Ok(None);
        }

        let value = self.bit_buffer & ((1u32 << count) - 1);
        self.bit_buffer >>= count;
        self.bit_count -= count;
        Ok(Some(value))
    }

    /// Next 8 bits without advancing.
    pub fn peek_byte(&mut self) -> Option<u8> {
        if !self.ensure_bits(8) {
            return None;
        }
        Some((self.bit_buffer & 0xFF) as u8)
    }

    /// Pull source bytes until at least `count` bits are buffered.
    ///
    /// Returns false if the buffer runs out first. Bytes pulled before
    /// running out stay buffered. The accumulator holds at most 32 bits, so
    /// counts above 24 always return false.
    pub fn ensure_bits(&mut self, count: u32) -> bool {
        if count > 24 {
            return false;
        }
        while self.bit_count < count {
            let Some(&byte) = self.data.get(self.position) else {
                return false;
            };
            self.bit_buffer |= (byte as u32) << self.bit_count;
            self.bit_count += 8;
            self.position += 1;
        }
        true
    }

    /// Index of the next source byte not yet pulled into the accumulator.
    ///
    /// Lags the logical bit position by any buffered bits.
    pub fn byte_position(&self) -> usize {
        self.position
    }

    /// Bits left, buffered or not.
    pub fn bits_available(&self) -> usize {
        (self.data.len() - self.position) * 8 + self.bit_count as usize
    }

    pub fn is_exhausted(&self) -> bool {
        self.bits_available() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_first() {
        let data = [0b1010_1100, 0b0000_0011];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(2).unwrap(), Some(0b00));
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b011));
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
        assert_eq!(reader.read_bits(2).unwrap(), Some(0b11));
        assert_eq!(reader.read_bits(6).unwrap(), Some(0));
        assert_eq!(reader.read_bits(1).unwrap(), None);
    }

    #[test]
    fn test_cross_byte_read() {
        let data = [0x34, 0x12];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(16).unwrap(), Some(0x1234));
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_exhaustion_does_not_consume() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(9).unwrap(), None);
        assert_eq!(reader.bits_available(), 8);
        assert_eq!(reader.read_bits(8).unwrap(), Some(0xFF));
        assert_eq!(reader.read_bits(1).unwrap(), None);
    }

    #[test]
    fn test_invalid_bit_count() {
        let data = [0u8; 4];
        let mut reader = BitReader::new(&data);
        assert!(matches!(
            reader.read_bits(17),
            Err(Error::InvalidBitCount { requested: 17 })
        ));
        assert!(matches!(
            reader.read_bits(0),
            Err(Error::InvalidBitCount { requested: 0 })
        ));
        // A rejected call leaves the stream untouched
        assert_eq!(reader.byte_position(), 0);
    }

    #[test]
    fn test_peek_byte() {
        let data = [0x0F, 0xF0];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(4).unwrap(), Some(0xF));
        assert_eq!(reader.peek_byte(), Some(0x00));
        assert_eq!(reader.read_bits(4).unwrap(), Some(0x0));
        assert_eq!(reader.peek_byte(), Some(0xF0));
        assert_eq!(reader.read_bits(8).unwrap(), Some(0xF0));
        assert_eq!(reader.peek_byte(), None);
    }

    #[test]
    fn test_byte_position_lags() {
        let data = [1, 2, 3];
        let mut reader = BitReader::new(&data);
        reader.read_bits(1).unwrap();
        assert_eq!(reader.byte_position(), 1);
        reader.read_bits(8).unwrap();
        assert_eq!(reader.byte_position(), 2);
        assert_eq!(reader.bits_available(), 15);
    }

    #[test]
    fn test_empty_buffer() {
        let mut reader = BitReader::new(&[]);
        assert!(reader.is_exhausted());
        assert_eq!(reader.read_bits(1).unwrap(), None);
        assert_eq!(reader.peek_byte(), None);
        assert!(!reader.ensure_bits(1));
    }
}
