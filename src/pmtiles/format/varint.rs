//! Unsigned LEB128 variable-length integers.
//!
//! Directory columns are stored as runs of varints: seven payload bits per
//! byte, least-significant group first, high bit set on every byte but the last.

use crate::pmtiles::types::error::{DirectoryError, Result};

/// Cursor over a varint-encoded byte buffer.
#[derive(Debug, Clone)]
pub struct VarintReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> VarintReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read a varint that must fit in 32 bits.
    pub fn read_var_u32(&mut self) -> Result<u32> {
        let start = self.pos;
        let value = self.read_var_u64()?;
        u32::try_from(value).map_err(|_| DirectoryError::MalformedVarint { position: start })
    }

    /// Read a varint of up to 64 bits (at most 10 bytes).
    pub fn read_var_u64(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or(DirectoryError::TruncatedInput { position: self.pos })?;
            self.pos += 1;

            let payload = (byte & 0x7F) as u64;
            // The tenth byte may only carry the single remaining bit
            if shift >= 63 && payload > 1 {
                return Err(DirectoryError::MalformedVarint { position: start });
            }
            result |= payload << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            // No continuation allowed past the tenth byte
            if shift >= 63 {
                return Err(DirectoryError::MalformedVarint { position: start });
            }
            shift += 7;
        }
    }
}

/// Append `value` to `buf` as an unsigned LEB128 varint.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_multi_byte_values() {
        // 300 = 0b1_0010_1100
        let mut reader = VarintReader::new(&[0xAC, 0x02, 0x05]);
        assert_eq!(reader.read_var_u64().unwrap(), 300);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_var_u32().unwrap(), 5);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_encoder_matches_reader_at_width_edges() {
        let mut buf = Vec::new();
        for value in [0, 127, 128, u32::MAX as u64, u64::MAX] {
            encode_varint(value, &mut buf);
        }
        assert_eq!(buf.len(), 1 + 1 + 2 + 5 + 10);

        let mut reader = VarintReader::new(&buf);
        assert_eq!(reader.read_var_u64().unwrap(), 0);
        assert_eq!(reader.read_var_u64().unwrap(), 127);
        assert_eq!(reader.read_var_u64().unwrap(), 128);
        assert_eq!(reader.read_var_u32().unwrap(), u32::MAX);
        assert_eq!(reader.read_var_u64().unwrap(), u64::MAX);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_eof_mid_varint() {
        let mut reader = VarintReader::new(&[0x80, 0x80]);
        match reader.read_var_u64() {
            Err(DirectoryError::TruncatedInput { position }) => assert_eq!(position, 2),
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
        assert!(matches!(
            VarintReader::new(&[]).read_var_u64(),
            Err(DirectoryError::TruncatedInput { position: 0 })
        ));
    }

    #[test]
    fn test_overlong_varint_rejected() {
        let mut bytes = vec![0xFF; 9];
        bytes.push(0x02);
        assert!(matches!(
            VarintReader::new(&bytes).read_var_u64(),
            Err(DirectoryError::MalformedVarint { position: 0 })
        ));

        let mut buf = Vec::new();
        encode_varint(u32::MAX as u64 + 1, &mut buf);
        assert!(matches!(
            VarintReader::new(&buf).read_var_u32(),
            Err(DirectoryError::MalformedVarint { position: 0 })
        ));
    }

    #[test]
    fn test_continuation_past_tenth_byte_rejected() {
        let mut bytes = vec![0x80; 10];
        bytes.push(0x00);
        let mut reader = VarintReader::new(&bytes);
        assert!(matches!(
            reader.read_var_u64(),
            Err(DirectoryError::MalformedVarint { position: 0 })
        ));
        assert_eq!(reader.position(), 10);
    }
}
