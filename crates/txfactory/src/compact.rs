// Path: crates/txfactory/src/compact.rs
//! NEO-style compact-integer length prefixing, used by the canonical
//! header and state-root serialisations.

use crate::error::TxFactoryError;

/// Appends `n` as a compact integer.
pub fn write_compact_int(out: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        out.push(n as u8);
    } else if n <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&n.to_le_bytes());
    }
}

/// Appends `data` as a compact-integer-length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, data: &[u8]) {
    write_compact_int(out, data.len() as u64);
    out.extend_from_slice(data);
}

/// A cursor over an encoded buffer, used when decoding canonical payloads.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Wraps `buf` for sequential decoding from the start.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], TxFactoryError> {
        let end = self.pos.checked_add(len).ok_or_else(|| TxFactoryError::Encoding("length overflow".into()))?;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| TxFactoryError::Encoding("unexpected end of buffer".into()))?;
        self.pos = end;
        Ok(slice)
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TxFactoryError> {
        let slice = self.take(N)?;
        slice.try_into().map_err(|_| TxFactoryError::Encoding("array length mismatch".into()))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, TxFactoryError> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, TxFactoryError> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, TxFactoryError> {
        let slice = self.take(1)?;
        slice.first().copied().ok_or_else(|| TxFactoryError::Encoding("unexpected end of buffer".into()))
    }

    /// Reads a compact integer.
    pub fn read_compact_int(&mut self) -> Result<u64, TxFactoryError> {
        let tag = self.read_u8()?;
        match tag {
            0xfd => Ok(u16::from_le_bytes(self.read_array::<2>()?) as u64),
            0xfe => Ok(u32::from_le_bytes(self.read_array::<4>()?) as u64),
            0xff => self.read_u64(),
            n => Ok(n as u64),
        }
    }

    /// Reads a compact-integer-length-prefixed byte string.
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, TxFactoryError> {
        let len = self.read_compact_int()?;
        let len = usize::try_from(len).map_err(|_| TxFactoryError::Encoding("length does not fit in usize".into()))?;
        Ok(self.take(len)?.to_vec())
    }

    /// Returns whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_int_is_one_byte() {
        let mut out = Vec::new();
        write_compact_int(&mut out, 42);
        assert_eq!(out, vec![42]);
    }

    #[test]
    fn boundary_int_uses_u16_prefix() {
        let mut out = Vec::new();
        write_compact_int(&mut out, 0xfd);
        assert_eq!(out, vec![0xfd, 0xfd, 0x00]);
    }

    #[test]
    fn var_bytes_round_trip() {
        let mut out = Vec::new();
        write_var_bytes(&mut out, &[1, 2, 3, 4, 5]);
        let mut reader = Reader::new(&out);
        assert_eq!(reader.read_var_bytes().unwrap(), vec![1, 2, 3, 4, 5]);
        assert!(reader.is_empty());
    }
}
