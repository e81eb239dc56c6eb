use std::io::{self, Read, Seek, SeekFrom};

pub struct LittleEndianReader<R> {
    inner: R,
}

impl<R: Read + Seek> LittleEndianReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a length-prefixed string: 4-byte little-endian length followed by
    /// that many bytes, one character per byte (no terminator). Bytes map to
    /// chars 1:1 so any byte value survives a read/write round trip.
    pub fn read_string(&mut self) -> io::Result<String> {
        let len = self.read_u32()? as usize;
        let remaining = (self.len()? - self.position()?) as usize;
        if len > remaining {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("string length {len} exceeds remaining {remaining} bytes"),
            ));
        }
        let bytes = self.read_bytes(len)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Read a string and fail unless it equals `expected` exactly. The format
    /// guarantees literal field-name tags; a mismatch means the file is
    /// unparseable, not merely unexpected.
    pub fn expect_string(&mut self, expected: &str) -> io::Result<()> {
        let pos = self.position()?;
        let found = self.read_string()?;
        if found != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected tag {expected:?} at pos={pos}, found {found:?}"),
            ));
        }
        Ok(())
    }

    pub fn skip(&mut self, n: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Current(n as i64))?;
        Ok(())
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub fn len(&mut self) -> io::Result<u64> {
        let cur = self.position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(cur))?;
        Ok(end)
    }

    pub fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }
}

// Writer-side counterparts. Encoding always targets a fresh Vec<u8>; the
// loaded buffer is never mutated in place.

pub fn push_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write a length-prefixed string: 4-byte little-endian length, then one byte
/// per character. Characters above U+00FF cannot appear in save data and are
/// truncated to their low byte.
pub fn push_string(out: &mut Vec<u8>, text: &str) {
    push_u32(out, text.chars().count() as u32);
    out.extend(text.chars().map(|c| c as u8));
}
