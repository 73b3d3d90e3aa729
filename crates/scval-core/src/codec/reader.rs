//! Bounds-checked reader over a wire buffer.
//!
//! Every read either consumes exactly the bytes it needs or fails with
//! `MalformedWireData` carrying the offset where the problem was found.

use crate::codec::writer::padding_for;
use crate::errors::{ScvalError, ScvalResult};

#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn error(&self, context: impl Into<String>) -> ScvalError {
        ScvalError::malformed(self.pos, context)
    }

    fn take(&mut self, n: usize, what: &str) -> ScvalResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.error(format!(
                "buffer underrun reading {what}: need {n} bytes, have {}",
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> ScvalResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> ScvalResult<u32> {
        Ok(u32::from_be_bytes(self.take_array("u32")?))
    }

    pub fn read_i32(&mut self) -> ScvalResult<i32> {
        Ok(i32::from_be_bytes(self.take_array("i32")?))
    }

    pub fn read_u64(&mut self) -> ScvalResult<u64> {
        Ok(u64::from_be_bytes(self.take_array("u64")?))
    }

    pub fn read_i64(&mut self) -> ScvalResult<i64> {
        Ok(i64::from_be_bytes(self.take_array("i64")?))
    }

    pub fn read_bool(&mut self) -> ScvalResult<bool> {
        let start = self.pos;
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ScvalError::malformed(
                start,
                format!("invalid bool value {other}"),
            )),
        }
    }

    /// Read a 4-byte count, rejecting counts above `max`.
    pub fn read_len(&mut self, max: u32, what: &str) -> ScvalResult<u32> {
        let start = self.pos;
        let len = self.read_u32()?;
        if len > max {
            return Err(ScvalError::malformed(
                start,
                format!("{what} length {len} exceeds limit {max}"),
            ));
        }
        Ok(len)
    }

    /// Read length-prefixed opaque data and its zero padding.
    pub fn read_var_opaque(&mut self, max: u32, what: &str) -> ScvalResult<Vec<u8>> {
        let len = self.read_len(max, what)? as usize;
        self.read_padded(len, what).map(<[u8]>::to_vec)
    }

    /// Read fixed-length opaque data and its zero padding.
    pub fn read_fixed_opaque<const N: usize>(&mut self, what: &str) -> ScvalResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_padded(N, what)?);
        Ok(out)
    }

    fn read_padded(&mut self, len: usize, what: &str) -> ScvalResult<&'a [u8]> {
        let data = self.take(len, what)?;
        let pad_start = self.pos;
        let pad = self.take(padding_for(len), "padding")?;
        if pad.iter().any(|b| *b != 0) {
            return Err(ScvalError::malformed(
                pad_start,
                format!("non-zero padding after {what}"),
            ));
        }
        Ok(data)
    }

    /// Fail if any bytes are left unread.
    pub fn finish(self) -> ScvalResult<()> {
        if self.remaining() != 0 {
            return Err(self.error(format!("{} trailing bytes", self.remaining())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn underrun_reports_offset() {
        let mut r = WireReader::new(&[0, 0, 0, 1, 0, 0]);
        assert_eq!(r.read_u32().unwrap(), 1);
        let err = r.read_u32().unwrap_err();
        assert_matches!(err, ScvalError::MalformedWireData { offset: 4, .. });
    }

    #[test]
    fn rejects_dirty_padding() {
        let mut r = WireReader::new(&[0, 0, 0, 1, b'x', 0, 1, 0]);
        let err = r.read_var_opaque(10, "bytes").unwrap_err();
        assert_matches!(err, ScvalError::MalformedWireData { offset: 5, .. });
    }

    #[test]
    fn rejects_oversized_length() {
        let mut r = WireReader::new(&[0, 0, 0, 40]);
        assert!(r.read_var_opaque(32, "symbol").is_err());
    }

    #[test]
    fn finish_detects_trailing_bytes() {
        let mut r = WireReader::new(&[0, 0, 0, 0, 9]);
        r.read_u32().unwrap();
        assert!(r.finish().is_err());
    }
}
