//! Big-endian, 4-byte aligned writer.

use crate::errors::{ScvalError, ScvalResult};

/// Append-only output buffer for wire encoding.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(u32::from(v));
    }

    /// Write a 4-byte element count.
    pub fn write_len(&mut self, len: usize) -> ScvalResult<()> {
        let len = u32::try_from(len).map_err(|_| {
            ScvalError::conversion_failed(format!("length {len} does not fit in 32 bits"))
        })?;
        self.write_u32(len);
        Ok(())
    }

    /// Write length-prefixed opaque data, zero-padded to a multiple of 4.
    pub fn write_var_opaque(&mut self, data: &[u8]) -> ScvalResult<()> {
        self.write_len(data.len())?;
        self.write_fixed_opaque(data);
        Ok(())
    }

    /// Write fixed-length opaque data, zero-padded to a multiple of 4.
    pub fn write_fixed_opaque(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        let pad = padding_for(data.len());
        self.buf.extend(std::iter::repeat(0u8).take(pad));
    }
}

/// Number of zero bytes that follow `len` bytes of opaque data.
pub fn padding_for(len: usize) -> usize {
    (4 - len % 4) % 4
}
