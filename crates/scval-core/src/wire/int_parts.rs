//! Half-word layouts for 128- and 256-bit integers.
//!
//! The wire format carries wide integers as two or four consecutive 64-bit
//! big-endian words, high-order word first. The conversions here are pure and
//! independent of the rest of the codec.

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use crate::errors::{ScvalError, ScvalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UInt256Parts {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int256Parts {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl From<u128> for UInt128Parts {
    fn from(v: u128) -> Self {
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

impl From<UInt128Parts> for u128 {
    fn from(p: UInt128Parts) -> Self {
        (u128::from(p.hi) << 64) | u128::from(p.lo)
    }
}

impl From<i128> for Int128Parts {
    fn from(v: i128) -> Self {
        Self {
            hi: (v >> 64) as i64,
            lo: v as u64,
        }
    }
}

impl From<Int128Parts> for i128 {
    fn from(p: Int128Parts) -> Self {
        (i128::from(p.hi) << 64) | i128::from(p.lo)
    }
}

impl UInt128Parts {
    pub fn to_bigint(self) -> BigInt {
        BigInt::from(u128::from(self))
    }

    pub fn from_bigint(v: &BigInt) -> ScvalResult<Self> {
        v.to_u128()
            .map(Self::from)
            .ok_or_else(|| ScvalError::out_of_range(128, v))
    }
}

impl Int128Parts {
    pub fn to_bigint(self) -> BigInt {
        BigInt::from(i128::from(self))
    }

    pub fn from_bigint(v: &BigInt) -> ScvalResult<Self> {
        v.to_i128()
            .map(Self::from)
            .ok_or_else(|| ScvalError::out_of_range(128, v))
    }
}

impl UInt256Parts {
    pub fn to_be_bytes(self) -> [u8; 32] {
        words_to_bytes([self.hi_hi, self.hi_lo, self.lo_hi, self.lo_lo])
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let [hi_hi, hi_lo, lo_hi, lo_lo] = bytes_to_words(bytes);
        Self {
            hi_hi,
            hi_lo,
            lo_hi,
            lo_lo,
        }
    }

    pub fn to_bigint(self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.to_be_bytes())
    }

    pub fn from_bigint(v: &BigInt) -> ScvalResult<Self> {
        if v.sign() == Sign::Minus || v.bits() > 256 {
            return Err(ScvalError::out_of_range(256, v));
        }
        let (_, magnitude) = v.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - magnitude.len()..].copy_from_slice(&magnitude);
        Ok(Self::from_be_bytes(bytes))
    }
}

impl Int256Parts {
    pub fn to_be_bytes(self) -> [u8; 32] {
        words_to_bytes([self.hi_hi as u64, self.hi_lo, self.lo_hi, self.lo_lo])
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let [hi_hi, hi_lo, lo_hi, lo_lo] = bytes_to_words(bytes);
        Self {
            hi_hi: hi_hi as i64,
            hi_lo,
            lo_hi,
            lo_lo,
        }
    }

    pub fn to_bigint(self) -> BigInt {
        BigInt::from_signed_bytes_be(&self.to_be_bytes())
    }

    pub fn from_bigint(v: &BigInt) -> ScvalResult<Self> {
        // Minimal two's complement; anything wider than 32 bytes cannot fit.
        let signed = v.to_signed_bytes_be();
        if signed.len() > 32 {
            return Err(ScvalError::out_of_range(256, v));
        }
        let fill = if v.sign() == Sign::Minus { 0xff } else { 0x00 };
        let mut bytes = [fill; 32];
        bytes[32 - signed.len()..].copy_from_slice(&signed);
        Ok(Self::from_be_bytes(bytes))
    }
}

fn words_to_bytes(words: [u64; 4]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

fn bytes_to_words(bytes: [u8; 32]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_be_bytes(buf);
    }
    words
}
