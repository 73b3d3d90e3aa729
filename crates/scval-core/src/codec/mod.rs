//! Binary codec for wire values.
//!
//! Layout rules:
//! - integers are big-endian and fixed-width (4 bytes for 32-bit kinds, 8 for
//!   64-bit kinds, two or four 8-byte words for 128/256-bit kinds, high word first)
//! - variable-length data is a 4-byte length, the raw bytes, then zero padding
//!   up to the next multiple of 4
//! - arrays are a 4-byte count followed by the elements in order
//! - unions are a 4-byte tag followed by the tag's payload
//!
//! `Vec` and `Map` payloads are optional on the wire: a 4-byte presence flag
//! precedes the count. The encoder always writes a present payload; a flag of 0
//! decodes to an empty collection.
//!
//! [`to_base64`] / [`from_base64`] wrap the raw buffer for embedding in JSON-RPC
//! bodies.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::LimitsConfig;
use crate::errors::{ScvalError, ScvalResult};
use crate::wire::{
    is_valid_symbol, Int128Parts, Int256Parts, ScAddress, ScError, ScErrorType, UInt128Parts,
    UInt256Parts, WireTag, WireValue, SYMBOL_MAX_LEN,
};

pub mod reader;
pub mod writer;

pub use reader::WireReader;
pub use writer::WireWriter;

const ADDRESS_TYPE_ACCOUNT: u32 = 0;
const ADDRESS_TYPE_CONTRACT: u32 = 1;
const ADDRESS_TYPE_MUXED_ACCOUNT: u32 = 2;
const PUBLIC_KEY_TYPE_ED25519: u32 = 0;

/// Encode a wire value into a flat byte buffer using default limits.
pub fn encode(value: &WireValue) -> ScvalResult<Vec<u8>> {
    encode_with_limits(value, &LimitsConfig::default())
}

/// Encode a wire value under explicit limits.
///
/// Applies the same depth, collection and buffer bounds as
/// [`decode_with_limits`], so every buffer produced here decodes under the
/// same limits.
pub fn encode_with_limits(value: &WireValue, limits: &LimitsConfig) -> ScvalResult<Vec<u8>> {
    let mut w = WireWriter::new();
    write_value(&mut w, value, limits, 0)?;
    if w.len() > limits.max_wire_bytes {
        return Err(ScvalError::conversion_failed(format!(
            "encoding of {} bytes exceeds limit {}",
            w.len(),
            limits.max_wire_bytes
        )));
    }
    Ok(w.into_bytes())
}

/// Decode a wire value using default limits. The whole buffer must be consumed.
pub fn decode(bytes: &[u8]) -> ScvalResult<WireValue> {
    decode_with_limits(bytes, &LimitsConfig::default())
}

/// Decode a wire value under explicit limits. The whole buffer must be consumed.
pub fn decode_with_limits(bytes: &[u8], limits: &LimitsConfig) -> ScvalResult<WireValue> {
    if bytes.len() > limits.max_wire_bytes {
        return Err(ScvalError::malformed(
            0,
            format!(
                "buffer of {} bytes exceeds limit {}",
                bytes.len(),
                limits.max_wire_bytes
            ),
        ));
    }
    let mut r = WireReader::new(bytes);
    let value = read_value(&mut r, limits, 0).map_err(|e| {
        tracing::debug!(error = %e, "wire decode failed");
        e
    })?;
    r.finish()?;
    Ok(value)
}

/// Encode a wire value and wrap it in standard base64.
pub fn to_base64(value: &WireValue) -> ScvalResult<String> {
    to_base64_with_limits(value, &LimitsConfig::default())
}

pub fn to_base64_with_limits(value: &WireValue, limits: &LimitsConfig) -> ScvalResult<String> {
    Ok(STANDARD.encode(encode_with_limits(value, limits)?))
}

/// Decode a base64-wrapped wire value.
pub fn from_base64(s: &str) -> ScvalResult<WireValue> {
    from_base64_with_limits(s, &LimitsConfig::default())
}

pub fn from_base64_with_limits(s: &str, limits: &LimitsConfig) -> ScvalResult<WireValue> {
    let bytes = STANDARD
        .decode(s.trim())
        .map_err(|e| ScvalError::malformed(0, format!("invalid base64: {e}")))?;
    decode_with_limits(&bytes, limits)
}

fn write_value(
    w: &mut WireWriter,
    value: &WireValue,
    limits: &LimitsConfig,
    depth: usize,
) -> ScvalResult<()> {
    if depth >= limits.max_depth {
        return Err(ScvalError::conversion_failed(format!(
            "nesting depth exceeds limit {}",
            limits.max_depth
        )));
    }
    w.write_u32(value.tag() as u32);
    match value {
        WireValue::Bool(b) => w.write_bool(*b),
        WireValue::Void | WireValue::LedgerKeyContractInstance => {}
        WireValue::Error(e) => {
            w.write_u32(e.kind as u32);
            w.write_u32(e.code);
        }
        WireValue::U32(v) => w.write_u32(*v),
        WireValue::I32(v) => w.write_i32(*v),
        WireValue::U64(v) | WireValue::Timepoint(v) | WireValue::Duration(v) => w.write_u64(*v),
        WireValue::I64(v) | WireValue::LedgerKeyNonce(v) => w.write_i64(*v),
        WireValue::U128(p) => {
            w.write_u64(p.hi);
            w.write_u64(p.lo);
        }
        WireValue::I128(p) => {
            w.write_i64(p.hi);
            w.write_u64(p.lo);
        }
        WireValue::U256(p) => {
            w.write_u64(p.hi_hi);
            w.write_u64(p.hi_lo);
            w.write_u64(p.lo_hi);
            w.write_u64(p.lo_lo);
        }
        WireValue::I256(p) => {
            w.write_i64(p.hi_hi);
            w.write_u64(p.hi_lo);
            w.write_u64(p.lo_hi);
            w.write_u64(p.lo_lo);
        }
        WireValue::Bytes(b) | WireValue::String(b) => w.write_var_opaque(b)?,
        WireValue::Symbol(s) => {
            if !is_valid_symbol(s) {
                return Err(ScvalError::conversion_failed(format!(
                    "invalid symbol {s:?}"
                )));
            }
            w.write_var_opaque(s.as_bytes())?;
        }
        WireValue::Vec(items) => {
            check_collection_len(items.len(), limits, "vec")?;
            w.write_bool(true);
            w.write_len(items.len())?;
            for item in items {
                write_value(w, item, limits, depth + 1)?;
            }
        }
        WireValue::Map(pairs) => {
            check_collection_len(pairs.len(), limits, "map")?;
            w.write_bool(true);
            w.write_len(pairs.len())?;
            for (k, v) in pairs {
                write_value(w, k, limits, depth + 1)?;
                write_value(w, v, limits, depth + 1)?;
            }
        }
        WireValue::Address(addr) => write_address(w, addr),
    }
    Ok(())
}

fn check_collection_len(len: usize, limits: &LimitsConfig, what: &str) -> ScvalResult<()> {
    if len > limits.max_collection_len as usize {
        return Err(ScvalError::conversion_failed(format!(
            "{what} length {len} exceeds limit {}",
            limits.max_collection_len
        )));
    }
    Ok(())
}

fn write_address(w: &mut WireWriter, addr: &ScAddress) {
    match addr {
        ScAddress::Account(key) => {
            w.write_u32(ADDRESS_TYPE_ACCOUNT);
            w.write_u32(PUBLIC_KEY_TYPE_ED25519);
            w.write_fixed_opaque(key);
        }
        ScAddress::Contract(id) => {
            w.write_u32(ADDRESS_TYPE_CONTRACT);
            w.write_fixed_opaque(id);
        }
        ScAddress::MuxedAccount { id, ed25519 } => {
            w.write_u32(ADDRESS_TYPE_MUXED_ACCOUNT);
            w.write_u64(*id);
            w.write_fixed_opaque(ed25519);
        }
    }
}

fn read_value(r: &mut WireReader<'_>, limits: &LimitsConfig, depth: usize) -> ScvalResult<WireValue> {
    if depth >= limits.max_depth {
        return Err(r.error(format!("nesting depth exceeds limit {}", limits.max_depth)));
    }

    let tag_offset = r.offset();
    let raw_tag = r.read_u32()?;
    let tag = WireTag::from_u32(raw_tag)
        .ok_or_else(|| ScvalError::malformed(tag_offset, format!("invalid value tag {raw_tag}")))?;

    let value = match tag {
        WireTag::Bool => WireValue::Bool(r.read_bool()?),
        WireTag::Void => WireValue::Void,
        WireTag::Error => {
            let kind_offset = r.offset();
            let raw_kind = r.read_u32()?;
            let kind = ScErrorType::from_u32(raw_kind).ok_or_else(|| {
                ScvalError::malformed(kind_offset, format!("invalid error type {raw_kind}"))
            })?;
            WireValue::Error(ScError {
                kind,
                code: r.read_u32()?,
            })
        }
        WireTag::U32 => WireValue::U32(r.read_u32()?),
        WireTag::I32 => WireValue::I32(r.read_i32()?),
        WireTag::U64 => WireValue::U64(r.read_u64()?),
        WireTag::I64 => WireValue::I64(r.read_i64()?),
        WireTag::Timepoint => WireValue::Timepoint(r.read_u64()?),
        WireTag::Duration => WireValue::Duration(r.read_u64()?),
        WireTag::U128 => WireValue::U128(UInt128Parts {
            hi: r.read_u64()?,
            lo: r.read_u64()?,
        }),
        WireTag::I128 => WireValue::I128(Int128Parts {
            hi: r.read_i64()?,
            lo: r.read_u64()?,
        }),
        WireTag::U256 => WireValue::U256(UInt256Parts {
            hi_hi: r.read_u64()?,
            hi_lo: r.read_u64()?,
            lo_hi: r.read_u64()?,
            lo_lo: r.read_u64()?,
        }),
        WireTag::I256 => WireValue::I256(Int256Parts {
            hi_hi: r.read_i64()?,
            hi_lo: r.read_u64()?,
            lo_hi: r.read_u64()?,
            lo_lo: r.read_u64()?,
        }),
        WireTag::Bytes => WireValue::Bytes(r.read_var_opaque(u32::MAX, "bytes")?),
        WireTag::String => WireValue::String(r.read_var_opaque(u32::MAX, "string")?),
        WireTag::Symbol => {
            let start = r.offset();
            let raw = r.read_var_opaque(SYMBOL_MAX_LEN as u32, "symbol")?;
            let s = String::from_utf8(raw)
                .ok()
                .filter(|s| is_valid_symbol(s))
                .ok_or_else(|| ScvalError::malformed(start, "invalid symbol characters"))?;
            WireValue::Symbol(s)
        }
        WireTag::Vec => {
            let mut items = Vec::new();
            if r.read_bool()? {
                let len = r.read_len(limits.max_collection_len, "vec")?;
                for _ in 0..len {
                    items.push(read_value(r, limits, depth + 1)?);
                }
            }
            WireValue::Vec(items)
        }
        WireTag::Map => {
            let mut pairs = Vec::new();
            if r.read_bool()? {
                let len = r.read_len(limits.max_collection_len, "map")?;
                for _ in 0..len {
                    let k = read_value(r, limits, depth + 1)?;
                    let v = read_value(r, limits, depth + 1)?;
                    pairs.push((k, v));
                }
            }
            WireValue::Map(pairs)
        }
        WireTag::Address => WireValue::Address(read_address(r)?),
        WireTag::ContractInstance => {
            return Err(ScvalError::malformed(
                tag_offset,
                "contract instance values are not supported",
            ))
        }
        WireTag::LedgerKeyContractInstance => WireValue::LedgerKeyContractInstance,
        WireTag::LedgerKeyNonce => WireValue::LedgerKeyNonce(r.read_i64()?),
    };
    Ok(value)
}

fn read_address(r: &mut WireReader<'_>) -> ScvalResult<ScAddress> {
    let start = r.offset();
    match r.read_u32()? {
        ADDRESS_TYPE_ACCOUNT => {
            let key_offset = r.offset();
            let key_type = r.read_u32()?;
            if key_type != PUBLIC_KEY_TYPE_ED25519 {
                return Err(ScvalError::malformed(
                    key_offset,
                    format!("invalid public key type {key_type}"),
                ));
            }
            Ok(ScAddress::Account(r.read_fixed_opaque::<32>("account id")?))
        }
        ADDRESS_TYPE_CONTRACT => Ok(ScAddress::Contract(r.read_fixed_opaque::<32>("contract id")?)),
        ADDRESS_TYPE_MUXED_ACCOUNT => {
            let id = r.read_u64()?;
            let ed25519 = r.read_fixed_opaque::<32>("muxed account key")?;
            Ok(ScAddress::MuxedAccount { id, ed25519 })
        }
        other => Err(ScvalError::malformed(
            start,
            format!("unsupported address type {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn roundtrip(v: WireValue) {
        let bytes = encode(&v).unwrap();
        assert_eq!(bytes.len() % 4, 0, "encoding must stay 4-byte aligned");
        assert_eq!(decode(&bytes).unwrap(), v);
    }

    #[test]
    fn scalar_layouts() {
        assert_eq!(encode(&WireValue::U32(7)).unwrap(), vec![0, 0, 0, 3, 0, 0, 0, 7]);
        assert_eq!(encode(&WireValue::Void).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(
            encode(&WireValue::Bool(true)).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(
            encode(&WireValue::symbol("abc")).unwrap(),
            vec![0, 0, 0, 15, 0, 0, 0, 3, b'a', b'b', b'c', 0]
        );
    }

    #[test]
    fn u128_is_two_words_high_first() {
        let v = WireValue::U128(UInt128Parts::from(u128::MAX - 1));
        let bytes = encode(&v).unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 9]);
        assert_eq!(&bytes[4..12], &[0xff; 8]);
        assert_eq!(&bytes[12..20], &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
    }

    #[test]
    fn nested_values_roundtrip() {
        roundtrip(WireValue::Vec(vec![
            WireValue::symbol("Pair"),
            WireValue::I32(-1),
            WireValue::Map(vec![
                (WireValue::symbol("a"), WireValue::Bytes(vec![1, 2, 3])),
                (WireValue::U64(9), WireValue::string("hello")),
            ]),
        ]));
        roundtrip(WireValue::Vec(vec![]));
        roundtrip(WireValue::Address(ScAddress::MuxedAccount {
            id: 42,
            ed25519: [7; 32],
        }));
        roundtrip(WireValue::Address(ScAddress::Account([1; 32])));
        roundtrip(WireValue::Address(ScAddress::Contract([2; 32])));
        roundtrip(WireValue::Error(ScError::contract(3)));
        roundtrip(WireValue::I256(Int256Parts::from_bigint(&(-num_bigint::BigInt::from(5))).unwrap()));
        roundtrip(WireValue::LedgerKeyNonce(-4));
        roundtrip(WireValue::LedgerKeyContractInstance);
    }

    #[test]
    fn absent_vec_decodes_empty() {
        let bytes = [0, 0, 0, 16, 0, 0, 0, 0];
        assert_eq!(decode(&bytes).unwrap(), WireValue::Vec(vec![]));
    }

    #[test]
    fn invalid_tag_is_malformed() {
        let err = decode(&[0, 0, 0, 99]).unwrap_err();
        assert_matches!(err, ScvalError::MalformedWireData { offset: 0, .. });
    }

    #[test]
    fn truncated_buffer_is_malformed() {
        let mut bytes = encode(&WireValue::U64(5)).unwrap();
        bytes.truncate(6);
        assert_matches!(decode(&bytes), Err(ScvalError::MalformedWireData { .. }));
    }

    #[test]
    fn contract_instance_is_rejected() {
        assert_matches!(
            decode(&[0, 0, 0, 19]),
            Err(ScvalError::MalformedWireData { .. })
        );
    }

    #[test]
    fn invalid_symbol_refuses_to_encode() {
        assert_matches!(
            encode(&WireValue::symbol("no spaces")),
            Err(ScvalError::ConversionFailed(_))
        );
    }

    #[test]
    fn depth_limit_applies_to_decode() {
        let mut v = WireValue::Void;
        for _ in 0..10 {
            v = WireValue::Vec(vec![v]);
        }
        let bytes = encode(&v).unwrap();
        let limits = LimitsConfig::default().with_max_depth(5);
        assert_matches!(
            decode_with_limits(&bytes, &limits),
            Err(ScvalError::MalformedWireData { .. })
        );
        assert_eq!(decode(&bytes).unwrap(), v);
    }

    #[test]
    fn encode_and_decode_share_the_depth_bound() {
        let nest = |levels: usize| {
            let mut v = WireValue::Void;
            for _ in 1..levels {
                v = WireValue::Vec(vec![v]);
            }
            v
        };
        let limits = LimitsConfig::default();

        let deepest = nest(limits.max_depth);
        let bytes = encode(&deepest).unwrap();
        assert_eq!(decode(&bytes).unwrap(), deepest);

        assert_matches!(
            encode(&nest(limits.max_depth + 1)),
            Err(ScvalError::ConversionFailed(_))
        );
        assert_matches!(encode(&nest(200)), Err(ScvalError::ConversionFailed(_)));
    }

    #[test]
    fn encode_respects_collection_limit() {
        let limits = LimitsConfig {
            max_collection_len: 2,
            ..LimitsConfig::default()
        };
        let ok = WireValue::Vec(vec![WireValue::U32(1), WireValue::U32(2)]);
        let bytes = encode_with_limits(&ok, &limits).unwrap();
        assert_eq!(decode_with_limits(&bytes, &limits).unwrap(), ok);

        let too_long = WireValue::Map(vec![
            (WireValue::U32(1), WireValue::Void),
            (WireValue::U32(2), WireValue::Void),
            (WireValue::U32(3), WireValue::Void),
        ]);
        assert_matches!(
            encode_with_limits(&too_long, &limits),
            Err(ScvalError::ConversionFailed(_))
        );
    }

    #[test]
    fn collection_limit_applies_before_allocation() {
        // Vec claiming u32::MAX elements.
        let bytes = [0, 0, 0, 16, 0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff];
        assert_matches!(decode(&bytes), Err(ScvalError::MalformedWireData { offset: 8, .. }));
    }

    #[test]
    fn base64_transport() {
        let v = WireValue::U32(1);
        let s = to_base64(&v).unwrap();
        assert_eq!(s, "AAAAAwAAAAE=");
        assert_eq!(from_base64(&s).unwrap(), v);
        assert_matches!(from_base64("not base64!"), Err(ScvalError::MalformedWireData { .. }));
    }
}
