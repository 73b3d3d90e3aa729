//! Scalar conversions: integers, bytes, symbols, addresses and error values.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::address::parse_address;
use crate::errors::{ScvalError, ScvalResult};
use crate::native::NativeValue;
use crate::spec::TypeNode;
use crate::wire::{
    is_valid_symbol, Int128Parts, Int256Parts, ScError, ScErrorType, UInt128Parts, UInt256Parts,
    WireValue,
};

use super::{mismatch, wire_mismatch};

/// Integer input for `node`. 128/256-bit kinds also take decimal strings.
fn integer_input(value: &NativeValue, node: &TypeNode, width: u16) -> ScvalResult<BigInt> {
    if let Some(v) = value.as_bigint() {
        return Ok(v);
    }
    match value {
        NativeValue::String(s) if width >= 128 => s
            .trim()
            .parse::<BigInt>()
            .map_err(|_| ScvalError::type_mismatch(node, format!("string {s:?}"))),
        _ => Err(mismatch(node, value)),
    }
}

pub(super) fn int_to_wire(value: &NativeValue, node: &TypeNode) -> ScvalResult<WireValue> {
    let Some((width, _)) = node.integer_width() else {
        return Err(mismatch(node, value));
    };
    let v = integer_input(value, node, width)?;
    let range = || ScvalError::out_of_range(width, &v);

    Ok(match node {
        TypeNode::U32 => WireValue::U32(v.to_u32().ok_or_else(range)?),
        TypeNode::I32 => WireValue::I32(v.to_i32().ok_or_else(range)?),
        TypeNode::U64 => WireValue::U64(v.to_u64().ok_or_else(range)?),
        TypeNode::I64 => WireValue::I64(v.to_i64().ok_or_else(range)?),
        TypeNode::Timepoint => WireValue::Timepoint(v.to_u64().ok_or_else(range)?),
        TypeNode::Duration => WireValue::Duration(v.to_u64().ok_or_else(range)?),
        TypeNode::U128 => WireValue::U128(UInt128Parts::from_bigint(&v)?),
        TypeNode::I128 => WireValue::I128(Int128Parts::from_bigint(&v)?),
        TypeNode::U256 => WireValue::U256(UInt256Parts::from_bigint(&v)?),
        TypeNode::I256 => WireValue::I256(Int256Parts::from_bigint(&v)?),
        _ => return Err(mismatch(node, value)),
    })
}

pub(super) fn int_to_native(value: &WireValue, node: &TypeNode) -> ScvalResult<NativeValue> {
    Ok(match (node, value) {
        (TypeNode::U32, WireValue::U32(v)) => NativeValue::UInt((*v).into()),
        (TypeNode::I32, WireValue::I32(v)) => NativeValue::Int((*v).into()),
        (TypeNode::U64, WireValue::U64(v))
        | (TypeNode::Timepoint, WireValue::Timepoint(v))
        | (TypeNode::Duration, WireValue::Duration(v)) => NativeValue::UInt(*v),
        (TypeNode::I64, WireValue::I64(v)) => NativeValue::Int(*v),
        (TypeNode::U128, WireValue::U128(p)) => NativeValue::BigInt(p.to_bigint()),
        (TypeNode::I128, WireValue::I128(p)) => NativeValue::BigInt(p.to_bigint()),
        (TypeNode::U256, WireValue::U256(p)) => NativeValue::BigInt(p.to_bigint()),
        (TypeNode::I256, WireValue::I256(p)) => NativeValue::BigInt(p.to_bigint()),
        _ => return Err(wire_mismatch(node, value)),
    })
}

/// Accepts a byte buffer, a list of byte values, or a hex string with an
/// optional `0x` prefix.
pub(super) fn bytes_from_native(value: &NativeValue, node: &TypeNode) -> ScvalResult<Vec<u8>> {
    match value {
        NativeValue::Bytes(b) => Ok(b.clone()),
        NativeValue::List(items) => items
            .iter()
            .map(|item| {
                let v = item.as_bigint().ok_or_else(|| mismatch(node, item))?;
                v.to_u8().ok_or_else(|| ScvalError::out_of_range(8, &v))
            })
            .collect(),
        NativeValue::String(s) => {
            let body = s.strip_prefix("0x").unwrap_or(s);
            hex::decode(body).map_err(|_| ScvalError::type_mismatch(node, format!("string {s:?}")))
        }
        _ => Err(mismatch(node, value)),
    }
}

/// Wire strings need not be UTF-8; invalid ones come back as bytes.
pub(super) fn string_to_native(bytes: &[u8]) -> NativeValue {
    match std::str::from_utf8(bytes) {
        Ok(s) => NativeValue::String(s.to_string()),
        Err(_) => NativeValue::Bytes(bytes.to_vec()),
    }
}

pub(super) fn symbol_to_wire(value: &NativeValue) -> ScvalResult<WireValue> {
    match value {
        NativeValue::String(s) if is_valid_symbol(s) => Ok(WireValue::Symbol(s.clone())),
        NativeValue::String(s) => Err(ScvalError::type_mismatch(
            TypeNode::Symbol,
            format!("string {s:?} (not a valid symbol)"),
        )),
        _ => Err(mismatch(&TypeNode::Symbol, value)),
    }
}

pub(super) fn address_to_wire(value: &NativeValue, node: &TypeNode) -> ScvalResult<WireValue> {
    match value {
        NativeValue::String(s) => parse_address(s).map(WireValue::Address),
        _ => Err(mismatch(node, value)),
    }
}

/// Integers become contract errors; `{case: <ErrorType>, values: [code]}`
/// selects any other category.
pub(super) fn error_to_wire(value: &NativeValue) -> ScvalResult<WireValue> {
    let code_of = |v: &NativeValue| -> ScvalResult<u32> {
        let n = v.as_bigint().ok_or_else(|| mismatch(&TypeNode::Error, v))?;
        n.to_u32().ok_or_else(|| ScvalError::out_of_range(32, &n))
    };

    match value {
        NativeValue::Int(_) | NativeValue::UInt(_) | NativeValue::BigInt(_) => {
            Ok(WireValue::Error(ScError::contract(code_of(value)?)))
        }
        NativeValue::Union(u) => {
            let kind = ScErrorType::parse(&u.case)
                .ok_or_else(|| ScvalError::invalid_union_case("Error", u.case.clone()))?;
            match u.payload() {
                [code] => Ok(WireValue::Error(ScError {
                    kind,
                    code: code_of(code)?,
                })),
                other => Err(ScvalError::type_mismatch(
                    "one error code",
                    format!("{} payload values", other.len()),
                )),
            }
        }
        _ => Err(mismatch(&TypeNode::Error, value)),
    }
}

/// Contract errors decode to their bare code; host errors keep their category.
pub(crate) fn error_to_native(e: &ScError) -> NativeValue {
    match e.kind {
        ScErrorType::Contract => NativeValue::UInt(e.code.into()),
        kind => NativeValue::union_tuple(kind.as_str(), vec![NativeValue::UInt(e.code.into())]),
    }
}
