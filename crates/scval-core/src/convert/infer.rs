//! Untyped (`Val`) conversion by shape inference.

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use crate::address::format_address;
use crate::errors::ScvalResult;
use crate::native::NativeValue;
use crate::spec::TypeNode;
use crate::wire::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts, WireValue};

use super::{scalar, Converter};

/// Pick the narrowest 128/256-bit kind that holds `v`.
fn big_to_wire(v: &BigInt) -> ScvalResult<WireValue> {
    if v.sign() == Sign::Minus {
        match v.to_i128() {
            Some(_) => Int128Parts::from_bigint(v).map(WireValue::I128),
            None => Int256Parts::from_bigint(v).map(WireValue::I256),
        }
    } else {
        match v.to_u128() {
            Some(_) => UInt128Parts::from_bigint(v).map(WireValue::U128),
            None => UInt256Parts::from_bigint(v).map(WireValue::U256),
        }
    }
}

pub(super) fn to_wire(
    conv: &Converter<'_>,
    value: &NativeValue,
    depth: usize,
) -> ScvalResult<WireValue> {
    let val = TypeNode::Val;
    Ok(match value {
        NativeValue::Null => WireValue::Void,
        NativeValue::Bool(b) => WireValue::Bool(*b),
        NativeValue::Int(i) => WireValue::I64(*i),
        NativeValue::UInt(u) => WireValue::U64(*u),
        NativeValue::BigInt(b) => big_to_wire(b)?,
        NativeValue::Bytes(b) => WireValue::Bytes(b.clone()),
        NativeValue::String(s) => WireValue::String(s.clone().into_bytes()),
        NativeValue::List(items) => WireValue::Vec(
            items
                .iter()
                .map(|item| conv.to_wire(item, &val, depth))
                .collect::<ScvalResult<_>>()?,
        ),
        NativeValue::Map(pairs) => WireValue::Map(
            pairs
                .iter()
                .map(|(k, v)| Ok((conv.to_wire(k, &val, depth)?, conv.to_wire(v, &val, depth)?)))
                .collect::<ScvalResult<_>>()?,
        ),
        NativeValue::Union(u) => {
            let mut items = Vec::with_capacity(u.payload().len() + 1);
            items.push(scalar::symbol_to_wire(&NativeValue::String(u.case.clone()))?);
            for v in u.payload() {
                items.push(conv.to_wire(v, &val, depth)?);
            }
            WireValue::Vec(items)
        }
        NativeValue::Result(r) => match r.as_ref() {
            Ok(v) => conv.to_wire(v, &val, depth)?,
            Err(e) => conv.to_wire(e, &TypeNode::Error, depth)?,
        },
    })
}

pub(super) fn to_native(
    conv: &Converter<'_>,
    value: &WireValue,
    depth: usize,
) -> ScvalResult<NativeValue> {
    let val = TypeNode::Val;
    Ok(match value {
        WireValue::Bool(b) => NativeValue::Bool(*b),
        WireValue::Void => NativeValue::Null,
        WireValue::Error(e) => scalar::error_to_native(e),
        WireValue::U32(v) => NativeValue::UInt((*v).into()),
        WireValue::I32(v) => NativeValue::Int((*v).into()),
        WireValue::U64(v) | WireValue::Timepoint(v) | WireValue::Duration(v) => NativeValue::UInt(*v),
        WireValue::I64(v) => NativeValue::Int(*v),
        WireValue::U128(p) => NativeValue::BigInt(p.to_bigint()),
        WireValue::I128(p) => NativeValue::BigInt(p.to_bigint()),
        WireValue::U256(p) => NativeValue::BigInt(p.to_bigint()),
        WireValue::I256(p) => NativeValue::BigInt(p.to_bigint()),
        WireValue::Bytes(b) => NativeValue::Bytes(b.clone()),
        WireValue::String(b) => scalar::string_to_native(b),
        WireValue::Symbol(s) => NativeValue::String(s.clone()),
        WireValue::Vec(items) => NativeValue::List(
            items
                .iter()
                .map(|item| conv.to_native(item, &val, depth))
                .collect::<ScvalResult<_>>()?,
        ),
        WireValue::Map(pairs) => NativeValue::Map(
            pairs
                .iter()
                .map(|(k, v)| Ok((conv.to_native(k, &val, depth)?, conv.to_native(v, &val, depth)?)))
                .collect::<ScvalResult<_>>()?,
        ),
        WireValue::Address(a) => NativeValue::String(format_address(a)),
        WireValue::LedgerKeyContractInstance => NativeValue::union_void("LedgerKeyContractInstance"),
        WireValue::LedgerKeyNonce(n) => {
            NativeValue::union_tuple("LedgerKeyNonce", vec![NativeValue::Int(*n)])
        }
    })
}
