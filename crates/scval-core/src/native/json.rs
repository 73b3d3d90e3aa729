//! JSON bridge for native values.
//!
//! Mapping (both directions):
//! - `null`, booleans and strings map to their native counterparts
//! - integral numbers map to `Int` (or `UInt` above `i64::MAX`); floats are rejected
//! - arrays map to `List`
//! - `{"tag": "...", "values": [...]}` (values optional) maps to `Union`
//! - any other object maps to a string-keyed `Map`
//!
//! On the way out, big integers and byte buffers become strings (decimal and
//! `0x`-prefixed hex respectively), results become `{"ok": ..}` / `{"error": ..}`,
//! and maps whose keys are not all distinct strings become arrays of
//! `[key, value]` pairs. Object key order is preserved in both directions.

use serde_json::{Map, Number, Value};

use crate::errors::{ScvalError, ScvalResult};
use crate::native::{NativeValue, UnionValue};

/// Convert an untyped JSON value into a native value.
pub fn from_json(v: &Value) -> ScvalResult<NativeValue> {
    Ok(match v {
        Value::Null => NativeValue::Null,
        Value::Bool(b) => NativeValue::Bool(*b),
        Value::Number(n) => number_to_native(n)?,
        Value::String(s) => NativeValue::String(s.clone()),
        Value::Array(items) => {
            NativeValue::List(items.iter().map(from_json).collect::<ScvalResult<_>>()?)
        }
        Value::Object(obj) => match union_from_object(obj)? {
            Some(u) => NativeValue::Union(u),
            None => NativeValue::Map(
                obj.iter()
                    .map(|(k, v)| Ok((NativeValue::String(k.clone()), from_json(v)?)))
                    .collect::<ScvalResult<_>>()?,
            ),
        },
    })
}

/// Render a native value as JSON.
pub fn to_json(v: &NativeValue) -> Value {
    match v {
        NativeValue::Null => Value::Null,
        NativeValue::Bool(b) => Value::Bool(*b),
        NativeValue::Int(i) => Value::from(*i),
        NativeValue::UInt(u) => Value::from(*u),
        NativeValue::BigInt(b) => Value::String(b.to_string()),
        NativeValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
        NativeValue::String(s) => Value::String(s.clone()),
        NativeValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        NativeValue::Map(pairs) => {
            let mut obj = Map::new();
            let as_object = pairs.iter().all(|(k, v)| match k.as_str() {
                Some(k) if !obj.contains_key(k) => {
                    obj.insert(k.to_string(), to_json(v));
                    true
                }
                _ => false,
            });
            if as_object {
                Value::Object(obj)
            } else {
                Value::Array(
                    pairs
                        .iter()
                        .map(|(k, v)| Value::Array(vec![to_json(k), to_json(v)]))
                        .collect(),
                )
            }
        }
        NativeValue::Union(u) => {
            let mut obj = Map::new();
            obj.insert("tag".into(), Value::String(u.case.clone()));
            if let Some(values) = &u.values {
                obj.insert("values".into(), Value::Array(values.iter().map(to_json).collect()));
            }
            Value::Object(obj)
        }
        NativeValue::Result(r) => {
            let mut obj = Map::new();
            match r.as_ref() {
                Ok(v) => obj.insert("ok".into(), to_json(v)),
                Err(e) => obj.insert("error".into(), to_json(e)),
            };
            Value::Object(obj)
        }
    }
}

fn number_to_native(n: &Number) -> ScvalResult<NativeValue> {
    if let Some(i) = n.as_i64() {
        Ok(NativeValue::Int(i))
    } else if let Some(u) = n.as_u64() {
        Ok(NativeValue::UInt(u))
    } else {
        Err(ScvalError::conversion_failed(format!(
            "non-integral number {n} has no native form"
        )))
    }
}

fn union_from_object(obj: &Map<String, Value>) -> ScvalResult<Option<UnionValue>> {
    let Some(Value::String(tag)) = obj.get("tag") else {
        return Ok(None);
    };
    match (obj.len(), obj.get("values")) {
        (1, None) => Ok(Some(UnionValue::void(tag.clone()))),
        (2, Some(Value::Array(values))) => Ok(Some(UnionValue::tuple(
            tag.clone(),
            values.iter().map(from_json).collect::<ScvalResult<_>>()?,
        ))),
        _ => Ok(None),
    }
}
