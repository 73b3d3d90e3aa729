//! Type-directed conversion between native values and wire values.
//!
//! Both directions dispatch on a [`TypeNode`]:
//! - scalar kinds validate kind and range ([`scalar`])
//! - composites (Option, Result, Vec, Map, Tuple) recurse here
//! - user-defined references resolve by name through the [`ContractSpec`] ([`udt`])
//! - `Val` nodes fall back to shape inference ([`infer`])
//!
//! A null native value encodes to `Void` and a `Void` wire value decodes to
//! null at any node except `Result`. There `Void` decodes to `Ok(null)`, so a
//! bare null is refused and the ok branch must be explicit (`Ok(null)` or
//! `{"ok": null}`). Struct fields also refuse null; see [`udt`].
//!
//! Recursion is bounded by [`LimitsConfig::max_depth`]; exceeding it fails with
//! `ConversionFailed` instead of exhausting the stack on recursive type graphs.

use crate::config::LimitsConfig;
use crate::errors::{ScvalError, ScvalResult};
use crate::native::NativeValue;
use crate::spec::{ContractSpec, TypeNode};
use crate::wire::WireValue;

mod infer;
mod scalar;
mod udt;

/// A converter bound to one contract specification and a set of limits.
///
/// Cheap to construct; holds only borrows and a copy of the limits.
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    spec: &'a ContractSpec,
    limits: LimitsConfig,
}

impl<'a> Converter<'a> {
    pub fn new(spec: &'a ContractSpec) -> Self {
        Self::with_limits(spec, LimitsConfig::default())
    }

    pub fn with_limits(spec: &'a ContractSpec, limits: LimitsConfig) -> Self {
        Self { spec, limits }
    }

    pub fn spec(&self) -> &'a ContractSpec {
        self.spec
    }

    /// Convert a native value into a wire value of type `node`.
    pub fn native_to_wire(&self, value: &NativeValue, node: &TypeNode) -> ScvalResult<WireValue> {
        self.to_wire(value, node, 0)
    }

    /// Convert a wire value of type `node` into a native value.
    pub fn wire_to_native(&self, value: &WireValue, node: &TypeNode) -> ScvalResult<NativeValue> {
        self.to_native(value, node, 0)
    }

    fn enter(&self, depth: usize) -> ScvalResult<usize> {
        if depth >= self.limits.max_depth {
            return Err(ScvalError::conversion_failed(format!(
                "maximum nesting depth {} exceeded",
                self.limits.max_depth
            )));
        }
        Ok(depth + 1)
    }

    pub(crate) fn to_wire(
        &self,
        value: &NativeValue,
        node: &TypeNode,
        depth: usize,
    ) -> ScvalResult<WireValue> {
        let depth = self.enter(depth)?;

        if value.is_null() && !matches!(node, TypeNode::Result { .. }) {
            return Ok(WireValue::Void);
        }

        match node {
            TypeNode::Val => infer::to_wire(self, value, depth),
            TypeNode::Void => Err(mismatch(node, value)),
            TypeNode::Bool => match value {
                NativeValue::Bool(b) => Ok(WireValue::Bool(*b)),
                _ => Err(mismatch(node, value)),
            },
            TypeNode::Error => scalar::error_to_wire(value),
            TypeNode::U32
            | TypeNode::I32
            | TypeNode::U64
            | TypeNode::I64
            | TypeNode::Timepoint
            | TypeNode::Duration
            | TypeNode::U128
            | TypeNode::I128
            | TypeNode::U256
            | TypeNode::I256 => scalar::int_to_wire(value, node),
            TypeNode::Bytes => scalar::bytes_from_native(value, node).map(WireValue::Bytes),
            TypeNode::FixedBytes(n) => {
                let bytes = scalar::bytes_from_native(value, node)?;
                if bytes.len() != *n as usize {
                    return Err(ScvalError::type_mismatch(
                        node,
                        format!("{} bytes", bytes.len()),
                    ));
                }
                Ok(WireValue::Bytes(bytes))
            }
            TypeNode::String => match value {
                NativeValue::String(s) => Ok(WireValue::String(s.clone().into_bytes())),
                NativeValue::Bytes(b) => Ok(WireValue::String(b.clone())),
                _ => Err(mismatch(node, value)),
            },
            TypeNode::Symbol => scalar::symbol_to_wire(value),
            TypeNode::Address | TypeNode::MuxedAddress => scalar::address_to_wire(value, node),
            TypeNode::Option(inner) => self.to_wire(value, inner, depth),
            TypeNode::Result { ok, error } => self.result_to_wire(value, ok, error, depth),
            TypeNode::Vec(elem) => match value {
                NativeValue::List(items) => items
                    .iter()
                    .map(|item| self.to_wire(item, elem, depth))
                    .collect::<ScvalResult<Vec<_>>>()
                    .map(WireValue::Vec),
                _ => Err(mismatch(node, value)),
            },
            TypeNode::Map { key, value: val } => self.map_to_wire(value, node, key, val, depth),
            TypeNode::Tuple(elems) => match value {
                NativeValue::List(items) if items.len() == elems.len() => items
                    .iter()
                    .zip(elems)
                    .map(|(item, t)| self.to_wire(item, t, depth))
                    .collect::<ScvalResult<Vec<_>>>()
                    .map(WireValue::Vec),
                NativeValue::List(items) => Err(ScvalError::type_mismatch(
                    node,
                    format!("list of {} elements", items.len()),
                )),
                _ => Err(mismatch(node, value)),
            },
            TypeNode::UserDefined(name) => udt::to_wire(self, name, value, depth),
        }
    }

    pub(crate) fn to_native(
        &self,
        value: &WireValue,
        node: &TypeNode,
        depth: usize,
    ) -> ScvalResult<NativeValue> {
        let depth = self.enter(depth)?;

        if matches!(value, WireValue::Void) && !matches!(node, TypeNode::Result { .. }) {
            return Ok(NativeValue::Null);
        }

        match node {
            TypeNode::Val => infer::to_native(self, value, depth),
            TypeNode::Void => Err(wire_mismatch(node, value)),
            TypeNode::Bool => match value {
                WireValue::Bool(b) => Ok(NativeValue::Bool(*b)),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Error => match value {
                WireValue::Error(e) => Ok(scalar::error_to_native(e)),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::U32
            | TypeNode::I32
            | TypeNode::U64
            | TypeNode::I64
            | TypeNode::Timepoint
            | TypeNode::Duration
            | TypeNode::U128
            | TypeNode::I128
            | TypeNode::U256
            | TypeNode::I256 => scalar::int_to_native(value, node),
            TypeNode::Bytes => match value {
                WireValue::Bytes(b) => Ok(NativeValue::Bytes(b.clone())),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::FixedBytes(n) => match value {
                WireValue::Bytes(b) if b.len() == *n as usize => Ok(NativeValue::Bytes(b.clone())),
                WireValue::Bytes(b) => Err(ScvalError::type_mismatch(
                    node,
                    format!("{} bytes", b.len()),
                )),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::String => match value {
                WireValue::String(b) => Ok(scalar::string_to_native(b)),
                WireValue::Symbol(s) => Ok(NativeValue::String(s.clone())),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Symbol => match value {
                WireValue::Symbol(s) => Ok(NativeValue::String(s.clone())),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Address | TypeNode::MuxedAddress => match value {
                WireValue::Address(a) => Ok(NativeValue::String(crate::address::format_address(a))),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Option(inner) => self.to_native(value, inner, depth),
            TypeNode::Result { ok, error } => match value {
                WireValue::Error(_) => Ok(NativeValue::err(self.to_native(value, error, depth)?)),
                _ => Ok(NativeValue::ok(self.to_native(value, ok, depth)?)),
            },
            TypeNode::Vec(elem) => match value {
                WireValue::Vec(items) => items
                    .iter()
                    .map(|item| self.to_native(item, elem, depth))
                    .collect::<ScvalResult<Vec<_>>>()
                    .map(NativeValue::List),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Map { key, value: val } => match value {
                WireValue::Map(pairs) => pairs
                    .iter()
                    .map(|(k, v)| Ok((self.to_native(k, key, depth)?, self.to_native(v, val, depth)?)))
                    .collect::<ScvalResult<Vec<_>>>()
                    .map(NativeValue::Map),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::Tuple(elems) => match value {
                WireValue::Vec(items) if items.len() == elems.len() => items
                    .iter()
                    .zip(elems)
                    .map(|(item, t)| self.to_native(item, t, depth))
                    .collect::<ScvalResult<Vec<_>>>()
                    .map(NativeValue::List),
                WireValue::Vec(items) => Err(ScvalError::type_mismatch(
                    node,
                    format!("Vec of {} elements", items.len()),
                )),
                _ => Err(wire_mismatch(node, value)),
            },
            TypeNode::UserDefined(name) => udt::to_native(self, name, value, depth),
        }
    }

    fn result_to_wire(
        &self,
        value: &NativeValue,
        ok: &TypeNode,
        error: &TypeNode,
        depth: usize,
    ) -> ScvalResult<WireValue> {
        match value {
            NativeValue::Result(r) => match r.as_ref() {
                Ok(v) => self.to_wire(v, ok, depth),
                Err(e) => self.to_wire(e, error, depth),
            },
            NativeValue::Map(pairs) if pairs.len() == 1 => {
                let (k, v) = &pairs[0];
                match k.as_str() {
                    Some("ok") => self.to_wire(v, ok, depth),
                    Some("error") => self.to_wire(v, error, depth),
                    _ => Err(ScvalError::type_mismatch(
                        "result with an \"ok\" or \"error\" key",
                        format!("map with key {k}"),
                    )),
                }
            }
            _ => Err(ScvalError::type_mismatch(
                TypeNode::result(ok.clone(), error.clone()),
                value.kind(),
            )),
        }
    }

    fn map_to_wire(
        &self,
        value: &NativeValue,
        node: &TypeNode,
        key: &TypeNode,
        val: &TypeNode,
        depth: usize,
    ) -> ScvalResult<WireValue> {
        let pair = |k: &NativeValue, v: &NativeValue| -> ScvalResult<(WireValue, WireValue)> {
            Ok((self.to_wire(k, key, depth)?, self.to_wire(v, val, depth)?))
        };

        match value {
            NativeValue::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| pair(k, v))
                .collect::<ScvalResult<Vec<_>>>()
                .map(WireValue::Map),
            // A list of two-element lists, as the JSON bridge emits for non-string keys.
            NativeValue::List(items) => items
                .iter()
                .map(|item| match item {
                    NativeValue::List(kv) if kv.len() == 2 => pair(&kv[0], &kv[1]),
                    other => Err(ScvalError::type_mismatch(
                        "[key, value] pair",
                        other.kind(),
                    )),
                })
                .collect::<ScvalResult<Vec<_>>>()
                .map(WireValue::Map),
            _ => Err(mismatch(node, value)),
        }
    }
}

/// Convert a native value into a wire value of type `node`, resolving
/// user-defined types against `spec`.
pub fn native_to_wire(
    value: &NativeValue,
    node: &TypeNode,
    spec: &ContractSpec,
) -> ScvalResult<WireValue> {
    Converter::new(spec).native_to_wire(value, node)
}

/// Convert a wire value of type `node` into a native value.
pub fn wire_to_native(
    value: &WireValue,
    node: &TypeNode,
    spec: &ContractSpec,
) -> ScvalResult<NativeValue> {
    Converter::new(spec).wire_to_native(value, node)
}

pub(crate) fn mismatch(node: &TypeNode, value: &NativeValue) -> ScvalError {
    ScvalError::type_mismatch(node, value.kind())
}

pub(crate) fn wire_mismatch(node: &TypeNode, value: &WireValue) -> ScvalError {
    ScvalError::type_mismatch(node, format!("wire {}", value.tag()))
}
