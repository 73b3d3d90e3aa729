//! The type node algebra.

use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A node in a type description tree.
///
/// User-defined types are referenced by name and resolved lazily against a
/// [`crate::spec::ContractSpec`] at conversion time, so forward and mutually
/// recursive references need no linking pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum TypeNode {
    Val,
    Bool,
    Void,
    Error,
    U32,
    I32,
    U64,
    I64,
    Timepoint,
    Duration,
    U128,
    I128,
    U256,
    I256,
    Bytes,
    String,
    Symbol,
    Address,
    MuxedAddress,
    Option(Box<TypeNode>),
    Result {
        ok: Box<TypeNode>,
        error: Box<TypeNode>,
    },
    Vec(Box<TypeNode>),
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    Tuple(Vec<TypeNode>),
    #[cfg_attr(feature = "json", serde(rename = "bytes_n"))]
    FixedBytes(u32),
    #[cfg_attr(feature = "json", serde(rename = "udt"))]
    UserDefined(String),
}

impl TypeNode {
    pub fn option(inner: TypeNode) -> Self {
        Self::Option(Box::new(inner))
    }

    pub fn result(ok: TypeNode, error: TypeNode) -> Self {
        Self::Result {
            ok: Box::new(ok),
            error: Box::new(error),
        }
    }

    pub fn vec(elem: TypeNode) -> Self {
        Self::Vec(Box::new(elem))
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn udt(name: impl Into<String>) -> Self {
        Self::UserDefined(name.into())
    }

    /// Bit width and signedness for integer kinds.
    pub fn integer_width(&self) -> Option<(u16, bool)> {
        Some(match self {
            Self::U32 => (32, false),
            Self::I32 => (32, true),
            Self::U64 | Self::Timepoint | Self::Duration => (64, false),
            Self::I64 => (64, true),
            Self::U128 => (128, false),
            Self::I128 => (128, true),
            Self::U256 => (256, false),
            Self::I256 => (256, true),
            _ => return None,
        })
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Val => f.write_str("Val"),
            Self::Bool => f.write_str("bool"),
            Self::Void => f.write_str("void"),
            Self::Error => f.write_str("Error"),
            Self::U32 => f.write_str("u32"),
            Self::I32 => f.write_str("i32"),
            Self::U64 => f.write_str("u64"),
            Self::I64 => f.write_str("i64"),
            Self::Timepoint => f.write_str("Timepoint"),
            Self::Duration => f.write_str("Duration"),
            Self::U128 => f.write_str("u128"),
            Self::I128 => f.write_str("i128"),
            Self::U256 => f.write_str("u256"),
            Self::I256 => f.write_str("i256"),
            Self::Bytes => f.write_str("Bytes"),
            Self::String => f.write_str("String"),
            Self::Symbol => f.write_str("Symbol"),
            Self::Address => f.write_str("Address"),
            Self::MuxedAddress => f.write_str("MuxedAddress"),
            Self::Option(inner) => write!(f, "Option<{inner}>"),
            Self::Result { ok, error } => write!(f, "Result<{ok}, {error}>"),
            Self::Vec(elem) => write!(f, "Vec<{elem}>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            Self::Tuple(elems) => {
                f.write_str("(")?;
                for (i, t) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str(")")
            }
            Self::FixedBytes(n) => write!(f, "BytesN<{n}>"),
            Self::UserDefined(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        let t = TypeNode::map(TypeNode::Symbol, TypeNode::option(TypeNode::vec(TypeNode::I128)));
        assert_eq!(t.to_string(), "Map<Symbol, Option<Vec<i128>>>");
        assert_eq!(TypeNode::FixedBytes(32).to_string(), "BytesN<32>");
        assert_eq!(
            TypeNode::Tuple(vec![TypeNode::U32, TypeNode::udt("Point")]).to_string(),
            "(u32, Point)"
        );
    }

    #[test]
    fn widths() {
        assert_eq!(TypeNode::Timepoint.integer_width(), Some((64, false)));
        assert_eq!(TypeNode::I256.integer_width(), Some((256, true)));
        assert_eq!(TypeNode::Bytes.integer_width(), None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_shape() {
        let t: TypeNode = serde_json::from_str(
            r#"{"result":{"ok":{"vec":"address"},"error":{"udt":"Error"}}}"#,
        )
        .unwrap();
        assert_eq!(
            t,
            TypeNode::result(TypeNode::vec(TypeNode::Address), TypeNode::udt("Error"))
        );
        assert_eq!(serde_json::to_string(&TypeNode::FixedBytes(32)).unwrap(), r#"{"bytes_n":32}"#);
        assert_eq!(serde_json::to_string(&TypeNode::U128).unwrap(), r#""u128""#);
    }
}
