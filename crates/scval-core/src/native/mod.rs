//! Native values.
//!
//! [`NativeValue`] is the caller-facing dynamic value used at the converter
//! boundary. It is deliberately loose about integer representation: `Int`,
//! `UInt` and `BigInt` all hold "an integer", and equality compares them
//! numerically, so a value built as `Int(5)` equals the `UInt(5)` a decode
//! would produce for a `u32` node.

use std::fmt;

use num_bigint::BigInt;

#[cfg(feature = "json")]
pub mod json;

/// A union value: a case name plus an optional ordered payload.
#[derive(Debug, Clone)]
pub struct UnionValue {
    pub case: String,
    pub values: Option<Vec<NativeValue>>,
}

impl UnionValue {
    pub fn void(case: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            values: None,
        }
    }

    pub fn tuple(case: impl Into<String>, values: Vec<NativeValue>) -> Self {
        Self {
            case: case.into(),
            values: Some(values),
        }
    }

    /// Payload as a slice; a void case yields an empty slice.
    pub fn payload(&self) -> &[NativeValue] {
        self.values.as_deref().unwrap_or(&[])
    }
}

impl PartialEq for UnionValue {
    fn eq(&self, other: &Self) -> bool {
        // `None` and `Some([])` both mean "no payload".
        self.case == other.case && self.payload() == other.payload()
    }
}

#[derive(Debug, Clone)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    BigInt(BigInt),
    Bytes(Vec<u8>),
    String(String),
    List(Vec<NativeValue>),
    /// Ordered key/value pairs. Struct values use `String` keys.
    Map(Vec<(NativeValue, NativeValue)>),
    Union(UnionValue),
    Result(Box<Result<NativeValue, NativeValue>>),
}

impl NativeValue {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn bigint(v: impl Into<BigInt>) -> Self {
        Self::BigInt(v.into())
    }

    pub fn ok(v: NativeValue) -> Self {
        Self::Result(Box::new(Ok(v)))
    }

    pub fn err(v: NativeValue) -> Self {
        Self::Result(Box::new(Err(v)))
    }

    pub fn union_void(case: impl Into<String>) -> Self {
        Self::Union(UnionValue::void(case))
    }

    pub fn union_tuple(case: impl Into<String>, values: Vec<NativeValue>) -> Self {
        Self::Union(UnionValue::tuple(case, values))
    }

    /// Build a map keyed by strings, preserving the given order.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NativeValue)>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (Self::String(k.into()), v))
                .collect(),
        )
    }

    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::BigInt(_) => "bigint",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Union(_) => "union",
            Self::Result(_) => "result",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view across all three integer variants.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Self::Int(v) => Some(BigInt::from(*v)),
            Self::UInt(v) => Some(BigInt::from(*v)),
            Self::BigInt(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Look up a string key in a map value. The first matching pair wins.
    pub fn get(&self, key: &str) -> Option<&NativeValue> {
        match self {
            Self::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        use NativeValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(_) | UInt(_) | BigInt(_), Int(_) | UInt(_) | BigInt(_)) => {
                self.as_bigint() == other.as_bigint()
            }
            (Bytes(a), Bytes(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Union(a), Union(b)) => a == b,
            (Result(a), Result(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::Union(u) => match &u.values {
                None => f.write_str(&u.case),
                Some(vals) => {
                    write!(f, "{}(", u.case)?;
                    for (i, v) in vals.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{v}")?;
                    }
                    f.write_str(")")
                }
            },
            Self::Result(r) => match r.as_ref() {
                Ok(v) => write!(f, "Ok({v})"),
                Err(e) => write!(f, "Err({e})"),
            },
        }
    }
}

impl From<bool> for NativeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for NativeValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for NativeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for NativeValue {
    fn from(v: u32) -> Self {
        Self::UInt(v.into())
    }
}

impl From<u64> for NativeValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i128> for NativeValue {
    fn from(v: i128) -> Self {
        Self::BigInt(v.into())
    }
}

impl From<u128> for NativeValue {
    fn from(v: u128) -> Self {
        Self::BigInt(v.into())
    }
}

impl From<BigInt> for NativeValue {
    fn from(v: BigInt) -> Self {
        Self::BigInt(v)
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(v: Vec<NativeValue>) -> Self {
        Self::List(v)
    }
}

impl From<UnionValue> for NativeValue {
    fn from(v: UnionValue) -> Self {
        Self::Union(v)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_compare_numerically() {
        assert_eq!(NativeValue::Int(5), NativeValue::UInt(5));
        assert_eq!(NativeValue::UInt(5), NativeValue::bigint(5));
        assert_ne!(NativeValue::Int(-1), NativeValue::UInt(u64::MAX));
        assert_ne!(NativeValue::Int(1), NativeValue::Bool(true));
    }

    #[test]
    fn void_union_payload_forms_are_equal() {
        let a = NativeValue::union_void("Admin");
        let b = NativeValue::union_tuple("Admin", vec![]);
        assert_eq!(a, b);
        assert_ne!(a, NativeValue::union_void("Other"));
    }

    #[test]
    fn object_lookup_and_display() {
        let v = NativeValue::object([("x", NativeValue::Int(1)), ("y", NativeValue::string("hi"))]);
        assert_eq!(v.get("x"), Some(&NativeValue::Int(1)));
        assert!(v.get("z").is_none());
        assert_eq!(v.to_string(), r#"{"x": 1, "y": "hi"}"#);
        assert_eq!(
            NativeValue::union_tuple("Pair", vec![1.into(), 2.into()]).to_string(),
            "Pair(1, 2)"
        );
    }

    #[test]
    fn option_into_null() {
        let none: Option<u32> = None;
        assert!(NativeValue::from(none).is_null());
        assert_eq!(NativeValue::from(Some(7u32)), NativeValue::UInt(7));
    }
}
