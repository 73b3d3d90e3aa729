//! User-defined type conversion: structs, unions, enums and error enums.
//!
//! Wire shapes:
//! - positional struct: `Vec` of field values in ascending numeric-name order
//! - named struct: `Map` of `Symbol(field) -> value` in declaration order
//! - union: `Vec([Symbol(case), payload...])`
//! - enum: `U32(value)`
//! - error enum: `Error(Contract, value)` (decode only)

use num_traits::ToPrimitive;
use tracing::trace;

use crate::errors::{ScvalError, ScvalResult};
use crate::native::NativeValue;
use crate::spec::{EnumSpec, ErrorEnumSpec, SpecEntry, StructSpec, TypeNode, UnionSpec};
use crate::wire::{is_valid_symbol, ScErrorType, WireValue};

use super::{scalar, wire_mismatch, Converter};

fn resolve<'s>(conv: &Converter<'s>, name: &str) -> ScvalResult<&'s SpecEntry> {
    let entry = conv
        .spec()
        .find_entry(name)
        .ok_or_else(|| ScvalError::UnknownEntry(name.to_string()))?;
    trace!(udt = name, kind = entry.kind(), "resolved user-defined type");
    Ok(entry)
}

fn not_a_type(entry: &SpecEntry) -> ScvalError {
    ScvalError::conversion_failed(format!(
        "{} is a {} entry and cannot be used as a type",
        entry.name(),
        entry.kind()
    ))
}

fn symbol_for(name: &str) -> ScvalResult<WireValue> {
    if !is_valid_symbol(name) {
        return Err(ScvalError::conversion_failed(format!(
            "{name:?} cannot be encoded as a symbol"
        )));
    }
    Ok(WireValue::symbol(name))
}

pub(super) fn to_wire(
    conv: &Converter<'_>,
    name: &str,
    value: &NativeValue,
    depth: usize,
) -> ScvalResult<WireValue> {
    match resolve(conv, name)? {
        SpecEntry::Struct(s) => struct_to_wire(conv, s, value, depth),
        SpecEntry::Union(u) => union_to_wire(conv, u, value, depth),
        SpecEntry::Enum(e) => enum_to_wire(e, value),
        SpecEntry::ErrorEnum(e) => Err(ScvalError::conversion_failed(format!(
            "error enum {} cannot be built from a native value",
            e.name
        ))),
        other @ (SpecEntry::Function(_) | SpecEntry::Event(_)) => Err(not_a_type(other)),
    }
}

pub(super) fn to_native(
    conv: &Converter<'_>,
    name: &str,
    value: &WireValue,
    depth: usize,
) -> ScvalResult<NativeValue> {
    match resolve(conv, name)? {
        SpecEntry::Struct(s) => struct_to_native(conv, s, value, depth),
        SpecEntry::Union(u) => union_to_native(conv, u, value, depth),
        SpecEntry::Enum(e) => enum_to_native(e, value),
        SpecEntry::ErrorEnum(e) => error_enum_to_native(e, value),
        other @ (SpecEntry::Function(_) | SpecEntry::Event(_)) => Err(not_a_type(other)),
    }
}

/// A field may be null only if its type can carry null.
fn nullable(t: &TypeNode) -> bool {
    matches!(t, TypeNode::Option(_) | TypeNode::Void | TypeNode::Val)
}

fn struct_to_wire(
    conv: &Converter<'_>,
    s: &StructSpec,
    value: &NativeValue,
    depth: usize,
) -> ScvalResult<WireValue> {
    if !matches!(value, NativeValue::Map(_)) {
        return Err(ScvalError::type_mismatch(&s.name, value.kind()));
    }

    let positional = s.is_positional();
    let mut items = Vec::with_capacity(s.fields.len());
    let mut pairs = Vec::with_capacity(s.fields.len());

    for field in s.wire_order() {
        let v = match value.get(&field.name) {
            Some(v) if !v.is_null() || nullable(&field.type_) => v,
            _ => return Err(ScvalError::ArgumentMissing(field.name.clone())),
        };
        let w = conv.to_wire(v, &field.type_, depth)?;
        if positional {
            items.push(w);
        } else {
            pairs.push((symbol_for(&field.name)?, w));
        }
    }

    Ok(if positional {
        WireValue::Vec(items)
    } else {
        WireValue::Map(pairs)
    })
}

fn struct_to_native(
    conv: &Converter<'_>,
    s: &StructSpec,
    value: &WireValue,
    depth: usize,
) -> ScvalResult<NativeValue> {
    let mut out = Vec::with_capacity(s.fields.len());

    match (s.is_positional(), value) {
        (true, WireValue::Vec(items)) => {
            let fields = s.wire_order();
            if items.len() != fields.len() {
                return Err(ScvalError::type_mismatch(
                    format!("{} ({} fields)", s.name, fields.len()),
                    format!("Vec of {} elements", items.len()),
                ));
            }
            for (field, item) in fields.into_iter().zip(items) {
                out.push((
                    NativeValue::String(field.name.clone()),
                    conv.to_native(item, &field.type_, depth)?,
                ));
            }
        }
        (false, WireValue::Map(pairs)) => {
            for field in &s.fields {
                let (_, w) = pairs
                    .iter()
                    .find(|(k, _)| k.as_symbol() == Some(field.name.as_str()))
                    .ok_or_else(|| ScvalError::ArgumentMissing(field.name.clone()))?;
                out.push((
                    NativeValue::String(field.name.clone()),
                    conv.to_native(w, &field.type_, depth)?,
                ));
            }
        }
        _ => {
            let shape = if s.is_positional() { "Vec" } else { "Map" };
            return Err(ScvalError::type_mismatch(
                format!("{} as {shape}", s.name),
                format!("wire {}", value.tag()),
            ));
        }
    }

    Ok(NativeValue::Map(out))
}

fn union_to_wire(
    conv: &Converter<'_>,
    u: &UnionSpec,
    value: &NativeValue,
    depth: usize,
) -> ScvalResult<WireValue> {
    let NativeValue::Union(uv) = value else {
        return Err(ScvalError::type_mismatch(&u.name, value.kind()));
    };
    let case = u
        .case(&uv.case)
        .ok_or_else(|| ScvalError::invalid_union_case(&u.name, uv.case.clone()))?;

    let types = case.payload();
    let payload = uv.payload();
    if payload.len() != types.len() {
        return Err(ScvalError::type_mismatch(
            format!("{}::{} with {} payload values", u.name, uv.case, types.len()),
            format!("{} payload values", payload.len()),
        ));
    }

    let mut items = Vec::with_capacity(types.len() + 1);
    items.push(symbol_for(case.name())?);
    for (v, t) in payload.iter().zip(types) {
        items.push(conv.to_wire(v, t, depth)?);
    }
    Ok(WireValue::Vec(items))
}

fn union_to_native(
    conv: &Converter<'_>,
    u: &UnionSpec,
    value: &WireValue,
    depth: usize,
) -> ScvalResult<NativeValue> {
    let WireValue::Vec(items) = value else {
        return Err(wire_mismatch(&TypeNode::udt(&u.name), value));
    };
    let Some((head, rest)) = items.split_first() else {
        return Err(ScvalError::type_mismatch(&u.name, "empty Vec"));
    };
    let Some(case_name) = head.as_symbol() else {
        return Err(ScvalError::type_mismatch(
            format!("{} case symbol", u.name),
            format!("wire {}", head.tag()),
        ));
    };
    let case = u
        .case(case_name)
        .ok_or_else(|| ScvalError::invalid_union_case(&u.name, case_name))?;

    let types = case.payload();
    if rest.len() != types.len() {
        return Err(ScvalError::type_mismatch(
            format!("{}::{case_name} with {} payload values", u.name, types.len()),
            format!("{} payload values", rest.len()),
        ));
    }

    if types.is_empty() {
        return Ok(NativeValue::union_void(case_name));
    }
    let values = rest
        .iter()
        .zip(types)
        .map(|(w, t)| conv.to_native(w, t, depth))
        .collect::<ScvalResult<Vec<_>>>()?;
    Ok(NativeValue::union_tuple(case_name, values))
}

fn enum_to_wire(e: &EnumSpec, value: &NativeValue) -> ScvalResult<WireValue> {
    let case = match value {
        NativeValue::String(name) => e.case_by_name(name),
        other => match other.as_bigint() {
            Some(n) => n.to_u32().and_then(|v| e.case_by_value(v)),
            None => return Err(ScvalError::type_mismatch(&e.name, other.kind())),
        },
    };
    case.map(|c| WireValue::U32(c.value))
        .ok_or_else(|| ScvalError::invalid_enum_value(&e.name, value))
}

fn enum_to_native(e: &EnumSpec, value: &WireValue) -> ScvalResult<NativeValue> {
    match value {
        WireValue::U32(v) => e
            .case_by_value(*v)
            .map(|c| NativeValue::UInt(c.value.into()))
            .ok_or_else(|| ScvalError::invalid_enum_value(&e.name, v)),
        _ => Err(wire_mismatch(&TypeNode::udt(&e.name), value)),
    }
}

fn error_enum_to_native(e: &ErrorEnumSpec, value: &WireValue) -> ScvalResult<NativeValue> {
    let code = match value {
        WireValue::Error(err) if err.kind == ScErrorType::Contract => err.code,
        // Host errors are not part of the contract's error enum.
        WireValue::Error(err) => return Ok(scalar::error_to_native(err)),
        WireValue::U32(v) => *v,
        _ => return Err(wire_mismatch(&TypeNode::udt(&e.name), value)),
    };
    e.case_by_value(code)
        .map(|c| NativeValue::union_void(&c.name))
        .ok_or_else(|| ScvalError::invalid_enum_value(&e.name, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{native_to_wire, wire_to_native};
    use crate::spec::{ContractSpec, EnumCase, StructField, UnionCase};
    use assert_matches::assert_matches;

    fn field(name: &str, type_: TypeNode) -> StructField {
        StructField {
            name: name.into(),
            doc: String::new(),
            type_,
        }
    }

    fn spec() -> ContractSpec {
        ContractSpec::new(vec![
            SpecEntry::Struct(StructSpec {
                name: "Point".into(),
                doc: String::new(),
                lib: String::new(),
                fields: vec![field("x", TypeNode::I32), field("y", TypeNode::I32)],
            }),
            SpecEntry::Struct(StructSpec {
                name: "Pair".into(),
                doc: String::new(),
                lib: String::new(),
                fields: vec![field("1", TypeNode::Symbol), field("0", TypeNode::U32)],
            }),
            SpecEntry::Struct(StructSpec {
                name: "Memo".into(),
                doc: String::new(),
                lib: String::new(),
                fields: vec![field("text", TypeNode::option(TypeNode::String))],
            }),
            SpecEntry::Union(UnionSpec {
                name: "Shape".into(),
                doc: String::new(),
                lib: String::new(),
                cases: vec![
                    UnionCase::Void {
                        name: "Void".into(),
                        doc: String::new(),
                    },
                    UnionCase::Tuple {
                        name: "Pair".into(),
                        doc: String::new(),
                        types: vec![TypeNode::I32, TypeNode::I32],
                    },
                    UnionCase::Tuple {
                        name: "Nested".into(),
                        doc: String::new(),
                        types: vec![TypeNode::udt("Shape")],
                    },
                ],
            }),
            SpecEntry::Enum(EnumSpec {
                name: "Color".into(),
                doc: String::new(),
                lib: String::new(),
                cases: vec![
                    EnumCase {
                        name: "Red".into(),
                        doc: String::new(),
                        value: 1,
                    },
                    EnumCase {
                        name: "Blue".into(),
                        doc: String::new(),
                        value: 2,
                    },
                ],
            }),
            SpecEntry::ErrorEnum(ErrorEnumSpec {
                name: "TokenError".into(),
                doc: String::new(),
                lib: String::new(),
                cases: vec![EnumCase {
                    name: "Insufficient".into(),
                    doc: String::new(),
                    value: 7,
                }],
            }),
        ])
    }

    #[test]
    fn named_struct_uses_declaration_order() {
        let spec = spec();
        let t = TypeNode::udt("Point");
        let v = NativeValue::object([("y", NativeValue::Int(2)), ("x", NativeValue::Int(1))]);
        let w = native_to_wire(&v, &t, &spec).unwrap();
        assert_eq!(
            w,
            WireValue::Map(vec![
                (WireValue::symbol("x"), WireValue::I32(1)),
                (WireValue::symbol("y"), WireValue::I32(2)),
            ])
        );
        assert_eq!(
            wire_to_native(&w, &t, &spec).unwrap(),
            NativeValue::object([("x", NativeValue::Int(1)), ("y", NativeValue::Int(2))])
        );
    }

    #[test]
    fn positional_struct_uses_vec() {
        let spec = spec();
        let t = TypeNode::udt("Pair");
        let v = NativeValue::object([("0", NativeValue::UInt(5)), ("1", NativeValue::string("a"))]);
        let w = native_to_wire(&v, &t, &spec).unwrap();
        assert_eq!(w, WireValue::Vec(vec![WireValue::U32(5), WireValue::symbol("a")]));
        assert_eq!(wire_to_native(&w, &t, &spec).unwrap(), v);

        // Shape must match the classification.
        assert_matches!(
            wire_to_native(&WireValue::Map(vec![]), &t, &spec),
            Err(ScvalError::TypeMismatch { .. })
        );
    }

    #[test]
    fn missing_and_null_fields() {
        let spec = spec();
        let t = TypeNode::udt("Point");
        assert_eq!(
            native_to_wire(&NativeValue::object([("x", NativeValue::Int(1))]), &t, &spec),
            Err(ScvalError::ArgumentMissing("y".into()))
        );
        assert_eq!(
            native_to_wire(
                &NativeValue::object([("x", NativeValue::Int(1)), ("y", NativeValue::Null)]),
                &t,
                &spec
            ),
            Err(ScvalError::ArgumentMissing("y".into()))
        );

        // Optional fields may be null but must still be present.
        let memo = TypeNode::udt("Memo");
        let w = native_to_wire(&NativeValue::object([("text", NativeValue::Null)]), &memo, &spec)
            .unwrap();
        assert_eq!(w, WireValue::Map(vec![(WireValue::symbol("text"), WireValue::Void)]));
        assert_eq!(
            wire_to_native(&WireValue::Map(vec![]), &memo, &spec),
            Err(ScvalError::ArgumentMissing("text".into()))
        );
    }

    #[test]
    fn union_cases() {
        let spec = spec();
        let t = TypeNode::udt("Shape");

        let w = native_to_wire(&NativeValue::union_void("Void"), &t, &spec).unwrap();
        assert_eq!(w, WireValue::Vec(vec![WireValue::symbol("Void")]));
        assert_eq!(wire_to_native(&w, &t, &spec).unwrap(), NativeValue::union_void("Void"));

        let pair = NativeValue::union_tuple("Pair", vec![NativeValue::Int(1), NativeValue::Int(2)]);
        let w = native_to_wire(&pair, &t, &spec).unwrap();
        assert_eq!(
            w,
            WireValue::Vec(vec![WireValue::symbol("Pair"), WireValue::I32(1), WireValue::I32(2)])
        );
        assert_eq!(wire_to_native(&w, &t, &spec).unwrap(), pair);

        let nested = NativeValue::union_tuple("Nested", vec![pair]);
        let w = native_to_wire(&nested, &t, &spec).unwrap();
        assert_eq!(wire_to_native(&w, &t, &spec).unwrap(), nested);
    }

    #[test]
    fn union_errors() {
        let spec = spec();
        let t = TypeNode::udt("Shape");
        assert_matches!(
            native_to_wire(&NativeValue::union_void("Circle"), &t, &spec),
            Err(ScvalError::InvalidUnionCase { .. })
        );
        assert_matches!(
            native_to_wire(&NativeValue::union_tuple("Pair", vec![NativeValue::Int(1)]), &t, &spec),
            Err(ScvalError::TypeMismatch { .. })
        );
        assert_matches!(
            wire_to_native(&WireValue::Vec(vec![WireValue::symbol("Circle")]), &t, &spec),
            Err(ScvalError::InvalidUnionCase { .. })
        );
        assert_matches!(
            wire_to_native(&WireValue::Vec(vec![WireValue::U32(0)]), &t, &spec),
            Err(ScvalError::TypeMismatch { .. })
        );
        assert_matches!(
            wire_to_native(
                &WireValue::Vec(vec![WireValue::symbol("Pair"), WireValue::I32(1)]),
                &t,
                &spec
            ),
            Err(ScvalError::TypeMismatch { .. })
        );
    }

    #[test]
    fn enum_by_value_and_name() {
        let spec = spec();
        let t = TypeNode::udt("Color");
        assert_eq!(native_to_wire(&NativeValue::UInt(2), &t, &spec).unwrap(), WireValue::U32(2));
        assert_eq!(native_to_wire(&"Blue".into(), &t, &spec).unwrap(), WireValue::U32(2));
        assert_eq!(wire_to_native(&WireValue::U32(2), &t, &spec).unwrap(), NativeValue::UInt(2));

        assert_matches!(
            native_to_wire(&NativeValue::UInt(99), &t, &spec),
            Err(ScvalError::InvalidEnumValue { .. })
        );
        assert_matches!(
            native_to_wire(&"Green".into(), &t, &spec),
            Err(ScvalError::InvalidEnumValue { .. })
        );
        assert_matches!(
            wire_to_native(&WireValue::U32(99), &t, &spec),
            Err(ScvalError::InvalidEnumValue { .. })
        );
    }

    #[test]
    fn error_enum_is_decode_only() {
        let spec = spec();
        let t = TypeNode::udt("TokenError");
        assert_matches!(
            native_to_wire(&NativeValue::UInt(7), &t, &spec),
            Err(ScvalError::ConversionFailed(_))
        );
        let w = WireValue::Error(crate::wire::ScError::contract(7));
        assert_eq!(
            wire_to_native(&w, &t, &spec).unwrap(),
            NativeValue::union_void("Insufficient")
        );
        assert_matches!(
            wire_to_native(&WireValue::Error(crate::wire::ScError::contract(8)), &t, &spec),
            Err(ScvalError::InvalidEnumValue { .. })
        );
    }

    #[test]
    fn unknown_entry() {
        let spec = spec();
        assert_eq!(
            native_to_wire(&NativeValue::UInt(1), &TypeNode::udt("Nope"), &spec),
            Err(ScvalError::UnknownEntry("Nope".into()))
        );
    }
}
