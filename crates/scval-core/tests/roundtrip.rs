//! roundtrip.rs
//!
//! Native -> wire -> bytes -> wire -> native at integer boundaries and over
//! nested user-defined types. Every value goes through the binary codec as
//! well as the converter.

use num_bigint::BigInt;
use proptest::prelude::*;

use scval_core::codec::{decode, encode, from_base64, to_base64};
use scval_core::prelude::*;
use scval_core::spec::{StructField, StructSpec, UnionCase, UnionSpec};

fn full_roundtrip(v: &NativeValue, t: &TypeNode, spec: &ContractSpec) -> NativeValue {
    let w = native_to_wire(v, t, spec).unwrap();
    let bytes = encode(&w).unwrap();
    assert_eq!(bytes.len() % 4, 0, "encoding must be 4-byte aligned");
    let back = decode(&bytes).unwrap();
    assert_eq!(back, w);
    wire_to_native(&back, t, spec).unwrap()
}

#[test]
fn integer_boundaries() {
    let spec = ContractSpec::default();
    let cases: Vec<(TypeNode, NativeValue)> = vec![
        (TypeNode::U32, 0u32.into()),
        (TypeNode::U32, u32::MAX.into()),
        (TypeNode::I32, i32::MIN.into()),
        (TypeNode::I32, i32::MAX.into()),
        (TypeNode::U64, u64::MAX.into()),
        (TypeNode::I64, i64::MIN.into()),
        (TypeNode::I64, i64::MAX.into()),
        (TypeNode::Timepoint, u64::MAX.into()),
        (TypeNode::Duration, 0u64.into()),
        (TypeNode::U128, 0u128.into()),
        (TypeNode::U128, u128::MAX.into()),
        (TypeNode::I128, i128::MIN.into()),
        (TypeNode::I128, i128::MAX.into()),
        (TypeNode::U256, NativeValue::BigInt((BigInt::from(1) << 256u32) - 1)),
        (TypeNode::I256, NativeValue::BigInt(-(BigInt::from(1) << 255u32))),
        (TypeNode::I256, NativeValue::BigInt((BigInt::from(1) << 255u32) - 1)),
    ];

    for (t, v) in cases {
        assert_eq!(full_roundtrip(&v, &t, &spec), v, "roundtrip failed for {t}");
    }
}

#[test]
fn just_past_the_boundary_is_out_of_range() {
    let spec = ContractSpec::default();
    let over: Vec<(TypeNode, NativeValue)> = vec![
        (TypeNode::U128, NativeValue::BigInt(BigInt::from(u128::MAX) + 1)),
        (TypeNode::I128, NativeValue::BigInt(BigInt::from(i128::MIN) - 1)),
        (TypeNode::U256, NativeValue::BigInt(BigInt::from(1) << 256u32)),
        (TypeNode::I256, NativeValue::BigInt(-(BigInt::from(1) << 255u32) - 1)),
        (TypeNode::U64, NativeValue::Int(-1)),
    ];
    for (t, v) in over {
        let err = native_to_wire(&v, &t, &spec).unwrap_err();
        assert!(
            matches!(err, ScvalError::OutOfRange { .. }),
            "expected OutOfRange for {t}, got {err:?}"
        );
    }
}

#[test]
fn u32_one_base64_vector() {
    let spec = ContractSpec::default();
    let w = native_to_wire(&NativeValue::UInt(1), &TypeNode::U32, &spec).unwrap();
    assert_eq!(to_base64(&w).unwrap(), "AAAAAwAAAAE=");
    assert_eq!(from_base64("AAAAAwAAAAE=").unwrap(), w);
}

fn tree_spec() -> ContractSpec {
    ContractSpec::new(vec![
        SpecEntry::Struct(StructSpec {
            name: "Node".into(),
            doc: String::new(),
            lib: String::new(),
            fields: vec![
                StructField {
                    name: "label".into(),
                    doc: String::new(),
                    type_: TypeNode::Symbol,
                },
                StructField {
                    name: "children".into(),
                    doc: String::new(),
                    type_: TypeNode::vec(TypeNode::udt("Tree")),
                },
            ],
        }),
        SpecEntry::Union(UnionSpec {
            name: "Tree".into(),
            doc: String::new(),
            lib: String::new(),
            cases: vec![
                UnionCase::Void {
                    name: "Leaf".into(),
                    doc: String::new(),
                },
                UnionCase::Tuple {
                    name: "Branch".into(),
                    doc: String::new(),
                    types: vec![TypeNode::udt("Node")],
                },
            ],
        }),
    ])
}

#[test]
fn mutually_recursive_types() {
    let spec = tree_spec();
    let node = |label: &str, children: Vec<NativeValue>| {
        NativeValue::union_tuple(
            "Branch",
            vec![NativeValue::object([
                ("label", NativeValue::string(label)),
                ("children", NativeValue::List(children)),
            ])],
        )
    };
    let tree = node(
        "root",
        vec![node("a", vec![NativeValue::union_void("Leaf")]), NativeValue::union_void("Leaf")],
    );
    assert_eq!(full_roundtrip(&tree, &TypeNode::udt("Tree"), &spec), tree);
}

#[test]
fn recursion_is_bounded() {
    let spec = tree_spec();
    let mut tree = NativeValue::union_void("Leaf");
    for _ in 0..200 {
        tree = NativeValue::union_tuple(
            "Branch",
            vec![NativeValue::object([
                ("label", NativeValue::string("n")),
                ("children", NativeValue::List(vec![tree])),
            ])],
        );
    }
    let err = native_to_wire(&tree, &TypeNode::udt("Tree"), &spec).unwrap_err();
    assert!(matches!(err, ScvalError::ConversionFailed(_)));
}

proptest! {
    #[test]
    fn i128_roundtrip(v in any::<i128>()) {
        let spec = ContractSpec::default();
        let native = NativeValue::from(v);
        prop_assert_eq!(full_roundtrip(&native, &TypeNode::I128, &spec), native);
    }

    #[test]
    fn u64_roundtrip(v in any::<u64>()) {
        let spec = ContractSpec::default();
        let native = NativeValue::from(v);
        prop_assert_eq!(full_roundtrip(&native, &TypeNode::U64, &spec), native);
    }

    #[test]
    fn symbol_map_roundtrip(entries in prop::collection::vec(("[a-z_]{1,12}", any::<i32>()), 0..8)) {
        let spec = ContractSpec::default();
        let t = TypeNode::map(TypeNode::Symbol, TypeNode::I32);
        let native = NativeValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (NativeValue::String(k), NativeValue::from(v)))
                .collect(),
        );
        prop_assert_eq!(full_roundtrip(&native, &t, &spec), native);
    }

    #[test]
    fn optional_bytes_roundtrip(data in prop::option::of(prop::collection::vec(any::<u8>(), 0..64))) {
        let spec = ContractSpec::default();
        let t = TypeNode::option(TypeNode::Bytes);
        let native = data.map_or(NativeValue::Null, NativeValue::Bytes);
        prop_assert_eq!(full_roundtrip(&native, &t, &spec), native);
    }
}
