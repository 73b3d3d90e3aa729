//! spec_fixture.rs
//!
//! Loads the shared token contract fixture and exercises the documented
//! conversion properties against it.

use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;

use scval_core::prelude::*;

const ACCOUNT: &str = "GA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES5";
const CONTRACT: &str = "CA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQGAXE";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn token_spec() -> ContractSpec {
    let raw = fs::read(fixture("token_spec.json")).expect("read token_spec.json");
    ContractSpec::from_json_slice(&raw).expect("parse token_spec.json")
}

#[test]
fn fixture_loads_every_kind() {
    let spec = token_spec();
    assert_eq!(spec.funcs().count(), 8);
    assert_eq!(spec.structs().count(), 2);
    assert_eq!(spec.unions().count(), 1);
    assert_eq!(spec.enums().count(), 1);
    assert_eq!(spec.error_enums().count(), 1);
    assert_eq!(spec.events().count(), 2);

    let f = spec.get_func("transfer").unwrap();
    assert_eq!(
        f.signature(),
        "transfer(from: Address, to: Address, amount: i128) -> void"
    );
    assert_eq!(spec.find_error_case(3).unwrap().case.name, "Frozen");
}

#[test]
fn address_auto_detection() {
    let spec = token_spec();
    assert_matches!(
        native_to_wire(&ACCOUNT.into(), &TypeNode::Address, &spec),
        Ok(WireValue::Address(ScAddress::Account(_)))
    );
    assert_matches!(
        native_to_wire(&CONTRACT.into(), &TypeNode::Address, &spec),
        Ok(WireValue::Address(ScAddress::Contract(_)))
    );
    assert_matches!(
        native_to_wire(&"XBADADDRESS".into(), &TypeNode::Address, &spec),
        Err(ScvalError::TypeMismatch { .. })
    );
}

#[test]
fn union_with_positional_struct_payload() {
    let spec = token_spec();
    let key = NativeValue::union_tuple(
        "Allowance",
        vec![NativeValue::object([
            ("0", NativeValue::string(ACCOUNT)),
            ("1", NativeValue::string(CONTRACT)),
        ])],
    );
    let t = TypeNode::udt("DataKey");
    let w = native_to_wire(&key, &t, &spec).unwrap();

    let WireValue::Vec(items) = &w else {
        panic!("expected Vec, got {w:?}");
    };
    assert_eq!(items[0], WireValue::symbol("Allowance"));
    assert_matches!(&items[1], WireValue::Vec(fields) if fields.len() == 2);

    let back = wire_to_native(&decode(&encode(&w).unwrap()).unwrap(), &t, &spec).unwrap();
    assert_eq!(back, key);
}

#[test]
fn option_of_struct() {
    let spec = token_spec();
    let t = TypeNode::option(TypeNode::udt("Allowance"));
    let allowance = NativeValue::object([
        ("amount", NativeValue::bigint(500)),
        ("expiration_ledger", NativeValue::UInt(1000)),
    ]);

    let w = native_to_wire(&allowance, &t, &spec).unwrap();
    assert_eq!(wire_to_native(&w, &t, &spec).unwrap(), allowance);
    assert_eq!(native_to_wire(&NativeValue::Null, &t, &spec).unwrap(), WireValue::Void);
}

#[test]
fn enum_by_name_and_value() {
    let spec = token_spec();
    let t = TypeNode::udt("Tier");
    assert_eq!(native_to_wire(&NativeValue::UInt(2), &t, &spec).unwrap(), WireValue::U32(2));
    assert_eq!(native_to_wire(&"Pro".into(), &t, &spec).unwrap(), WireValue::U32(2));
    assert_matches!(
        native_to_wire(&NativeValue::UInt(99), &t, &spec),
        Err(ScvalError::InvalidEnumValue { .. })
    );
}

#[test]
fn json_bridge_feeds_the_converter() {
    let spec = token_spec();
    let json = serde_json::json!({
        "tag": "Allowance",
        "values": [{ "0": ACCOUNT, "1": CONTRACT }]
    });
    let native = scval_core::native::json::from_json(&json).unwrap();
    let w = native_to_wire(&native, &TypeNode::udt("DataKey"), &spec).unwrap();
    let back = wire_to_native(&w, &TypeNode::udt("DataKey"), &spec).unwrap();
    assert_eq!(scval_core::native::json::to_json(&back), json);
}
