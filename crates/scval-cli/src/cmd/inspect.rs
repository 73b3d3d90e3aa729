use anyhow::Result;
use serde::Serialize;

use scval_core::codec::from_base64_with_limits;
use scval_core::config::LimitsConfig;
use scval_core::convert::Converter;
use scval_core::native::json::to_json;
use scval_core::spec::{ContractSpec, TypeNode};

use crate::output;

#[derive(Debug, Serialize)]
pub struct InspectOut {
    pub tag: String,
    pub value: serde_json::Value,
}

pub fn run(xdr: &str, limits: LimitsConfig) -> Result<()> {
    let wire = from_base64_with_limits(xdr, &limits)?;
    let spec = ContractSpec::default();
    let native = Converter::with_limits(&spec, limits).wire_to_native(&wire, &TypeNode::Val)?;

    let out = InspectOut {
        tag: wire.tag().to_string(),
        value: to_json(&native),
    };

    if output::is_json() {
        return output::print(&out);
    }
    output::field("tag", &out.tag)?;
    output::field("value", &serde_json::to_string_pretty(&out.value)?)?;
    Ok(())
}
