use anyhow::Result;
use serde::Serialize;

use scval_client::{CallHelper, ContractErrorInfo};
use scval_core::codec::from_base64_with_limits;
use scval_core::config::LimitsConfig;
use scval_core::native::json::to_json;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeOut {
    Value(serde_json::Value),
    Error(ContractErrorInfo),
}

pub fn run(spec_path: &str, function: &str, xdr: &str, limits: LimitsConfig) -> Result<()> {
    let spec = input::load_spec(spec_path)?;
    let wire = from_base64_with_limits(xdr, &limits)?;
    let helper = CallHelper::with_limits(&spec, limits);

    // A contract error is reported as such rather than as a type mismatch on the ok branch.
    let out = match helper.contract_error(function, &wire)? {
        Some(info) => DecodeOut::Error(info),
        None => DecodeOut::Value(to_json(&helper.result_to_native(function, &wire)?)),
    };

    if output::is_json() {
        return output::print(&out);
    }
    match out {
        DecodeOut::Value(v) => output::line(&serde_json::to_string_pretty(&v)?),
        DecodeOut::Error(info) => {
            output::heading(&format!("{}::{} ({})", info.enum_name, info.case, info.code))?;
            if !info.doc.is_empty() {
                output::line(&info.doc);
            }
        }
    }
    Ok(())
}
