use anyhow::{anyhow, Result};
use serde::Serialize;

use scval_client::{args_from_json, CallHelper};
use scval_core::config::LimitsConfig;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct EncodedArg {
    pub name: String,
    pub xdr: String,
}

#[derive(Debug, Serialize)]
pub struct EncodeOut {
    pub function: String,
    pub args: Vec<EncodedArg>,
}

pub fn run(spec_path: &str, function: &str, args_arg: &str, limits: LimitsConfig) -> Result<()> {
    let spec = input::load_spec(spec_path)?;
    let func = spec
        .get_func(function)
        .ok_or_else(|| anyhow!("function {function} not found in {spec_path}"))?;

    let args = args_from_json(&input::read_json_arg(args_arg)?)?;
    let encoded = CallHelper::with_limits(&spec, limits).args_to_base64(function, &args)?;

    let out = EncodeOut {
        function: function.to_string(),
        args: func
            .inputs
            .iter()
            .zip(encoded)
            .map(|(input, xdr)| EncodedArg {
                name: input.name.clone(),
                xdr,
            })
            .collect(),
    };

    if output::is_json() {
        return output::print(&out);
    }
    for arg in &out.args {
        output::field(&arg.name, &arg.xdr)?;
    }
    Ok(())
}
