use anyhow::Result;

use scval_client::decode_event;
use scval_core::codec::from_base64_with_limits;
use scval_core::config::LimitsConfig;
use scval_core::native::json::to_json;
use scval_core::wire::WireValue;

use crate::io::input;
use crate::output;

pub fn run(
    spec_path: &str,
    name: &str,
    topics: &[String],
    data: &str,
    limits: LimitsConfig,
) -> Result<()> {
    let spec = input::load_spec(spec_path)?;
    let topics = topics
        .iter()
        .map(|t| from_base64_with_limits(t, &limits))
        .collect::<Result<Vec<WireValue>, _>>()?;
    let data = from_base64_with_limits(data, &limits)?;

    let value = to_json(&decode_event(&spec, name, &topics, &data)?);

    if output::is_json() {
        return output::print(&value);
    }
    output::heading(name)?;
    if let serde_json::Value::Object(fields) = &value {
        for (k, v) in fields {
            output::field(&format!("  {k}"), &v.to_string())?;
        }
    }
    Ok(())
}
