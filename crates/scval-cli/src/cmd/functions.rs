use anyhow::Result;
use serde::Serialize;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct FunctionOut {
    pub name: String,
    pub signature: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

pub fn run(spec_path: &str) -> Result<()> {
    let spec = input::load_spec(spec_path)?;
    let funcs: Vec<FunctionOut> = spec
        .funcs()
        .map(|f| FunctionOut {
            name: f.name.clone(),
            signature: f.signature(),
            doc: f.doc.clone(),
        })
        .collect();

    if output::is_json() {
        return output::print(&funcs);
    }

    for f in &funcs {
        output::heading(&f.name)?;
        output::line(&format!("  {}", f.signature));
        for doc_line in f.doc.lines() {
            output::line(&format!("  {doc_line}"));
        }
    }
    Ok(())
}
