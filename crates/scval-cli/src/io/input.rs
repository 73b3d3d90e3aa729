use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use scval_core::spec::ContractSpec;

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let v: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| anyhow!("invalid json in {}: {e}", path.display()))?;
    Ok(v)
}

/// Inline JSON, or `@path` to read it from a file.
pub fn read_json_arg(arg: &str) -> Result<serde_json::Value> {
    match arg.strip_prefix('@') {
        Some(path) => read_json_file(path),
        None => serde_json::from_str(arg).map_err(|e| anyhow!("invalid json argument: {e}")),
    }
}

pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<ContractSpec> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("failed to read spec {}", path.display()))?;
    let spec = ContractSpec::from_json_slice(&raw)?;
    tracing::debug!(path = %path.display(), entries = spec.len(), "loaded contract spec");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn json_arg_inline_and_file() {
        assert_eq!(read_json_arg(r#"{"a":1}"#).unwrap(), serde_json::json!({"a": 1}));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"b": true}}"#).unwrap();
        let arg = format!("@{}", f.path().display());
        assert_eq!(read_json_arg(&arg).unwrap(), serde_json::json!({"b": true}));

        assert!(read_json_arg("{not json").is_err());
    }

    #[test]
    fn spec_loading_reports_bad_files() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "[]").unwrap();
        assert!(load_spec(f.path()).unwrap().is_empty());
        assert!(load_spec("/nonexistent/spec.json").is_err());
    }
}
