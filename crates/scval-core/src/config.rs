//! Configuration structures for scval-core.
//!
//! This module defines explicit configuration objects used by the codec and
//! the converter to bound resource usage on untrusted input.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use crate::errors::{ScvalError, ScvalResult};

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub limits: LimitsConfig,
}

/// Resource and complexity limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum nesting depth of wire values and type nodes.
    ///
    /// Guards against recursive user-defined types and adversarial buffers.
    pub max_depth: usize,
    /// Maximum size of a buffer accepted by the decoder.
    pub max_wire_bytes: usize,
    /// Maximum element count of a single decoded Vec or Map.
    pub max_collection_len: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_wire_bytes: 16 * 1024 * 1024,
            max_collection_len: 1_000_000,
        }
    }
}

impl LimitsConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> ScvalResult<()> {
    if cfg.limits.max_depth == 0 {
        return Err(ScvalError::conversion_failed(
            "max_depth must be greater than zero",
        ));
    }

    if cfg.limits.max_wire_bytes < 4 {
        return Err(ScvalError::conversion_failed(
            "max_wire_bytes must allow at least one 4-byte word",
        ));
    }

    if cfg.limits.max_collection_len as usize > cfg.limits.max_wire_bytes {
        return Err(ScvalError::conversion_failed(
            "max_collection_len must not exceed max_wire_bytes",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = CoreConfig::default();
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn zero_depth_detected() {
        let mut cfg = CoreConfig::default();
        cfg.limits.max_depth = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn oversized_collection_limit_detected() {
        let mut cfg = CoreConfig::default();
        cfg.limits.max_wire_bytes = 64;
        cfg.limits.max_collection_len = 65;
        assert!(validate_config(&cfg).is_err());
    }
}
