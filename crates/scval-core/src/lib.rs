//! scval-core
//!
//! Core primitives for contract values:
//! - Wire value model and the big-endian, 4-byte aligned binary codec
//! - Base64 transport framing for JSON-RPC embedding
//! - Contract specification model and the type node algebra
//! - Native values and the type-directed native/wire converter
//! - Address strkey handling

pub mod address;
pub mod codec;
pub mod config;
pub mod convert;
pub mod errors;
pub mod native;
pub mod spec;
pub mod wire;

pub use crate::errors::{ScvalError, ScvalResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::address::{format_address, parse_address};
    pub use crate::codec::{
        decode, decode_with_limits, encode, encode_with_limits, from_base64, to_base64,
    };
    pub use crate::config::{CoreConfig, LimitsConfig};
    pub use crate::convert::{native_to_wire, wire_to_native, Converter};
    pub use crate::native::{NativeValue, UnionValue};
    pub use crate::spec::{ContractSpec, FunctionSpec, SpecEntry, TypeNode};
    pub use crate::wire::{ScAddress, ScError, ScErrorType, WireTag, WireValue};
    pub use crate::{ScvalError, ScvalResult};
}
