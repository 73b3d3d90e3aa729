//! scval-client
//!
//! Thin helpers for invoking contract functions over `scval-core`:
//! - assemble an ordered wire argument list from named native arguments
//! - interpret a function's returned wire value by its declared output type
//! - resolve contract errors to their declared error-enum case
//! - decode contract events by their spec entry
//!
//! Network transport is left to the caller; the base64 helpers produce and
//! consume the strings a JSON-RPC body carries.

pub mod call;
pub mod events;

pub use call::{
    args_from_json, args_to_base64, args_to_wire, contract_error, result_from_base64,
    result_to_native, Args, CallHelper, ContractErrorInfo,
};
pub use events::decode_event;
