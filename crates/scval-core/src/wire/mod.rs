//! Wire value model.
//!
//! [`WireValue`] is the closed set of values the contract virtual machine can
//! hold. Each variant pairs one tag with exactly one payload shape; the codec
//! in [`crate::codec`] relies on that pairing and never writes a tag with a
//! foreign payload.

use std::fmt;

pub mod int_parts;

pub use int_parts::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};

/// Maximum length of a symbol body.
pub const SYMBOL_MAX_LEN: usize = 32;

/// A value as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireValue {
    Bool(bool),
    Void,
    Error(ScError),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(UInt128Parts),
    I128(Int128Parts),
    U256(UInt256Parts),
    I256(Int256Parts),
    Bytes(Vec<u8>),
    /// Strings are byte strings on the wire; they are not required to be UTF-8.
    String(Vec<u8>),
    Symbol(String),
    Vec(Vec<WireValue>),
    /// Key/value pairs in wire order. The codec never re-sorts them.
    Map(Vec<(WireValue, WireValue)>),
    Address(ScAddress),
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

/// Discriminants of [`WireValue`], numbered as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WireTag {
    Bool = 0,
    Void = 1,
    Error = 2,
    U32 = 3,
    I32 = 4,
    U64 = 5,
    I64 = 6,
    Timepoint = 7,
    Duration = 8,
    U128 = 9,
    I128 = 10,
    U256 = 11,
    I256 = 12,
    Bytes = 13,
    String = 14,
    Symbol = 15,
    Vec = 16,
    Map = 17,
    Address = 18,
    ContractInstance = 19,
    LedgerKeyContractInstance = 20,
    LedgerKeyNonce = 21,
}

impl WireTag {
    pub fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::Bool,
            1 => Self::Void,
            2 => Self::Error,
            3 => Self::U32,
            4 => Self::I32,
            5 => Self::U64,
            6 => Self::I64,
            7 => Self::Timepoint,
            8 => Self::Duration,
            9 => Self::U128,
            10 => Self::I128,
            11 => Self::U256,
            12 => Self::I256,
            13 => Self::Bytes,
            14 => Self::String,
            15 => Self::Symbol,
            16 => Self::Vec,
            17 => Self::Map,
            18 => Self::Address,
            19 => Self::ContractInstance,
            20 => Self::LedgerKeyContractInstance,
            21 => Self::LedgerKeyNonce,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Void => "Void",
            Self::Error => "Error",
            Self::U32 => "U32",
            Self::I32 => "I32",
            Self::U64 => "U64",
            Self::I64 => "I64",
            Self::Timepoint => "Timepoint",
            Self::Duration => "Duration",
            Self::U128 => "U128",
            Self::I128 => "I128",
            Self::U256 => "U256",
            Self::I256 => "I256",
            Self::Bytes => "Bytes",
            Self::String => "String",
            Self::Symbol => "Symbol",
            Self::Vec => "Vec",
            Self::Map => "Map",
            Self::Address => "Address",
            Self::ContractInstance => "ContractInstance",
            Self::LedgerKeyContractInstance => "LedgerKeyContractInstance",
            Self::LedgerKeyNonce => "LedgerKeyNonce",
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WireValue {
    pub fn tag(&self) -> WireTag {
        match self {
            Self::Bool(_) => WireTag::Bool,
            Self::Void => WireTag::Void,
            Self::Error(_) => WireTag::Error,
            Self::U32(_) => WireTag::U32,
            Self::I32(_) => WireTag::I32,
            Self::U64(_) => WireTag::U64,
            Self::I64(_) => WireTag::I64,
            Self::Timepoint(_) => WireTag::Timepoint,
            Self::Duration(_) => WireTag::Duration,
            Self::U128(_) => WireTag::U128,
            Self::I128(_) => WireTag::I128,
            Self::U256(_) => WireTag::U256,
            Self::I256(_) => WireTag::I256,
            Self::Bytes(_) => WireTag::Bytes,
            Self::String(_) => WireTag::String,
            Self::Symbol(_) => WireTag::Symbol,
            Self::Vec(_) => WireTag::Vec,
            Self::Map(_) => WireTag::Map,
            Self::Address(_) => WireTag::Address,
            Self::LedgerKeyContractInstance => WireTag::LedgerKeyContractInstance,
            Self::LedgerKeyNonce(_) => WireTag::LedgerKeyNonce,
        }
    }

    /// Build a symbol value. Symbol validity is checked by the codec and converter.
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into().into_bytes())
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Returns true if `s` is a valid symbol body.
pub fn is_valid_symbol(s: &str) -> bool {
    s.len() <= SYMBOL_MAX_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Category of a wire-level error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ScErrorType {
    Contract = 0,
    WasmVm = 1,
    Context = 2,
    Storage = 3,
    Object = 4,
    Crypto = 5,
    Events = 6,
    Budget = 7,
    Value = 8,
    Auth = 9,
}

impl ScErrorType {
    pub const ALL: [ScErrorType; 10] = [
        Self::Contract,
        Self::WasmVm,
        Self::Context,
        Self::Storage,
        Self::Object,
        Self::Crypto,
        Self::Events,
        Self::Budget,
        Self::Value,
        Self::Auth,
    ];

    pub fn from_u32(v: u32) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "Contract",
            Self::WasmVm => "WasmVm",
            Self::Context => "Context",
            Self::Storage => "Storage",
            Self::Object => "Object",
            Self::Crypto => "Crypto",
            Self::Events => "Events",
            Self::Budget => "Budget",
            Self::Value => "Value",
            Self::Auth => "Auth",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// An error value: a category plus a 32-bit code.
///
/// For `Contract` errors the code is the contract-defined error number; for the
/// host categories it is a host error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScError {
    pub kind: ScErrorType,
    pub code: u32,
}

impl ScError {
    pub fn contract(code: u32) -> Self {
        Self {
            kind: ScErrorType::Contract,
            code,
        }
    }
}

/// Address payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScAddress {
    /// An ed25519 account public key.
    Account([u8; 32]),
    /// A contract id.
    Contract([u8; 32]),
    /// An ed25519 account with a 64-bit multiplexing id.
    MuxedAccount { id: u64, ed25519: [u8; 32] },
}
