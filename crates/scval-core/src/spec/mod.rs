//! Contract specification model.
//!
//! A [`ContractSpec`] is the ordered list of entries describing a deployed
//! contract's interface, plus a name index over all of them. Functions,
//! user-defined types and events share one namespace for lookup; the typed
//! accessors filter by kind and preserve declaration order.
//!
//! Construction never validates cross-references. A struct field of type
//! `udt("Foo")` is accepted whether or not `Foo` exists; the converter reports
//! `UnknownEntry` only when it actually visits that node.
//!
//! A built spec is immutable and can be shared read-only across threads.

use std::collections::HashMap;

pub mod entries;
pub mod types;

pub use entries::{
    EnumCase, EnumSpec, ErrorEnumSpec, EventDataFormat, EventParam, EventParamLocation,
    EventSpec, FunctionInput, FunctionSpec, SpecEntry, StructField, StructSpec, UnionCase,
    UnionSpec,
};
pub use types::TypeNode;

#[cfg(feature = "json")]
use crate::errors::{ScvalError, ScvalResult};

/// An error-enum case together with the enum that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCaseRef<'a> {
    pub enum_name: &'a str,
    pub case: &'a EnumCase,
}

#[derive(Debug, Clone, Default)]
pub struct ContractSpec {
    entries: Vec<SpecEntry>,
    index: HashMap<String, usize>,
}

impl ContractSpec {
    /// Build a spec from decoded entries. When two entries share a name the
    /// first one wins the lookup.
    pub fn new(entries: Vec<SpecEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, e) in entries.iter().enumerate() {
            index.entry(e.name().to_string()).or_insert(i);
        }
        Self { entries, index }
    }

    /// Parse a JSON array of spec entries.
    #[cfg(feature = "json")]
    pub fn from_json_slice(bytes: &[u8]) -> ScvalResult<Self> {
        let entries: Vec<SpecEntry> = serde_json::from_slice(bytes).map_err(|e| {
            ScvalError::conversion_failed(format!("failed to parse contract spec JSON: {e}"))
        })?;
        Ok(Self::new(entries))
    }

    #[cfg(feature = "json")]
    pub fn to_json_vec(&self) -> ScvalResult<Vec<u8>> {
        serde_json::to_vec_pretty(&self.entries).map_err(|e| {
            ScvalError::conversion_failed(format!("failed to serialize contract spec: {e}"))
        })
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up any entry by name.
    pub fn find_entry(&self, name: &str) -> Option<&SpecEntry> {
        self.index.get(name).map(|i| &self.entries[*i])
    }

    /// Look up a function by name. Non-function entries of that name yield `None`.
    pub fn get_func(&self, name: &str) -> Option<&FunctionSpec> {
        match self.find_entry(name)? {
            SpecEntry::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn get_event(&self, name: &str) -> Option<&EventSpec> {
        self.events().find(|e| e.name == name)
    }

    pub fn funcs(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::Function(x) => Some(x),
            _ => None,
        })
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::Struct(x) => Some(x),
            _ => None,
        })
    }

    pub fn unions(&self) -> impl Iterator<Item = &UnionSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::Union(x) => Some(x),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::Enum(x) => Some(x),
            _ => None,
        })
    }

    pub fn error_enums(&self) -> impl Iterator<Item = &ErrorEnumSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::ErrorEnum(x) => Some(x),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &EventSpec> {
        self.entries.iter().filter_map(|e| match e {
            SpecEntry::Event(x) => Some(x),
            _ => None,
        })
    }

    /// Every case of every error enum, in declaration order.
    pub fn error_cases(&self) -> Vec<ErrorCaseRef<'_>> {
        self.error_enums()
            .flat_map(|e| {
                e.cases.iter().map(move |case| ErrorCaseRef {
                    enum_name: &e.name,
                    case,
                })
            })
            .collect()
    }

    /// Resolve a numeric contract error to the first declared case with that value.
    pub fn find_error_case(&self, code: u32) -> Option<ErrorCaseRef<'_>> {
        self.error_cases().into_iter().find(|c| c.case.value == code)
    }
}

impl From<Vec<SpecEntry>> for ContractSpec {
    fn from(entries: Vec<SpecEntry>) -> Self {
        Self::new(entries)
    }
}
