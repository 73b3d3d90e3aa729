//! Spec entry records: functions, user-defined types and events.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::spec::types::TypeNode;

/// One named entry in a contract specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SpecEntry {
    Function(FunctionSpec),
    Struct(StructSpec),
    Union(UnionSpec),
    Enum(EnumSpec),
    ErrorEnum(ErrorEnumSpec),
    Event(EventSpec),
}

impl SpecEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Function(x) => &x.name,
            Self::Struct(x) => &x.name,
            Self::Union(x) => &x.name,
            Self::Enum(x) => &x.name,
            Self::ErrorEnum(x) => &x.name,
            Self::Event(x) => &x.name,
        }
    }

    pub fn doc(&self) -> &str {
        match self {
            Self::Function(x) => &x.doc,
            Self::Struct(x) => &x.doc,
            Self::Union(x) => &x.doc,
            Self::Enum(x) => &x.doc,
            Self::ErrorEnum(x) => &x.doc,
            Self::Event(x) => &x.doc,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Struct(_) => "struct",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::ErrorEnum(_) => "error_enum",
            Self::Event(_) => "event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FunctionSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub inputs: Vec<FunctionInput>,
    /// Declared outputs. In practice zero or one.
    #[cfg_attr(feature = "json", serde(default))]
    pub outputs: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FunctionInput {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_: TypeNode,
}

impl FunctionSpec {
    /// Human-readable signature, e.g. `transfer(from: Address, amount: i128) -> void`.
    pub fn signature(&self) -> String {
        let params = self
            .inputs
            .iter()
            .map(|i| format!("{}: {}", i.name, i.type_))
            .collect::<Vec<_>>()
            .join(", ");
        let ret = match self.outputs.as_slice() {
            [] => "void".to_string(),
            [one] => one.to_string(),
            many => format!(
                "({})",
                many.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            ),
        };
        format!("{}({params}) -> {ret}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct StructSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub lib: String,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct StructField {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_: TypeNode,
}

impl StructSpec {
    /// A struct is positional when it has fields and every field name is made
    /// of ASCII digits only. Positional structs travel as a Vec, named ones as
    /// a Map keyed by Symbol.
    pub fn is_positional(&self) -> bool {
        !self.fields.is_empty()
            && self
                .fields
                .iter()
                .all(|f| !f.name.is_empty() && f.name.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Fields in wire order: ascending numeric name for positional structs,
    /// declaration order otherwise.
    pub fn wire_order(&self) -> Vec<&StructField> {
        let mut fields: Vec<&StructField> = self.fields.iter().collect();
        if self.is_positional() {
            fields.sort_by_key(|f| f.name.parse::<u32>().unwrap_or(u32::MAX));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct UnionSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub lib: String,
    pub cases: Vec<UnionCase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum UnionCase {
    Void {
        name: String,
        #[cfg_attr(feature = "json", serde(default))]
        doc: String,
    },
    Tuple {
        name: String,
        #[cfg_attr(feature = "json", serde(default))]
        doc: String,
        types: Vec<TypeNode>,
    },
}

impl UnionCase {
    pub fn name(&self) -> &str {
        match self {
            Self::Void { name, .. } | Self::Tuple { name, .. } => name,
        }
    }

    /// Payload types; empty for void cases.
    pub fn payload(&self) -> &[TypeNode] {
        match self {
            Self::Void { .. } => &[],
            Self::Tuple { types, .. } => types,
        }
    }
}

impl UnionSpec {
    pub fn case(&self, name: &str) -> Option<&UnionCase> {
        self.cases.iter().find(|c| c.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EnumCase {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EnumSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub lib: String,
    pub cases: Vec<EnumCase>,
}

/// Same shape as [`EnumSpec`] but a distinct kind; the two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ErrorEnumSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub lib: String,
    pub cases: Vec<EnumCase>,
}

impl EnumSpec {
    pub fn case_by_value(&self, value: u32) -> Option<&EnumCase> {
        self.cases.iter().find(|c| c.value == value)
    }

    pub fn case_by_name(&self, name: &str) -> Option<&EnumCase> {
        self.cases.iter().find(|c| c.name == name)
    }
}

impl ErrorEnumSpec {
    pub fn case_by_value(&self, value: u32) -> Option<&EnumCase> {
        self.cases.iter().find(|c| c.value == value)
    }
}

/// Where an event parameter is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum EventParamLocation {
    Data,
    TopicList,
}

/// How the data-located parameters of an event are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum EventDataFormat {
    SingleValue,
    Vec,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EventParam {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_: TypeNode,
    pub location: EventParamLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EventSpec {
    pub name: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub doc: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub lib: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub prefix_topics: Vec<String>,
    pub params: Vec<EventParam>,
    pub data_format: EventDataFormat,
}

impl EventSpec {
    pub fn topic_params(&self) -> impl Iterator<Item = &EventParam> {
        self.params
            .iter()
            .filter(|p| p.location == EventParamLocation::TopicList)
    }

    pub fn data_params(&self) -> impl Iterator<Item = &EventParam> {
        self.params
            .iter()
            .filter(|p| p.location == EventParamLocation::Data)
    }
}
