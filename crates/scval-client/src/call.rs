//! Function call helper.
//!
//! Argument assembly walks the function's declared parameters in order and
//! requires each one by name; extra names are ignored. Return interpretation
//! supports zero or one declared output. A `Result` output converts only its
//! success branch; use [`contract_error`] to interpret the error branch.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use scval_core::codec::{from_base64_with_limits, to_base64_with_limits};
use scval_core::config::LimitsConfig;
use scval_core::convert::Converter;
use scval_core::native::NativeValue;
use scval_core::spec::{ContractSpec, FunctionSpec, SpecEntry, TypeNode};
use scval_core::wire::{ScErrorType, WireValue};
use scval_core::{ScvalError, ScvalResult};

/// Native arguments keyed by parameter name.
pub type Args = BTreeMap<String, NativeValue>;

/// A contract error resolved against the contract's error enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractErrorInfo {
    pub enum_name: String,
    pub case: String,
    pub code: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

/// Call helper bound to one contract specification.
#[derive(Debug, Clone)]
pub struct CallHelper<'a> {
    conv: Converter<'a>,
    limits: LimitsConfig,
}

impl<'a> CallHelper<'a> {
    pub fn new(spec: &'a ContractSpec) -> Self {
        Self::with_limits(spec, LimitsConfig::default())
    }

    pub fn with_limits(spec: &'a ContractSpec, limits: LimitsConfig) -> Self {
        Self {
            conv: Converter::with_limits(spec, limits.clone()),
            limits,
        }
    }

    fn func(&self, name: &str) -> ScvalResult<&'a FunctionSpec> {
        self.conv
            .spec()
            .get_func(name)
            .ok_or_else(|| ScvalError::UnknownEntry(name.to_string()))
    }

    /// Convert named arguments into the function's ordered wire arguments.
    pub fn args_to_wire(&self, function: &str, args: &Args) -> ScvalResult<Vec<WireValue>> {
        let func = self.func(function)?;
        debug!(
            function,
            params = func.inputs.len(),
            supplied = args.len(),
            "assembling call arguments"
        );

        func.inputs
            .iter()
            .map(|input| {
                let value = args
                    .get(&input.name)
                    .ok_or_else(|| ScvalError::ArgumentMissing(input.name.clone()))?;
                self.conv.native_to_wire(value, &input.type_)
            })
            .collect()
    }

    /// Interpret a function's returned wire value.
    pub fn result_to_native(&self, function: &str, value: &WireValue) -> ScvalResult<NativeValue> {
        let func = self.func(function)?;
        debug!(function, tag = %value.tag(), "interpreting return value");

        match func.outputs.as_slice() {
            [] => match value {
                WireValue::Void => Ok(NativeValue::Null),
                other => Err(ScvalError::type_mismatch("void", format!("wire {}", other.tag()))),
            },
            [TypeNode::Result { ok, .. }] => self.conv.wire_to_native(value, ok),
            [output] => self.conv.wire_to_native(value, output),
            many => Err(ScvalError::conversion_failed(format!(
                "function {function} declares {} outputs; only zero or one are supported",
                many.len()
            ))),
        }
    }

    pub fn args_to_base64(&self, function: &str, args: &Args) -> ScvalResult<Vec<String>> {
        self.args_to_wire(function, args)?
            .iter()
            .map(|v| to_base64_with_limits(v, &self.limits))
            .collect()
    }

    pub fn result_from_base64(&self, function: &str, b64: &str) -> ScvalResult<NativeValue> {
        let value = from_base64_with_limits(b64, &self.limits)?;
        self.result_to_native(function, &value)
    }

    /// Resolve a contract error returned by `function` to its error-enum case.
    ///
    /// Returns `None` when the value is not a contract error or no declared
    /// case matches its code.
    pub fn contract_error(
        &self,
        function: &str,
        value: &WireValue,
    ) -> ScvalResult<Option<ContractErrorInfo>> {
        let func = self.func(function)?;
        let WireValue::Error(err) = value else {
            return Ok(None);
        };
        if err.kind != ScErrorType::Contract {
            return Ok(None);
        }

        let spec = self.conv.spec();
        let declared = match func.outputs.as_slice() {
            [TypeNode::Result { error, .. }] => match error.as_ref() {
                TypeNode::UserDefined(name) => match spec.find_entry(name) {
                    Some(SpecEntry::ErrorEnum(e)) => Some(e),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        };

        let info = match declared {
            Some(e) => e.case_by_value(err.code).map(|c| ContractErrorInfo {
                enum_name: e.name.clone(),
                case: c.name.clone(),
                code: c.value,
                doc: c.doc.clone(),
            }),
            None => spec.find_error_case(err.code).map(|c| ContractErrorInfo {
                enum_name: c.enum_name.to_string(),
                case: c.case.name.clone(),
                code: c.case.value,
                doc: c.case.doc.clone(),
            }),
        };
        Ok(info)
    }
}

/// Build named arguments from a JSON object.
pub fn args_from_json(v: &serde_json::Value) -> ScvalResult<Args> {
    let serde_json::Value::Object(obj) = v else {
        return Err(ScvalError::type_mismatch("object of named arguments", "non-object JSON"));
    };
    obj.iter()
        .map(|(k, v)| Ok((k.clone(), scval_core::native::json::from_json(v)?)))
        .collect()
}

pub fn args_to_wire(spec: &ContractSpec, function: &str, args: &Args) -> ScvalResult<Vec<WireValue>> {
    CallHelper::new(spec).args_to_wire(function, args)
}

pub fn result_to_native(
    spec: &ContractSpec,
    function: &str,
    value: &WireValue,
) -> ScvalResult<NativeValue> {
    CallHelper::new(spec).result_to_native(function, value)
}

pub fn args_to_base64(spec: &ContractSpec, function: &str, args: &Args) -> ScvalResult<Vec<String>> {
    CallHelper::new(spec).args_to_base64(function, args)
}

pub fn result_from_base64(spec: &ContractSpec, function: &str, b64: &str) -> ScvalResult<NativeValue> {
    CallHelper::new(spec).result_from_base64(function, b64)
}

pub fn contract_error(
    spec: &ContractSpec,
    function: &str,
    value: &WireValue,
) -> ScvalResult<Option<ContractErrorInfo>> {
    CallHelper::new(spec).contract_error(function, value)
}
