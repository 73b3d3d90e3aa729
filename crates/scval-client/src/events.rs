//! Typed contract event decoding.
//!
//! An emitted event is a topic list plus one data value. Its spec entry fixes:
//! - the leading prefix topics, each a Symbol
//! - the topic-located params, following the prefix in declaration order
//! - how the data-located params are packed (single value, Vec or Map)

use tracing::debug;

use scval_core::convert::Converter;
use scval_core::native::NativeValue;
use scval_core::spec::{ContractSpec, EventDataFormat, EventParam, EventSpec};
use scval_core::wire::WireValue;
use scval_core::{ScvalError, ScvalResult};

/// Decode an emitted event into a map of param name to value, in
/// declaration order.
pub fn decode_event(
    spec: &ContractSpec,
    name: &str,
    topics: &[WireValue],
    data: &WireValue,
) -> ScvalResult<NativeValue> {
    let event = spec
        .get_event(name)
        .ok_or_else(|| ScvalError::UnknownEntry(name.to_string()))?;
    let conv = Converter::new(spec);
    debug!(event = name, topics = topics.len(), "decoding event");

    let topic_params: Vec<&EventParam> = event.topic_params().collect();
    let expected = event.prefix_topics.len() + topic_params.len();
    if topics.len() != expected {
        return Err(ScvalError::type_mismatch(
            format!("{expected} topics for event {name}"),
            format!("{} topics", topics.len()),
        ));
    }

    let (prefix, rest) = topics.split_at(event.prefix_topics.len());
    for (want, got) in event.prefix_topics.iter().zip(prefix) {
        if got.as_symbol() != Some(want.as_str()) {
            return Err(ScvalError::type_mismatch(
                format!("prefix topic {want:?}"),
                format!("wire {}", got.tag()),
            ));
        }
    }

    let mut decoded: Vec<(String, NativeValue)> = Vec::with_capacity(event.params.len());
    for (param, topic) in topic_params.iter().zip(rest) {
        decoded.push((param.name.clone(), conv.wire_to_native(topic, &param.type_)?));
    }
    decoded.extend(decode_data(&conv, event, data)?);

    // Re-order into declaration order.
    let ordered = event
        .params
        .iter()
        .filter_map(|p| {
            decoded
                .iter()
                .position(|(n, _)| n == &p.name)
                .map(|i| (p.name.clone(), decoded[i].1.clone()))
        })
        .collect::<Vec<_>>();
    Ok(NativeValue::object(ordered))
}

fn decode_data(
    conv: &Converter<'_>,
    event: &EventSpec,
    data: &WireValue,
) -> ScvalResult<Vec<(String, NativeValue)>> {
    let params: Vec<&EventParam> = event.data_params().collect();

    match event.data_format {
        EventDataFormat::SingleValue => match params.as_slice() {
            [] => match data {
                WireValue::Void => Ok(Vec::new()),
                other => Err(ScvalError::type_mismatch("void event data", format!("wire {}", other.tag()))),
            },
            [param] => Ok(vec![(param.name.clone(), conv.wire_to_native(data, &param.type_)?)]),
            many => Err(ScvalError::conversion_failed(format!(
                "event {} packs {} data params as a single value",
                event.name,
                many.len()
            ))),
        },
        EventDataFormat::Vec => {
            let WireValue::Vec(items) = data else {
                return Err(ScvalError::type_mismatch("Vec event data", format!("wire {}", data.tag())));
            };
            if items.len() != params.len() {
                return Err(ScvalError::type_mismatch(
                    format!("{} data values", params.len()),
                    format!("{} data values", items.len()),
                ));
            }
            params
                .iter()
                .zip(items)
                .map(|(p, w)| Ok((p.name.clone(), conv.wire_to_native(w, &p.type_)?)))
                .collect()
        }
        EventDataFormat::Map => {
            let WireValue::Map(pairs) = data else {
                return Err(ScvalError::type_mismatch("Map event data", format!("wire {}", data.tag())));
            };
            params
                .iter()
                .map(|p| {
                    let (_, w) = pairs
                        .iter()
                        .find(|(k, _)| k.as_symbol() == Some(p.name.as_str()))
                        .ok_or_else(|| ScvalError::ArgumentMissing(p.name.clone()))?;
                    Ok((p.name.clone(), conv.wire_to_native(w, &p.type_)?))
                })
                .collect()
        }
    }
}
