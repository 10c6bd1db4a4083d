//! Sequence encoding shared by every list-valued field.

use serde_yaml::Value;
use tracing::warn;

use crate::error::{CodecError, CodecWarning};
use crate::tree::Decoder;

/// Encode `items` in order as a YAML sequence.
pub fn encode_list<T>(items: &[T], encode: impl FnMut(&T) -> Value) -> Value {
    Value::Sequence(items.iter().map(encode).collect())
}

/// Decode a YAML sequence element by element, preserving order.
///
/// A node that is not a sequence is recorded as a [`CodecWarning`] on the
/// decoder and yields an empty list. Element errors propagate.
pub fn decode_list<T>(
    node: &Value,
    cx: &mut Decoder<'_>,
    mut decode: impl FnMut(&Value, &mut Decoder<'_>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let Value::Sequence(items) = node else {
        let warning = CodecWarning::NotASequence {
            found: value_kind(node),
            line: cx.line(),
        };
        warn!("{warning}");
        cx.warn(warning);
        return Ok(Vec::new());
    };

    items.iter().map(|item| decode(item, cx)).collect()
}

/// Short name of a YAML node's shape, for diagnostics.
pub(crate) fn value_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}
