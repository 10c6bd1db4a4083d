//! Loading YAML text into [`Value`] trees.
//!
//! `serde_yaml` stops at a fixed nesting depth of 128, which an ordinary
//! expression spine exceeds. Documents are parsed with `yaml-rust2`, whose
//! parser keeps its state on the heap, and converted to `serde_yaml`
//! values under [`ensure_sufficient_stack`].

use std::borrow::Cow;

use serde_yaml::{Mapping, Value};
use yaml_rust2::{Yaml, YamlLoader};

use cool_stack::ensure_sufficient_stack;

use crate::error::CodecError;

/// Parse the first document of `text`. An empty stream loads as null.
pub fn load_document(text: &str) -> Result<Value, CodecError> {
    let docs = YamlLoader::load_from_str(text)?;
    Ok(docs.into_iter().next().map_or(Value::Null, to_value))
}

fn to_value(yaml: Yaml) -> Value {
    ensure_sufficient_stack(|| match yaml {
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => Value::Null,
        Yaml::Boolean(b) => Value::Bool(b),
        Yaml::Integer(i) => Value::from(i),
        Yaml::Real(text) => match text.parse::<f64>() {
            Ok(f) => Value::from(f),
            Err(_) => Value::String(text),
        },
        Yaml::String(s) => Value::String(s),
        Yaml::Array(items) => Value::Sequence(items.into_iter().map(to_value).collect()),
        Yaml::Hash(hash) => {
            let mut map = Mapping::with_capacity(hash.len());
            for (key, value) in hash {
                map.insert(to_value(key), to_value(value));
            }
            Value::Mapping(map)
        }
    })
}

/// Read a scalar leniently as text.
///
/// Strings come back as-is, numbers and booleans in their canonical text,
/// null as the empty string. Sequences and maps are not scalars.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null => Some(Cow::Borrowed("")),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
