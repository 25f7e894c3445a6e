//! JSON tree loader - build a slot tree from plain data
//!
//! Input shape:
//! ```json
//! {
//!   "tag": "ul",
//!   "attributes": { "class": "list" },
//!   "children": [
//!     { "tag": "li", "children": ["one"] },
//!     { "fragment": ["two", 3, null] }
//!   ]
//! }
//! ```
//!
//! Arrays become fragments. Components have no JSON form.

use crate::error::{Result, SerializeError};
use crate::slot::{ElementSlot, FragmentSlot, Slot};
use crate::types::Leaf;
use serde_json::{Map, Value};

/// Parse a JSON document into a slot tree
pub fn parse_tree_str(json: &str) -> Result<Slot> {
    let value: Value = serde_json::from_str(json)?;
    parse_tree(&value)
}

/// Build a slot tree from a JSON value
pub fn parse_tree(value: &Value) -> Result<Slot> {
    parse_value(value, "$")
}

fn parse_value(value: &Value, path: &str) -> Result<Slot> {
    match value {
        Value::Null => Ok(Slot::Leaf(Leaf::Null)),
        Value::Bool(b) => Ok(Slot::Leaf(Leaf::Bool(*b))),
        Value::Number(n) => Ok(Slot::Leaf(number_leaf(n))),
        Value::String(s) => Ok(Slot::Leaf(Leaf::Text(s.clone()))),
        Value::Array(items) => Ok(Slot::Null(FragmentSlot {
            children: parse_list(items, path)?,
        })),
        Value::Object(map) => parse_object(map, path),
    }
}

fn parse_object(map: &Map<String, Value>, path: &str) -> Result<Slot> {
    if let Some(tag) = map.get("tag") {
        let tag = tag
            .as_str()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| invalid(path, "'tag' must be a non-empty string"))?;

        let mut element = ElementSlot::new(tag);

        if let Some(attributes) = map.get("attributes") {
            let attributes = attributes
                .as_object()
                .ok_or_else(|| invalid(path, "'attributes' must be an object"))?;

            for (key, value) in attributes {
                let value = attribute_value(value).ok_or_else(|| {
                    invalid(
                        &format!("{}.attributes.{}", path, key),
                        "unsupported attribute value",
                    )
                })?;
                element.attributes.insert(key.as_str(), value);
            }
        }

        if let Some(children) = map.get("children") {
            let children = children
                .as_array()
                .ok_or_else(|| invalid(path, "'children' must be an array"))?;
            element.children = parse_list(children, &format!("{}.children", path))?;
        }

        return Ok(Slot::Element(element));
    }

    if let Some(children) = map.get("fragment") {
        let children = children
            .as_array()
            .ok_or_else(|| invalid(path, "'fragment' must be an array"))?;
        return Ok(Slot::Null(FragmentSlot {
            children: parse_list(children, &format!("{}.fragment", path))?,
        }));
    }

    Err(invalid(path, "object is neither an element nor a fragment"))
}

fn parse_list(items: &[Value], path: &str) -> Result<Vec<Slot>> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_value(item, &format!("{}[{}]", path, idx)))
        .collect()
}

fn number_leaf(n: &serde_json::Number) -> Leaf {
    match n.as_i64() {
        Some(i) => Leaf::Int(i),
        None => Leaf::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Attribute values are stringified scalars
fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_leaf(n).as_text().into_owned()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn invalid(path: &str, reason: &str) -> SerializeError {
    SerializeError::InvalidInput(format!("{}: {}", path, reason))
}
