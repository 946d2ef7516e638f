//! JSON form of element trees:
//! `{ "type": string, "props": { "children": Node | Node[], ... } } | string`.
//!
//! Decoding keeps the loose semantics of the JavaScript object format the
//! trees were first described in. Nothing is validated here; a bad tag is
//! reported by the host when the tree is rendered.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{Element, Node, PropValue, js_number_to_string};
use crate::error::ParseError;

impl Node {
    /// Parse a node from its JSON description.
    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(input)?;
        Self::try_from(value)
    }
}

impl TryFrom<Value> for Node {
    type Error = ParseError;

    /// A string is text and anything else describes an element. Values that
    /// are not objects carry no `type` or `props`, so they decode to an empty
    /// `<undefined>` element. `null` has no properties to read and is
    /// rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Err(ParseError::InvalidNode("null")),
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(object) => Ok(Self::Element(element_from_object(object)?)),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
                Ok(Self::Element(Element::new(UNDEFINED_TAG)))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Tag of an element description without a `type`.
const UNDEFINED_TAG: &str = "undefined";

fn element_from_object(mut object: Map<String, Value>) -> Result<Element, ParseError> {
    let tag = match object.remove("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => js_string(&other),
        None => UNDEFINED_TAG.to_string(),
    };
    let mut element = Element::new(tag);

    let Some(Value::Object(props)) = object.remove("props") else {
        return Ok(element);
    };

    for (key, value) in props {
        if key == "children" {
            collect_children(value, &mut element.children)?;
        } else {
            element.props.set(key, prop_value(value));
        }
    }
    Ok(element)
}

/// `children` that is absent or falsy renders nothing; an array renders each
/// entry in order; any other value renders alone. Entries decode like a
/// top-level node, so a nested array is one `<undefined>` element.
fn collect_children(value: Value, children: &mut Vec<Node>) -> Result<(), ParseError> {
    if is_falsy(&value) {
        return Ok(());
    }
    match value {
        Value::Array(items) => {
            for item in items {
                children.push(Node::try_from(item)?);
            }
        }
        other => children.push(Node::try_from(other)?),
    }
    Ok(())
}

fn prop_value(value: Value) -> PropValue {
    match value {
        Value::String(s) => PropValue::Str(s),
        Value::Bool(b) => PropValue::Bool(b),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| PropValue::Str(n.to_string()), PropValue::Number),
        other => PropValue::Str(js_string(&other)),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn number_string(n: &serde_json::Number) -> String {
    n.as_f64()
        .map_or_else(|| n.to_string(), js_number_to_string)
}

/// `String(value)` in JavaScript.
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
