use std::fmt;
use std::rc::Rc;

use crate::dom::{Event, Listener};

/// Value of a single prop on an element.
///
/// Anything that is not a [`PropValue::Listener`] ends up as an attribute,
/// stringified the way JavaScript attribute assignment would.
#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Bool(bool),
    Number(f64),
    Listener(Listener),
}

impl PropValue {
    /// Wrap a closure as an invocable prop.
    pub fn listener(f: impl Fn(&Event) + 'static) -> Self {
        Self::Listener(Rc::new(f))
    }

    pub fn as_listener(&self) -> Option<&Listener> {
        match self {
            Self::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    /// The string an attribute set to this value would hold.
    pub fn to_attribute_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&js_number_to_string(*n)),
            // There is no source text to print for a Rust closure.
            Self::Listener(_) => f.write_str("function"),
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Listener(listener) => f
                .debug_tuple("Listener")
                .field(&Rc::as_ptr(listener).cast::<()>())
                .finish(),
        }
    }
}

/// Listeners compare by identity, everything else by value.
impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Listener(a), Self::Listener(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Listener> for PropValue {
    fn from(value: Listener) -> Self {
        Self::Listener(value)
    }
}

/// Insertion-ordered prop map.
///
/// Setting a key that already exists replaces the value but keeps its
/// position, the same ordering a JavaScript object literal has.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: Vec<(String, PropValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format a number the way JavaScript's `Number.prototype.toString` does.
pub(crate) fn js_number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_number_formatting() {
        assert_eq!(js_number_to_string(1.0), "1");
        assert_eq!(js_number_to_string(-3.0), "-3");
        assert_eq!(js_number_to_string(0.5), "0.5");
        assert_eq!(js_number_to_string(-0.0), "0");
        assert_eq!(js_number_to_string(f64::NAN), "NaN");
        assert_eq!(js_number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(js_number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(js_number_to_string(1e21), "1e+21");
        assert_eq!(js_number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(js_number_to_string(123_456.0), "123456");
    }

    #[test]
    fn test_attribute_stringification() {
        assert_eq!(PropValue::from("x").to_attribute_value(), "x");
        assert_eq!(PropValue::from(true).to_attribute_value(), "true");
        assert_eq!(PropValue::from(false).to_attribute_value(), "false");
        assert_eq!(PropValue::from(42).to_attribute_value(), "42");
        assert_eq!(PropValue::from(2.5).to_attribute_value(), "2.5");
        assert_eq!(PropValue::listener(|_| {}).to_attribute_value(), "function");
    }

    #[test]
    fn test_props_keep_first_insertion_position() {
        let mut props = Props::new();
        props.set("id", "a");
        props.set("class", "b");
        props.set("id", "c");

        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "class"]);
        assert_eq!(props.get("id"), Some(&PropValue::from("c")));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_props_remove() {
        let mut props = Props::new();
        props.set("id", "a");
        assert_eq!(props.remove("id"), Some(PropValue::from("a")));
        assert!(props.is_empty());
        assert_eq!(props.remove("id"), None);
    }

    #[test]
    fn test_listener_equality_is_identity() {
        let a = PropValue::listener(|_| {});
        let b = PropValue::listener(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
