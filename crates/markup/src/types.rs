//! Core value types shared by the slot tree and the serializer
//!
//! Key design principles:
//! 1. Output format is a closed enum, parsed once at the boundary
//! 2. Attributes keep insertion order (SmallVec, most elements have <4)
//! 3. Leaves are plain data, no trait objects

use crate::error::SerializeError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Props handed to components (opaque to the serializer)
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Markup flavour to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Xml,
    #[default]
    Html,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Html => "html",
        }
    }
}

impl FromStr for Format {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xml" => Ok(Format::Xml),
            "html" => Ok(Format::Html),
            other => Err(SerializeError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element attributes
///
/// Keys are unique; re-inserting a key overwrites its value but keeps
/// its original position, so emission order is first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    entries: SmallVec<[(String, String); 4]>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an attribute
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// A value that is not a node
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Null,
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Leaf {
    /// Leaves that contribute nothing to the output
    pub fn is_blank(&self) -> bool {
        matches!(self, Leaf::Null | Leaf::Undefined | Leaf::Bool(false))
    }

    /// Unescaped string form
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Leaf::Null | Leaf::Undefined | Leaf::Bool(false) => Cow::Borrowed(""),
            Leaf::Bool(true) => Cow::Borrowed("true"),
            Leaf::Int(n) => Cow::Owned(n.to_string()),
            Leaf::Float(n) => Cow::Owned(format_float(*n)),
            Leaf::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// Number formatting as the scripting hosts print it
fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Shortest round-trip mantissa, explicit exponent sign
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl From<&str> for Leaf {
    fn from(s: &str) -> Self {
        Leaf::Text(s.to_string())
    }
}

impl From<String> for Leaf {
    fn from(s: String) -> Self {
        Leaf::Text(s)
    }
}

impl From<bool> for Leaf {
    fn from(b: bool) -> Self {
        Leaf::Bool(b)
    }
}

impl From<i32> for Leaf {
    fn from(n: i32) -> Self {
        Leaf::Int(n.into())
    }
}

impl From<i64> for Leaf {
    fn from(n: i64) -> Self {
        Leaf::Int(n)
    }
}

impl From<u32> for Leaf {
    fn from(n: u32) -> Self {
        Leaf::Int(n.into())
    }
}

impl From<f64> for Leaf {
    fn from(n: f64) -> Self {
        Leaf::Float(n)
    }
}

impl<T: Into<Leaf>> From<Option<T>> for Leaf {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Leaf::Null)
    }
}

/// Elements emitted without a closing tag in html
pub const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];
