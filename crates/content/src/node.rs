// ABOUTME: The content node union (text leaf or element) and its JSON wire format.
// ABOUTME: Text encodes as a bare string; elements as {"tag","attrs","children"} with empty keys omitted.

use std::collections::BTreeMap;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ContentError;

/// Deepest element nesting the converter emits and the decoder accepts.
///
/// Each element takes two JSON levels (object and `children` array), and a
/// page echoed inside a response envelope adds three more, so this keeps every
/// accepted tree under serde_json's recursion limit of 128.
pub const MAX_DEPTH: usize = 60;

/// A single node of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// An element node: a tag with attributes and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => Some(el),
        }
    }

    /// Concatenates all descendant text in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => {
                for child in &el.children {
                    child.push_text(out);
                }
            }
        }
    }

    /// Decodes a node from a JSON value.
    ///
    /// Strings become text nodes and objects become elements. `tag` is required
    /// on objects; non-string attribute values and children that are neither
    /// strings nor objects are skipped. Elements nested deeper than
    /// [`MAX_DEPTH`] are rejected as invalid.
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        Node::from_value_at(value, 1)
    }

    fn from_value_at(value: &Value, depth: usize) -> Result<Self, ContentError> {
        match value {
            Value::String(s) => Ok(Node::Text(s.clone())),
            Value::Object(map) => Element::from_map(map, depth).map(Node::Element),
            other => Err(ContentError::invalid_node(format!(
                "expected a string or an object, found {}",
                json_kind(other)
            ))),
        }
    }
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn from_map(map: &Map<String, Value>, depth: usize) -> Result<Self, ContentError> {
        if depth > MAX_DEPTH {
            return Err(ContentError::invalid_node(format!(
                "elements nested deeper than {}",
                MAX_DEPTH
            )));
        }

        let tag = match map.get("tag") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                return Err(ContentError::invalid_node(format!(
                    "`tag` must be a string, found {}",
                    json_kind(other)
                )))
            }
            None => return Err(ContentError::invalid_node("missing `tag`")),
        };

        let attrs = match map.get("attrs") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(attrs)) => attrs
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect(),
            Some(other) => {
                return Err(ContentError::invalid_node(format!(
                    "`attrs` must be an object, found {}",
                    json_kind(other)
                )))
            }
        };

        let children = match map.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    if item.is_string() || item.is_object() {
                        children.push(Node::from_value_at(item, depth + 1)?);
                    }
                }
                children
            }
            Some(other) => {
                return Err(ContentError::invalid_node(format!(
                    "`children` must be an array, found {}",
                    json_kind(other)
                )))
            }
        };

        Ok(Self {
            tag,
            attrs,
            children,
        })
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(s) => serializer.serialize_str(s),
            Node::Element(el) => el.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::from_value(&value).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Element::from_map(&map, 1).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "invalid node: expected an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Encodes a content sequence as a JSON array.
pub fn encode_content(content: &[Node]) -> Result<String, ContentError> {
    Ok(serde_json::to_string(content)?)
}

/// Decodes a JSON array into a content sequence.
pub fn decode_content(json: &str) -> Result<Vec<Node>, ContentError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items.iter().map(Node::from_value).collect(),
        other => Err(ContentError::invalid_node(format!(
            "content must be an array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
