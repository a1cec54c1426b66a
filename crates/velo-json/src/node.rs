//! The dynamic value tree produced by the parser.
//!
//! A [`Node`] is built once, in its final variant, and is read-only afterwards.
//! Children are owned by their parent, so a finished tree is `Send + Sync`
//! and can be shared between threads for concurrent reads.
//!
//! Reads go through fail-fast accessors: asking a node for a variant it does
//! not hold returns a [`TypeMismatchError`] rather than a default value.

use std::collections::HashMap;
use std::fmt;

use crate::error::TypeMismatchError;

/// Key → child mapping of an object node. Key order is not preserved.
pub type Object = HashMap<String, Node>;

/// The variant tag of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed JSON value. All numbers are `f64`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// True for null, `""`, `[]` and `{}`.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Null => true,
            Node::String(s) => s.is_empty(),
            Node::Array(items) => items.is_empty(),
            Node::Object(entries) => entries.is_empty(),
            Node::Bool(_) | Node::Number(_) => false,
        }
    }

    pub fn as_bool(&self) -> Result<bool, TypeMismatchError> {
        match self {
            Node::Bool(b) => Ok(*b),
            other => Err(other.mismatch(NodeKind::Bool)),
        }
    }

    pub fn as_number(&self) -> Result<f64, TypeMismatchError> {
        match self {
            Node::Number(n) => Ok(*n),
            other => Err(other.mismatch(NodeKind::Number)),
        }
    }

    pub fn as_str(&self) -> Result<&str, TypeMismatchError> {
        match self {
            Node::String(s) => Ok(s),
            other => Err(other.mismatch(NodeKind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&[Node], TypeMismatchError> {
        match self {
            Node::Array(items) => Ok(items),
            other => Err(other.mismatch(NodeKind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&Object, TypeMismatchError> {
        match self {
            Node::Object(entries) => Ok(entries),
            other => Err(other.mismatch(NodeKind::Object)),
        }
    }

    /// Look up `key` in an object node, ignoring ASCII case.
    ///
    /// An exact match wins; among several case-insensitive matches the
    /// lexicographically smallest key is used so the result is deterministic.
    pub fn get_ignore_case(&self, key: &str) -> Result<Option<&Node>, TypeMismatchError> {
        let entries = self.as_object()?;
        if let Some(exact) = entries.get(key) {
            return Ok(Some(exact));
        }
        Ok(entries
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v))
    }

    fn mismatch(&self, expected: NodeKind) -> TypeMismatchError {
        TypeMismatchError {
            expected,
            found: self.kind(),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Object> for Node {
    fn from(entries: Object) -> Self {
        Node::Object(entries)
    }
}

impl FromIterator<(String, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Node::Object(iter.into_iter().collect())
    }
}
