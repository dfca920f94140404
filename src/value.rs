//! Field types and field values
//!
//! Declared field types are checked exactly: a value matches a type only if
//! it is of that type, with no widening between integer kinds and no
//! subtyping between node types. `Any` is the only type that accepts
//! everything.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::meta::NodeType;
use crate::node::Node;

/// Declared type of a data or schema field
#[derive(Debug, Clone)]
pub enum ValueType {
    /// Accepts any value
    Any,
    /// The YANG `empty` type
    Empty,
    Bool,
    Int,
    UInt,
    Str,
    /// An instance of exactly this node type
    Node(Arc<NodeType>),
}

impl ValueType {
    /// Type for fields holding instances of `ty`
    pub fn node(ty: &Arc<NodeType>) -> Self {
        ValueType::Node(Arc::clone(ty))
    }

    /// Whether `value` is of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (ValueType::Empty, Value::Empty)
            | (ValueType::Bool, Value::Bool(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::UInt, Value::UInt(_))
            | (ValueType::Str, Value::Str(_)) => true,
            (ValueType::Node(ty), Value::Node(node)) => Arc::ptr_eq(ty, node.node_type()),
            _ => false,
        }
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueType::Node(a), ValueType::Node(b)) => Arc::ptr_eq(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for ValueType {}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => f.write_str("any"),
            ValueType::Empty => f.write_str("empty"),
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int => f.write_str("int"),
            ValueType::UInt => f.write_str("uint"),
            ValueType::Str => f.write_str("str"),
            ValueType::Node(ty) => f.write_str(ty.name()),
        }
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A field value
///
/// Node values compare and hash by type and rendered content, which is what
/// lets a node-valued field act as a list key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
    Node(Node),
}

impl Value {
    /// Name of this value's type, as used in error messages
    pub fn type_name(&self) -> String {
        match self {
            Value::Empty => "empty".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::UInt(_) => "uint".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::Node(node) => node.node_type().name().to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Str(s) => f.write_str(s),
            Value::Node(node) => f.write_str(&node.render(None)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Empty
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}
