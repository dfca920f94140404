//! Node instances
//!
//! A [`Node`] is an instance of a concrete [`NodeType`]. Leaf, container and
//! module nodes hold one value per data field, addressed by the field's
//! compiled index. List and leaf-list nodes start empty and grow through
//! [`Node::append`].

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::trace;

use crate::error::NodeError;
use crate::meta::{NodeKind, NodeType, IDENTIFIER, KEY};
use crate::resolve::{resolve, Args};
use crate::store::{EntryKey, EntryStore};
use crate::value::Value;

/// An instance of a node type
#[derive(Debug, Clone)]
pub struct Node {
    ty: Arc<NodeType>,
    kind: NodeKind,
    body: NodeBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeBody {
    /// Leaf, container and module field values, by field index
    Fields(Vec<Value>),
    /// Leaf-list values, keyed by themselves
    Values(EntryStore<Value>),
    /// List entries, keyed by their key fields
    Entries(EntryStore<Entry>),
}

/// One entry of a list node
#[derive(Debug, Clone)]
pub struct Entry {
    ty: Arc<NodeType>,
    values: Vec<Value>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.values == other.values
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.name().hash(state);
        self.values.hash(state);
    }
}

impl Entry {
    /// Value of a data field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.ty.table().data_index(field).and_then(|i| self.values.get(i))
    }

    /// `(field, value)` pairs in field order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .table()
            .data_fields()
            .map(|(name, _)| name)
            .zip(self.values.iter())
    }

    /// Key values of this entry, in key order
    pub fn key(&self) -> EntryKey {
        let indices = self.ty.key().map(|k| k.indices()).unwrap_or_default();
        EntryKey::new(indices.iter().map(|&i| self.values[i].clone()).collect())
    }
}

impl Node {
    /// Instantiate `ty` with construction arguments.
    ///
    /// List and leaf-list nodes take no arguments; entries are added with
    /// [`Node::append`].
    pub fn new(ty: &Arc<NodeType>, args: Args) -> Result<Self, NodeError> {
        let kind = match ty.kind() {
            Some(kind) if !ty.is_abstract() => kind,
            _ => {
                return Err(NodeError::Instantiation {
                    type_name: ty.name().to_string(),
                })
            }
        };

        if ty.identifier().is_none() {
            return Err(missing_schema_value(ty, IDENTIFIER));
        }

        let body = match kind {
            NodeKind::Leaf | NodeKind::Container | NodeKind::Module => {
                let resolved = resolve(ty.name(), ty.table(), args)?;
                NodeBody::Fields(resolved.into_iter().map(|(_, value)| value).collect())
            }
            NodeKind::LeafList | NodeKind::List => {
                if !args.is_empty() {
                    return Err(NodeError::Arity {
                        type_name: ty.name().to_string(),
                        expected: 0,
                        given: args.len(),
                    });
                }
                if kind == NodeKind::List {
                    if ty.key().is_none() {
                        return Err(missing_schema_value(ty, KEY));
                    }
                    NodeBody::Entries(EntryStore::new())
                } else {
                    NodeBody::Values(EntryStore::new())
                }
            }
        };

        Ok(Self {
            ty: Arc::clone(ty),
            kind,
            body,
        })
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.ty
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Element tag of this node
    pub fn identifier(&self) -> &str {
        self.ty.identifier().unwrap_or_default()
    }

    pub(crate) fn body(&self) -> &NodeBody {
        &self.body
    }

    /// Value of a data field of a leaf, container or module node
    pub fn get(&self, field: &str) -> Option<&Value> {
        match &self.body {
            NodeBody::Fields(values) => self.ty.table().data_index(field).and_then(|i| values.get(i)),
            _ => None,
        }
    }

    /// Node held by a data field
    pub fn child(&self, field: &str) -> Option<&Node> {
        self.get(field).and_then(Value::as_node)
    }

    /// Mutable access to the node held by a data field
    pub fn child_mut(&mut self, field: &str) -> Option<&mut Node> {
        let index = self.ty.table().data_index(field)?;
        match &mut self.body {
            NodeBody::Fields(values) => values.get_mut(index).and_then(Value::as_node_mut),
            _ => None,
        }
    }

    /// Reassign a data field. The value must match the field's type.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), NodeError> {
        let value = value.into();
        let NodeBody::Fields(values) = &mut self.body else {
            return Err(wrong_kind(&self.ty, self.kind, "set"));
        };

        let table = self.ty.table();
        let (index, ty) = table
            .data_index(field)
            .and_then(|i| table.data_field_at(i).map(|(_, ty)| (i, ty)))
            .ok_or_else(|| NodeError::UnknownField {
                type_name: self.ty.name().to_string(),
                field: field.to_string(),
            })?;

        if !ty.accepts(&value) {
            return Err(NodeError::ArgumentType {
                field: field.to_string(),
                expected: ty.to_string(),
                actual: value.type_name(),
            });
        }

        values[index] = value;
        Ok(())
    }

    /// Add an entry to a list or leaf-list node.
    ///
    /// Arguments bind exactly as they do for construction. Returns `false`
    /// when an entry with the same key already exists; the existing entry is
    /// kept.
    pub fn append(&mut self, args: Args) -> Result<bool, NodeError> {
        let ty = &self.ty;
        let inserted = match &mut self.body {
            NodeBody::Values(store) => {
                let value = resolve(ty.name(), ty.table(), args)?
                    .into_iter()
                    .map(|(_, value)| value)
                    .next()
                    .ok_or_else(|| NodeError::MissingArgument {
                        field: crate::meta::VALUE.to_string(),
                    })?;
                store.insert_if_absent(EntryKey::from(value.clone()), value)
            }
            NodeBody::Entries(store) => {
                let values: Vec<Value> = resolve(ty.name(), ty.table(), args)?
                    .into_iter()
                    .map(|(_, value)| value)
                    .collect();
                let entry = Entry {
                    ty: Arc::clone(ty),
                    values,
                };
                store.insert_if_absent(entry.key(), entry)
            }
            NodeBody::Fields(_) => return Err(wrong_kind(ty, self.kind, "append")),
        };

        trace!(type_name = ty.name(), inserted, "appended entry");
        Ok(inserted)
    }

    /// Entries of a list node, in insertion order
    pub fn entries(&self) -> Option<&EntryStore<Entry>> {
        match &self.body {
            NodeBody::Entries(store) => Some(store),
            _ => None,
        }
    }

    /// Values of a leaf-list node, in insertion order
    pub fn leaf_values(&self) -> Option<&EntryStore<Value>> {
        match &self.body {
            NodeBody::Values(store) => Some(store),
            _ => None,
        }
    }

    /// Number of entries of a list or leaf-list node
    pub fn entry_count(&self) -> Option<usize> {
        match &self.body {
            NodeBody::Fields(_) => None,
            NodeBody::Values(store) => Some(store.len()),
            NodeBody::Entries(store) => Some(store.len()),
        }
    }
}

// Two nodes are equal when they share a type and hold equal values.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.body == other.body
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.name().hash(state);
        self.body.hash(state);
    }
}

fn missing_schema_value(ty: &NodeType, field: &str) -> NodeError {
    NodeError::MissingSchemaValue {
        type_name: ty.name().to_string(),
        field: field.to_string(),
    }
}

fn wrong_kind(ty: &NodeType, kind: NodeKind, operation: &'static str) -> NodeError {
    NodeError::WrongKind {
        type_name: ty.name().to_string(),
        kind: kind.to_string(),
        operation,
    }
}
