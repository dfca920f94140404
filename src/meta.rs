//! Schema Metadata Compiler
//!
//! Every node type is compiled exactly once, when [`NodeTypeBuilder::build`]
//! runs. Compilation merges the field tables of the base types, adds the
//! type's own declarations, attaches defaults, and validates them. A type
//! whose defaults do not fit its declarations is never created.
//!
//! Fields live in two namespaces:
//! - **schema fields** describe the type itself (`identifier`, `key`,
//!   `namespace`) and are resolved once, here;
//! - **data fields** are what instances carry and what construction
//!   arguments bind to.
//!
//! Field order is insertion order. Bases are merged right to left, so the
//! leftmost base wins a conflict; a redeclared field keeps the position it
//! was first inserted at and takes the newer type and default.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::SchemaError;
use crate::node::Node;
use crate::render::Attrs;
use crate::value::{Value, ValueType};

/// Schema field holding the element tag
pub const IDENTIFIER: &str = "identifier";
/// Schema field holding a list's comma-separated key field names
pub const KEY: &str = "key";
/// Schema field holding a module's XML namespace
pub const NAMESPACE: &str = "namespace";
/// Data field declared by the leaf and leaf-list base types
pub const VALUE: &str = "value";

// =============================================================================
// Node Kind
// =============================================================================

/// The five YANG node kinds a concrete type can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Leaf,
    LeafList,
    Container,
    List,
    Module,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Module => "module",
        }
    }

    /// Whether instances hold entries added through `append`
    pub fn is_repeatable(&self) -> bool {
        matches!(self, NodeKind::LeafList | NodeKind::List)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Defaults
// =============================================================================

/// A data field default that also injects XML attributes when the field is
/// rendered by its owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrOverride {
    /// Concrete default; `None` leaves the field required
    pub default: Option<Value>,
    pub attrs: Attrs,
}

impl AttrOverride {
    /// An override without a concrete default
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            attrs: Attrs::new(),
        }
    }

    /// Add an attribute, keeping insertion order
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Default recorded for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    Value(Value),
    Override(AttrOverride),
}

impl FieldDefault {
    /// The concrete default value, if there is one
    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldDefault::Value(value) => Some(value),
            FieldDefault::Override(o) => o.default.as_ref(),
        }
    }

    /// Attributes to inject when rendering the field
    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            FieldDefault::Override(o) if !o.attrs.is_empty() => Some(&o.attrs),
            _ => None,
        }
    }
}

impl From<AttrOverride> for FieldDefault {
    fn from(o: AttrOverride) -> Self {
        FieldDefault::Override(o)
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        FieldDefault::Value(value)
    }
}

macro_rules! field_default_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldDefault {
                fn from(value: $ty) -> Self {
                    FieldDefault::Value(Value::from(value))
                }
            }
        )*
    };
}

field_default_from!(&str, String, bool, i32, i64, u32, u64, (), Node);

// =============================================================================
// Field Table
// =============================================================================

/// Compiled fields of one node type
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    data: IndexMap<String, ValueType>,
    schema: IndexMap<String, ValueType>,
    data_defaults: IndexMap<String, FieldDefault>,
    schema_defaults: IndexMap<String, FieldDefault>,
}

impl FieldTable {
    /// Data fields in declaration order
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &ValueType)> {
        self.data.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Schema fields in declaration order
    pub fn schema_fields(&self) -> impl Iterator<Item = (&str, &ValueType)> {
        self.schema.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Number of data fields
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data_index(&self, name: &str) -> Option<usize> {
        self.data.get_index_of(name)
    }

    pub fn data_type(&self, name: &str) -> Option<&ValueType> {
        self.data.get(name)
    }

    pub fn data_field_at(&self, index: usize) -> Option<(&str, &ValueType)> {
        self.data.get_index(index).map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn schema_type(&self, name: &str) -> Option<&ValueType> {
        self.schema.get(name)
    }

    /// Default of a data field
    pub fn default_for(&self, name: &str) -> Option<&FieldDefault> {
        self.data_defaults.get(name)
    }

    /// Default of a schema field
    pub fn schema_default(&self, name: &str) -> Option<&FieldDefault> {
        self.schema_defaults.get(name)
    }

    /// Attributes a data field's default injects at render time
    pub fn attrs_for(&self, name: &str) -> Option<&Attrs> {
        self.default_for(name).and_then(FieldDefault::attrs)
    }

    fn merge(&mut self, other: &FieldTable) {
        extend_cloned(&mut self.data, &other.data);
        extend_cloned(&mut self.schema, &other.schema);
        extend_cloned(&mut self.data_defaults, &other.data_defaults);
        extend_cloned(&mut self.schema_defaults, &other.schema_defaults);
    }

    fn schema_str(&self, name: &str) -> Option<String> {
        match self.schema_default(name)?.value()? {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn check_defaults(&self) -> Result<(), SchemaError> {
        for (field, default) in &self.schema_defaults {
            let value = match default {
                FieldDefault::Override(_) => {
                    return Err(SchemaError::OverrideOnSchemaField { field: field.clone() })
                }
                FieldDefault::Value(value) => value,
            };
            check_default(field, &self.schema[field], value)?;
        }

        for (field, default) in &self.data_defaults {
            // An override without a concrete default has nothing to check.
            if let Some(value) = default.value() {
                check_default(field, &self.data[field], value)?;
            }
        }

        Ok(())
    }
}

fn extend_cloned<V: Clone>(into: &mut IndexMap<String, V>, from: &IndexMap<String, V>) {
    for (name, value) in from {
        into.insert(name.clone(), value.clone());
    }
}

fn check_default(field: &str, expected: &ValueType, value: &Value) -> Result<(), SchemaError> {
    if expected.accepts(value) {
        Ok(())
    } else {
        Err(SchemaError::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: value.type_name(),
        })
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_.\-]*:)?[A-Za-z_][A-Za-z0-9_.\-]*$")
            .expect("identifier pattern is valid")
    })
}

// =============================================================================
// List Key
// =============================================================================

/// Compiled key of a list type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListKey {
    fields: Vec<String>,
    indices: Vec<usize>,
}

impl ListKey {
    fn compile(type_name: &str, key: &str, table: &FieldTable) -> Result<Self, SchemaError> {
        let mut fields = Vec::new();
        let mut indices = Vec::new();
        for field in key.split(',').map(str::trim) {
            let index = table.data_index(field).ok_or_else(|| SchemaError::UnknownKeyField {
                type_name: type_name.to_string(),
                field: field.to_string(),
            })?;
            fields.push(field.to_string());
            indices.push(index);
        }
        Ok(Self { fields, indices })
    }

    /// Key field names, in key order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Data field indices of the key fields, in key order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

// =============================================================================
// Node Type
// =============================================================================

/// A compiled node type
#[derive(Debug)]
pub struct NodeType {
    name: String,
    kind: Option<NodeKind>,
    base: bool,
    table: FieldTable,
    identifier: Option<String>,
    key: Option<ListKey>,
    namespace: Option<String>,
}

macro_rules! base_type {
    ($fn_name:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $fn_name() -> Arc<NodeType> {
            static TYPE: OnceLock<Arc<NodeType>> = OnceLock::new();
            Arc::clone(TYPE.get_or_init(base_types::$fn_name))
        }
    };
}

impl NodeType {
    /// Start declaring a node type
    pub fn builder(name: impl Into<String>) -> NodeTypeBuilder {
        NodeTypeBuilder::new(name)
    }

    base_type!(node, "Root of every node type; declares the `identifier` schema field");
    base_type!(leaf, "Base for leaf types; declares `value: any`");
    base_type!(leaf_list, "Base for leaf-list types; declares `value: any`");
    base_type!(container, "Base for container types");
    base_type!(list, "Base for list types; declares the `key` schema field");
    base_type!(module, "Base for module types; declares the `namespace` schema field");

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node kind, `None` for types that extend no kind
    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Element tag rendered for instances
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn key(&self) -> Option<&ListKey> {
        self.key.as_ref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Base types and types without a node kind cannot be instantiated
    pub fn is_abstract(&self) -> bool {
        self.base || self.kind.is_none()
    }

    /// Serializable summary of the compiled field table
    pub fn describe(&self) -> TypeDescription {
        let schema = self.table.schema_fields().map(|(name, ty)| FieldDescription {
            name: name.to_string(),
            ty: ty.clone(),
            schema: true,
            default: self.table.schema_default(name).and_then(FieldDefault::value).map(Value::to_string),
            attrs: Attrs::new(),
        });
        let data = self.table.data_fields().map(|(name, ty)| {
            let default = self.table.default_for(name);
            FieldDescription {
                name: name.to_string(),
                ty: ty.clone(),
                schema: false,
                default: default.and_then(FieldDefault::value).map(Value::to_string),
                attrs: default.and_then(FieldDefault::attrs).cloned().unwrap_or_default(),
            }
        });

        TypeDescription {
            name: self.name.clone(),
            kind: self.kind,
            identifier: self.identifier.clone(),
            key: self.key.as_ref().map(|k| k.fields.clone()),
            namespace: self.namespace.clone(),
            fields: schema.chain(data).collect(),
        }
    }
}

mod base_types {
    use super::*;

    fn base(
        name: &str,
        kind: Option<NodeKind>,
        parent: Option<Arc<NodeType>>,
        schema_field: Option<&str>,
        value_field: bool,
    ) -> Arc<NodeType> {
        let mut table = parent.map(|p| p.table.clone()).unwrap_or_default();
        if let Some(field) = schema_field {
            table.schema.insert(field.to_string(), ValueType::Str);
        }
        if value_field {
            table.data.insert(VALUE.to_string(), ValueType::Any);
        }
        Arc::new(NodeType {
            name: name.to_string(),
            kind,
            base: true,
            table,
            identifier: None,
            key: None,
            namespace: None,
        })
    }

    pub(super) fn node() -> Arc<NodeType> {
        base("Node", None, None, Some(IDENTIFIER), false)
    }

    pub(super) fn leaf() -> Arc<NodeType> {
        base("LeafNode", Some(NodeKind::Leaf), Some(NodeType::node()), None, true)
    }

    pub(super) fn leaf_list() -> Arc<NodeType> {
        base("LeafListNode", Some(NodeKind::LeafList), Some(NodeType::node()), None, true)
    }

    pub(super) fn container() -> Arc<NodeType> {
        base("ContainerNode", Some(NodeKind::Container), Some(NodeType::node()), None, false)
    }

    pub(super) fn list() -> Arc<NodeType> {
        base("ListNode", Some(NodeKind::List), Some(NodeType::node()), Some(KEY), false)
    }

    pub(super) fn module() -> Arc<NodeType> {
        base("ModuleNode", Some(NodeKind::Module), Some(NodeType::node()), Some(NAMESPACE), false)
    }
}

/// Serializable view of a compiled node type
#[derive(Debug, Clone, Serialize)]
pub struct TypeDescription {
    pub name: String,
    pub kind: Option<NodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub fields: Vec<FieldDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub schema: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: Attrs,
}

// =============================================================================
// Builder
// =============================================================================

/// Declaration of a node type, compiled by [`NodeTypeBuilder::build`]
#[derive(Debug, Clone)]
pub struct NodeTypeBuilder {
    name: String,
    bases: Vec<Arc<NodeType>>,
    schema_fields: Vec<(String, ValueType)>,
    data_fields: Vec<(String, ValueType)>,
    schema_defaults: Vec<(String, FieldDefault)>,
    data_defaults: Vec<(String, FieldDefault)>,
}

impl NodeTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            schema_fields: Vec::new(),
            data_fields: Vec::new(),
            schema_defaults: Vec::new(),
            data_defaults: Vec::new(),
        }
    }

    /// Add a base type. Bases listed first take precedence.
    pub fn extends(mut self, base: &Arc<NodeType>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    pub fn declare_schema_field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.schema_fields.push((name.into(), ty));
        self
    }

    pub fn declare_data_field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.data_fields.push((name.into(), ty));
        self
    }

    /// Default for a data field, local or inherited
    pub fn default(mut self, name: impl Into<String>, default: impl Into<FieldDefault>) -> Self {
        self.data_defaults.push((name.into(), default.into()));
        self
    }

    /// Default for a schema field, local or inherited
    pub fn schema_default(mut self, name: impl Into<String>, default: impl Into<FieldDefault>) -> Self {
        self.schema_defaults.push((name.into(), default.into()));
        self
    }

    pub fn identifier(self, tag: impl Into<String>) -> Self {
        self.schema_default(IDENTIFIER, Value::Str(tag.into()))
    }

    /// List key: one data field name, or several joined with commas
    pub fn key(self, key: impl Into<String>) -> Self {
        self.schema_default(KEY, Value::Str(key.into()))
    }

    pub fn namespace(self, namespace: impl Into<String>) -> Self {
        self.schema_default(NAMESPACE, Value::Str(namespace.into()))
    }

    /// Compile the declaration into a node type
    pub fn build(self) -> Result<Arc<NodeType>, SchemaError> {
        let NodeTypeBuilder {
            name,
            bases,
            schema_fields,
            data_fields,
            schema_defaults,
            data_defaults,
        } = self;

        let bases = if bases.is_empty() { vec![NodeType::node()] } else { bases };
        let kind = inherited_kind(&name, &bases)?;

        let mut table = FieldTable::default();
        for base in bases.iter().rev() {
            table.merge(&base.table);
        }
        for (field, ty) in schema_fields {
            table.schema.insert(field, ty);
        }
        for (field, ty) in data_fields {
            table.data.insert(field, ty);
        }
        for (field, default) in schema_defaults {
            if !table.schema.contains_key(&field) {
                return Err(SchemaError::UndeclaredField { type_name: name, field });
            }
            table.schema_defaults.insert(field, default);
        }
        for (field, default) in data_defaults {
            if !table.data.contains_key(&field) {
                return Err(SchemaError::UndeclaredField { type_name: name, field });
            }
            table.data_defaults.insert(field, default);
        }

        table.check_defaults()?;

        if matches!(kind, Some(NodeKind::Leaf | NodeKind::LeafList)) && table.len() != 1 {
            return Err(SchemaError::ValueFieldCount {
                type_name: name,
                count: table.len(),
            });
        }

        let identifier = table.schema_str(IDENTIFIER);
        if let Some(id) = &identifier {
            if !identifier_pattern().is_match(id) {
                return Err(SchemaError::InvalidIdentifier {
                    type_name: name,
                    identifier: id.clone(),
                });
            }
        }

        let key = match (kind, table.schema_str(KEY)) {
            (Some(NodeKind::List), Some(key)) => Some(ListKey::compile(&name, &key, &table)?),
            _ => None,
        };
        let namespace = table.schema_str(NAMESPACE);

        debug!(
            type_name = %name,
            kind = kind.map(|k| k.as_str()).unwrap_or("none"),
            fields = table.len(),
            "compiled node type"
        );

        Ok(Arc::new(NodeType {
            name,
            kind,
            base: false,
            table,
            identifier,
            key,
            namespace,
        }))
    }
}

fn inherited_kind(type_name: &str, bases: &[Arc<NodeType>]) -> Result<Option<NodeKind>, SchemaError> {
    let mut kind: Option<NodeKind> = None;
    for base_kind in bases.iter().filter_map(|b| b.kind) {
        match kind {
            None => kind = Some(base_kind),
            Some(k) if k != base_kind => {
                return Err(SchemaError::ConflictingKinds {
                    type_name: type_name.to_string(),
                    first: k.to_string(),
                    second: base_kind.to_string(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(ty: &NodeType) -> Vec<&str> {
        ty.table().data_fields().map(|(name, _)| name).collect()
    }

    fn person() -> Arc<NodeType> {
        NodeType::builder("Person")
            .extends(&NodeType::container())
            .identifier("person")
            .declare_data_field("firstname", ValueType::Str)
            .declare_data_field("lastname", ValueType::Str)
            .default("firstname", "Jane")
            .default("lastname", "Doe")
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_node_declares_identifier() {
        let node = NodeType::node();
        assert_eq!(node.table().schema_type(IDENTIFIER), Some(&ValueType::Str));
        assert!(node.is_abstract());
        assert!(node.table().is_empty());
    }

    #[test]
    fn test_kind_bases() {
        assert_eq!(field_names(&NodeType::leaf()), vec![VALUE]);
        assert_eq!(NodeType::list().table().schema_type(KEY), Some(&ValueType::Str));
        assert_eq!(NodeType::module().table().schema_type(NAMESPACE), Some(&ValueType::Str));
        assert!(Arc::ptr_eq(&NodeType::leaf(), &NodeType::leaf()));
    }

    #[test]
    fn test_local_fields_follow_inherited_fields() {
        let employee = NodeType::builder("Employee")
            .extends(&person())
            .declare_data_field("company", ValueType::Str)
            .build()
            .unwrap();

        assert_eq!(field_names(&employee), vec!["firstname", "lastname", "company"]);
        assert_eq!(employee.identifier(), Some("person"));
    }

    #[test]
    fn test_redeclared_field_keeps_position_and_takes_new_type() {
        let numbered = NodeType::builder("Numbered")
            .extends(&person())
            .declare_data_field("firstname", ValueType::Int)
            .default("firstname", 1)
            .build()
            .unwrap();

        assert_eq!(field_names(&numbered), vec!["firstname", "lastname"]);
        assert_eq!(numbered.table().data_type("firstname"), Some(&ValueType::Int));
        assert_eq!(
            numbered.table().default_for("firstname").and_then(FieldDefault::value),
            Some(&Value::Int(1))
        );
    }

    #[test]
    fn test_leftmost_base_wins() {
        let left = NodeType::builder("Left")
            .extends(&NodeType::container())
            .declare_data_field("shared", ValueType::Str)
            .declare_data_field("left", ValueType::Str)
            .build()
            .unwrap();
        let right = NodeType::builder("Right")
            .extends(&NodeType::container())
            .declare_data_field("shared", ValueType::Int)
            .declare_data_field("right", ValueType::Int)
            .build()
            .unwrap();

        let both = NodeType::builder("Both")
            .extends(&left)
            .extends(&right)
            .build()
            .unwrap();

        assert_eq!(field_names(&both), vec!["shared", "right", "left"]);
        assert_eq!(both.table().data_type("shared"), Some(&ValueType::Str));
    }

    #[test]
    fn test_leftmost_base_default_wins() {
        let left = NodeType::builder("Left")
            .extends(&NodeType::container())
            .declare_data_field("shared", ValueType::Str)
            .default("shared", "left")
            .build()
            .unwrap();
        let right = NodeType::builder("Right")
            .extends(&NodeType::container())
            .declare_data_field("shared", ValueType::Str)
            .default("shared", AttrOverride::with_default("right").attr("side", "right"))
            .build()
            .unwrap();

        let both = NodeType::builder("Both")
            .extends(&left)
            .extends(&right)
            .build()
            .unwrap();

        let default = both.table().default_for("shared");
        assert_eq!(default.and_then(FieldDefault::value), Some(&Value::from("left")));
        assert_eq!(both.table().attrs_for("shared"), None);
    }

    #[test]
    fn test_default_type_mismatch_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::container())
            .declare_data_field("mtu", ValueType::Int)
            .default("mtu", "1500")
            .build()
            .unwrap_err();

        assert_eq!(err.to_string(), "Expected default of int for mtu, got str.");
    }

    #[test]
    fn test_schema_field_default_type_mismatch_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::leaf())
            .schema_default(IDENTIFIER, 7)
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::TypeMismatch { ref field, .. } if field == IDENTIFIER));
    }

    #[test]
    fn test_override_on_schema_field_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::leaf())
            .schema_default(IDENTIFIER, AttrOverride::with_default("bad"))
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::OverrideOnSchemaField { field: IDENTIFIER.to_string() });
    }

    #[test]
    fn test_unset_override_skips_type_check() {
        let ty = NodeType::builder("Interfaces")
            .extends(&NodeType::container())
            .identifier("interfaces")
            .declare_data_field("mtu", ValueType::Int)
            .default("mtu", AttrOverride::new().attr("operation", "merge"))
            .build()
            .unwrap();

        let attrs = ty.table().attrs_for("mtu").unwrap();
        assert_eq!(attrs.get("operation").map(String::as_str), Some("merge"));
    }

    #[test]
    fn test_override_default_is_type_checked() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::container())
            .declare_data_field("mtu", ValueType::Int)
            .default("mtu", AttrOverride::with_default(true))
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn test_default_for_undeclared_field_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::container())
            .default("missing", "x")
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::UndeclaredField { ref field, .. } if field == "missing"));
    }

    #[test]
    fn test_conflicting_kinds_are_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::leaf())
            .extends(&NodeType::container())
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::ConflictingKinds { .. }));
    }

    #[test]
    fn test_leaf_requires_exactly_one_value_field() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::leaf())
            .declare_data_field("unit", ValueType::Str)
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::ValueFieldCount { type_name: "Bad".to_string(), count: 2 });
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::leaf())
            .identifier("has space")
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::InvalidIdentifier { .. }));
        assert!(identifier_pattern().is_match("oc-if:interfaces"));
    }

    #[test]
    fn test_composite_key_is_compiled() {
        let ty = NodeType::builder("Address")
            .extends(&NodeType::list())
            .identifier("address")
            .key("ip, prefix-length")
            .declare_data_field("ip", ValueType::Str)
            .declare_data_field("prefix-length", ValueType::UInt)
            .build()
            .unwrap();

        let key = ty.key().unwrap();
        assert_eq!(key.fields(), ["ip", "prefix-length"]);
        assert_eq!(key.indices(), [0, 1]);
    }

    #[test]
    fn test_unknown_key_field_is_rejected() {
        let err = NodeType::builder("Bad")
            .extends(&NodeType::list())
            .key("name")
            .declare_data_field("id", ValueType::Str)
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::UnknownKeyField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_type_without_kind_is_abstract() {
        let mixin = NodeType::builder("Named")
            .declare_data_field("name", ValueType::Str)
            .build()
            .unwrap();

        assert_eq!(mixin.kind(), None);
        assert!(mixin.is_abstract());

        let concrete = NodeType::builder("Tenant")
            .extends(&NodeType::container())
            .extends(&mixin)
            .identifier("tenant")
            .build()
            .unwrap();
        assert_eq!(concrete.kind(), Some(NodeKind::Container));
        assert!(!concrete.is_abstract());
        assert_eq!(field_names(&concrete), vec!["name"]);
    }

    #[test]
    fn test_describe() {
        let description = person().describe();
        let json = serde_json::to_value(&description).unwrap();

        assert_eq!(json["kind"], "container");
        assert_eq!(json["identifier"], "person");
        assert_eq!(json["fields"][0]["name"], IDENTIFIER);
        assert_eq!(json["fields"][0]["schema"], true);
        assert_eq!(json["fields"][1]["type"], "str");
        assert_eq!(json["fields"][1]["default"], "Jane");
    }
}
