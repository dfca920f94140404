//! Argument Resolver
//!
//! Binds construction or append arguments to a type's data fields. Arity is
//! checked before any field is looked at; after that fields resolve in
//! declaration order, positional first, then named, then the compiled
//! default. The first failing field aborts resolution.

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::NodeError;
use crate::meta::FieldTable;
use crate::value::Value;

/// Positional and named arguments for a construction or append call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<Value>,
    named: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Number of arguments given, positional and named
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Into<Value>> FromIterator<V> for Args {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            named: IndexMap::new(),
        }
    }
}

/// Build positional [`Args`]: `args!["xe-0/0/0", 1500]`
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.arg($value))+
    };
}

/// Resolve `args` against the data fields of `table`.
///
/// Returns one `(field, value)` pair per data field, in field order.
pub fn resolve(
    type_name: &str,
    table: &FieldTable,
    args: Args,
) -> Result<Vec<(String, Value)>, NodeError> {
    let given = args.len();
    if given > table.len() {
        return Err(NodeError::Arity {
            type_name: type_name.to_string(),
            expected: table.len(),
            given,
        });
    }

    let Args { positional, mut named } = args;
    let mut positional = positional.into_iter();
    let mut resolved = Vec::with_capacity(table.len());

    for (field, ty) in table.data_fields() {
        let supplied = match positional.next() {
            Some(value) => Some(value),
            None => named.shift_remove(field),
        };

        let value = match supplied {
            Some(value) => {
                if !ty.accepts(&value) {
                    return Err(NodeError::ArgumentType {
                        field: field.to_string(),
                        expected: ty.to_string(),
                        actual: value.type_name(),
                    });
                }
                value
            }
            // An override without a concrete default leaves the field required.
            None => table
                .default_for(field)
                .and_then(|default| default.value())
                .cloned()
                .ok_or_else(|| NodeError::MissingArgument {
                    field: field.to_string(),
                })?,
        };

        resolved.push((field.to_string(), value));
    }

    if !named.is_empty() {
        let ignored: Vec<&str> = named.keys().map(String::as_str).collect();
        warn!(type_name, ?ignored, "ignoring named arguments that match no field");
    }
    trace!(type_name, given, fields = resolved.len(), "resolved arguments");

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{AttrOverride, NodeType};
    use crate::value::ValueType;
    use std::sync::Arc;

    fn interface() -> Arc<NodeType> {
        NodeType::builder("Interface")
            .extends(&NodeType::container())
            .identifier("interface")
            .declare_data_field("name", ValueType::Str)
            .declare_data_field("mtu", ValueType::UInt)
            .declare_data_field("enabled", ValueType::Bool)
            .default("mtu", 1500u64)
            .default("enabled", true)
            .build()
            .unwrap()
    }

    fn values(resolved: Vec<(String, Value)>) -> Vec<Value> {
        resolved.into_iter().map(|(_, value)| value).collect()
    }

    #[test]
    fn test_positional_arguments_bind_in_field_order() {
        let ty = interface();
        let resolved = resolve(ty.name(), ty.table(), args!["xe-0/0/0", 9000u64, false]).unwrap();

        let names: Vec<&str> = resolved.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["name", "mtu", "enabled"]);
        assert_eq!(
            values(resolved),
            vec![Value::from("xe-0/0/0"), Value::from(9000u64), Value::from(false)]
        );
    }

    #[test]
    fn test_named_arguments_bind_by_name() {
        let ty = interface();
        let args = Args::new().named("enabled", false).named("name", "lo0");
        let resolved = resolve(ty.name(), ty.table(), args).unwrap();

        assert_eq!(
            values(resolved),
            vec![Value::from("lo0"), Value::from(1500u64), Value::from(false)]
        );
    }

    #[test]
    fn test_omitted_arguments_use_defaults() {
        let ty = interface();
        let resolved = resolve(ty.name(), ty.table(), args!["lo0"]).unwrap();

        assert_eq!(
            values(resolved),
            vec![Value::from("lo0"), Value::from(1500u64), Value::from(true)]
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let ty = interface();
        let args = args!["lo0", 1u64, true].named("extra", 1);
        let err = resolve(ty.name(), ty.table(), args).unwrap_err();

        assert_eq!(err.to_string(), "Interface takes 3 arguments, but 4 were given.");
    }

    #[test]
    fn test_arity_is_checked_before_types() {
        let ty = interface();
        let err = resolve(ty.name(), ty.table(), args![1, 2, 3, 4]).unwrap_err();

        assert!(matches!(err, NodeError::Arity { expected: 3, given: 4, .. }));
    }

    #[test]
    fn test_missing_required_argument() {
        let ty = interface();
        let err = resolve(ty.name(), ty.table(), Args::new().named("mtu", 1u64)).unwrap_err();

        assert_eq!(err.to_string(), "Missing required argument: name");
    }

    #[test]
    fn test_argument_type_mismatch() {
        let ty = interface();
        let err = resolve(ty.name(), ty.table(), args!["lo0", "jumbo"]).unwrap_err();

        assert_eq!(
            err,
            NodeError::ArgumentType {
                field: "mtu".to_string(),
                expected: "uint".to_string(),
                actual: "str".to_string(),
            }
        );
    }

    #[test]
    fn test_override_default_is_unwrapped() {
        let ty = NodeType::builder("Config")
            .extends(&NodeType::container())
            .identifier("config")
            .declare_data_field("description", ValueType::Str)
            .default("description", AttrOverride::with_default("uplink").attr("operation", "replace"))
            .build()
            .unwrap();

        let resolved = resolve(ty.name(), ty.table(), Args::new()).unwrap();
        assert_eq!(values(resolved), vec![Value::from("uplink")]);
    }

    #[test]
    fn test_unset_override_default_is_required() {
        let ty = NodeType::builder("Config")
            .extends(&NodeType::container())
            .identifier("config")
            .declare_data_field("description", ValueType::Str)
            .default("description", AttrOverride::new().attr("operation", "delete"))
            .build()
            .unwrap();

        let err = resolve(ty.name(), ty.table(), Args::new()).unwrap_err();
        assert_eq!(err, NodeError::MissingArgument { field: "description".to_string() });
    }

    #[test]
    fn test_unknown_named_arguments_are_ignored() {
        let ty = interface();
        let resolved = resolve(ty.name(), ty.table(), Args::new().named("name", "lo0").named("speed", 10)).unwrap();

        assert_eq!(values(resolved)[0], Value::from("lo0"));
    }
}
