//! Bundled OpenConfig interfaces model
//!
//! ```text
//! OpenConfigInterfaces (module, namespace)
//! └── Interfaces   (container "interfaces")
//!     └── Interface (list "interface", key "name")
//!         └── Name  (leaf "name")
//! ```

use std::sync::Arc;

use crate::args;
use crate::config::ModelConfig;
use crate::error::{NodeError, SchemaError};
use crate::meta::{AttrOverride, NodeType};
use crate::node::Node;
use crate::resolve::Args;
use crate::value::ValueType;

/// Namespace of the OpenConfig interfaces module
pub const OPENCONFIG_INTERFACES_NS: &str = "http://openconfig.net/yang/interfaces";

/// Compiled node types of the interfaces model
#[derive(Debug, Clone)]
pub struct InterfacesModel {
    pub name: Arc<NodeType>,
    pub interface: Arc<NodeType>,
    pub interfaces: Arc<NodeType>,
    pub module: Arc<NodeType>,
}

impl InterfacesModel {
    pub fn new(namespace: &str) -> Result<Self, SchemaError> {
        Self::with_operation(namespace, None)
    }

    /// Declare the model. With an `operation`, every rendered interface
    /// entry carries `operation="{operation}"`.
    pub fn with_operation(namespace: &str, operation: Option<&str>) -> Result<Self, SchemaError> {
        let name = NodeType::builder("Name")
            .extends(&NodeType::leaf())
            .identifier("name")
            .declare_data_field("value", ValueType::Str)
            .build()?;

        let interface = NodeType::builder("Interface")
            .extends(&NodeType::list())
            .identifier("interface")
            .key("name")
            .declare_data_field("name", ValueType::node(&name))
            .build()?;

        let mut interfaces = NodeType::builder("Interfaces")
            .extends(&NodeType::container())
            .identifier("interfaces")
            .declare_data_field("interface", ValueType::node(&interface));
        if let Some(operation) = operation {
            interfaces = interfaces.default("interface", AttrOverride::new().attr("operation", operation));
        }
        let interfaces = interfaces.build()?;

        let module = NodeType::builder("OpenConfigInterfaces")
            .extends(&NodeType::module())
            .identifier("openconfig-interfaces")
            .namespace(namespace)
            .declare_data_field("interfaces", ValueType::node(&interfaces))
            .build()?;

        Ok(Self {
            name,
            interface,
            interfaces,
            module,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, SchemaError> {
        Self::with_operation(&config.namespace, config.operation.as_deref())
    }

    /// All types, leaf first
    pub fn types(&self) -> [&Arc<NodeType>; 4] {
        [&self.name, &self.interface, &self.interfaces, &self.module]
    }

    /// Build a module document with one interface entry per name
    pub fn document<I, S>(&self, names: I) -> Result<Node, NodeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = Node::new(&self.interface, Args::new())?;
        let container = Node::new(&self.interfaces, args![list])?;
        let mut module = Node::new(&self.module, args![container])?;

        let list = module
            .child_mut("interfaces")
            .and_then(|c| c.child_mut("interface"))
            .ok_or_else(|| NodeError::UnknownField {
                type_name: self.interfaces.name().to_string(),
                field: "interface".to_string(),
            })?;
        for name in names {
            let name: String = name.into();
            let name = Node::new(&self.name, args![name])?;
            list.append(args![name])?;
        }

        Ok(module)
    }
}
