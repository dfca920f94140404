//! XML rendering
//!
//! Every element renders as `<tag attrs>content</tag>`, with attributes as
//! ` name="value"` in map order. Nothing is escaped, no whitespace is added
//! between elements and empty elements are never self-closed.
//!
//! Rendering only reads the tree.

use std::fmt;

use indexmap::IndexMap;

use crate::meta::NodeKind;
use crate::node::{Node, NodeBody};
use crate::value::Value;

/// XML attributes, rendered in insertion order
pub type Attrs = IndexMap<String, String>;

/// Attribute the module namespace is rendered as
pub const XMLNS: &str = "xmlns";

impl Node {
    /// Render this node, adding `attrs` to each element it produces
    pub fn render(&self, attrs: Option<&Attrs>) -> String {
        let mut out = String::new();
        self.render_into(&mut out, attrs);
        out
    }

    /// Render this node without extra attributes
    pub fn to_xml(&self) -> String {
        self.render(None)
    }

    pub(crate) fn render_into(&self, out: &mut String, attrs: Option<&Attrs>) {
        let ty = self.node_type();
        let table = ty.table();
        let tag = self.identifier();

        match (self.kind(), self.body()) {
            (NodeKind::Module, NodeBody::Fields(values)) => {
                for ((name, _), value) in table.data_fields().zip(values) {
                    let mut child_attrs = Attrs::new();
                    if let Some(namespace) = ty.namespace() {
                        child_attrs.insert(XMLNS.to_string(), namespace.to_string());
                    }
                    extend(&mut child_attrs, attrs);
                    extend(&mut child_attrs, table.attrs_for(name));
                    let child_attrs = (!child_attrs.is_empty()).then_some(&child_attrs);
                    write_field(out, name, value, child_attrs);
                }
            }
            (NodeKind::Leaf, NodeBody::Fields(values)) => {
                write_element(out, tag, attrs, |out| {
                    for value in values {
                        write_value(out, value);
                    }
                });
            }
            (_, NodeBody::Fields(values)) => {
                write_element(out, tag, attrs, |out| {
                    for ((name, _), value) in table.data_fields().zip(values) {
                        write_field(out, name, value, table.attrs_for(name));
                    }
                });
            }
            (_, NodeBody::Values(store)) => {
                for value in store {
                    write_element(out, tag, attrs, |out| write_value(out, value));
                }
            }
            (_, NodeBody::Entries(store)) => {
                for entry in store {
                    write_element(out, tag, attrs, |out| {
                        for (name, value) in entry.fields() {
                            write_field(out, name, value, table.attrs_for(name));
                        }
                    });
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

fn extend(into: &mut Attrs, from: Option<&Attrs>) {
    if let Some(from) = from {
        for (name, value) in from {
            into.insert(name.clone(), value.clone());
        }
    }
}

fn write_element(out: &mut String, tag: &str, attrs: Option<&Attrs>, content: impl FnOnce(&mut String)) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs);
    out.push('>');
    content(out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_attrs(out: &mut String, attrs: Option<&Attrs>) {
    for (name, value) in attrs.into_iter().flatten() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Node(node) => node.render_into(out, None),
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// A node renders itself; a scalar in a composite renders as an element
/// named after its field.
fn write_field(out: &mut String, name: &str, value: &Value, attrs: Option<&Attrs>) {
    match value {
        Value::Node(node) => node.render_into(out, attrs),
        scalar => write_element(out, name, attrs, |out| out.push_str(&scalar.to_string())),
    }
}
