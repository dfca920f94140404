//! YANG Nodes
//!
//! Typed, YANG-style node trees declared in Rust and rendered to XML.
//!
//! ## Features
//!
//! - **Compiled Schemas**: Node types are compiled once; field tables merge
//!   across base types and defaults are type-checked before any instance exists
//! - **Strict Construction**: Positional, named and default arguments with
//!   exact arity and type checks
//! - **Keyed Lists**: List entries are unique by key, first insertion wins
//! - **XML Rendering**: Deterministic output with per-field attribute overrides
//!   and module namespaces
//!
//! ## Architecture
//!
//! ```text
//! NodeTypeBuilder ──build()──▶ NodeType (FieldTable, identifier, key, namespace)
//!                                 │
//!        Args ──resolve()─────────┤
//!                                 ▼
//!                               Node ──append()──▶ EntryStore
//!                                 │
//!                                 └──render()──▶ <tag attrs>…</tag>
//! ```
//!
//! ## Example
//!
//! ```
//! use yang_nodes::{args, Node, NodeType, ValueType};
//!
//! let name = NodeType::builder("Name")
//!     .extends(&NodeType::leaf())
//!     .identifier("name")
//!     .declare_data_field("value", ValueType::Str)
//!     .build()?;
//!
//! let node = Node::new(&name, args!["xe-0/0/0"])?;
//! assert_eq!(node.to_xml(), "<name>xe-0/0/0</name>");
//! # Ok::<(), yang_nodes::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod meta;
pub mod models;
pub mod node;
pub mod render;
pub mod resolve;
pub mod store;
pub mod value;

pub use config::{ModelConfig, RenderConfig, YangConfig};
pub use error::{Error, NodeError, Result, SchemaError};
pub use meta::{AttrOverride, FieldDefault, FieldTable, NodeKind, NodeType, NodeTypeBuilder, TypeDescription};
pub use models::InterfacesModel;
pub use node::{Entry, Node};
pub use render::Attrs;
pub use resolve::{resolve, Args};
pub use store::{EntryKey, EntryStore};
pub use value::{Value, ValueType};
