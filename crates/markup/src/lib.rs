//! Slot Tree Markup Serializer
//!
//! One-shot conversion of a declarative UI tree into an XML or HTML string.
//!
//! ## Core Design
//!
//! ```text
//! Slot tree → Dispatcher → Expander (components, memoized)
//!                        → Element renderer (format-dependent self-close)
//!                        → Escaper (text + attribute values) → String
//! ```
//!
//! ## Example
//!
//! ```
//! use markup::{serialize, Format, Slot};
//!
//! let tree: Slot = Slot::element("div").attr("id", "a").child("x & y").into();
//! assert_eq!(serialize(&tree, Format::Html).unwrap(), r#"<div id="a">x &amp; y</div>"#);
//! ```

pub mod component;
pub mod error;
pub mod parse;
pub mod serializer;
pub mod slot;
pub mod types;
pub mod utils;

pub use component::{ClassComponent, Component};
pub use error::{ComponentError, Result, SerializeError};
pub use parse::{parse_tree, parse_tree_str};
pub use serializer::{serialize, Serializer, SerializerConfig};
pub use slot::{ChildTree, ComponentSlot, ElementSlot, FragmentSlot, Slot, SlotKind};
pub use types::*;
