//! Slot tree - the declarative UI description handed to the serializer
//!
//! Design:
//! - Closed sum type, one variant per node kind
//! - Component slots own a one-shot memo cell for their rendered children
//! - Slots are `Send` but not `Sync`: the memo is written through `&Slot`,
//!   so one instance cannot be serialized from two threads at once

use crate::component::{ClassComponent, ClassFactory, Component};
use crate::error::ComponentError;
use crate::types::{Attributes, Leaf, Props};
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Node kind, as exposed by the tree-construction side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Class,
    Function,
    Element,
    Null,
    Leaf,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotKind::Class => "class",
            SlotKind::Function => "function",
            SlotKind::Element => "element",
            SlotKind::Null => "null",
            SlotKind::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

/// One unit of the tree
#[derive(Debug, Clone)]
pub enum Slot {
    Class(ComponentSlot),
    Function(ComponentSlot),
    Element(ElementSlot),
    /// Fragment: children only, no markup of its own
    Null(FragmentSlot),
    Leaf(Leaf),
}

impl Slot {
    /// Class component slot; `C` is instantiated with `props` when expanded
    pub fn class<C>(props: Props) -> Self
    where
        C: ClassComponent + 'static,
    {
        Slot::Class(ComponentSlot::new(
            Arc::new(ClassFactory::<C>::new()),
            std::any::type_name::<C>(),
            props,
        ))
    }

    /// Function component slot
    pub fn function<F>(component: F, props: Props) -> Self
    where
        F: Fn(&Props) -> Result<ChildTree, ComponentError> + Send + Sync + 'static,
    {
        Slot::Function(ComponentSlot::new(
            Arc::new(component),
            std::any::type_name::<F>(),
            props,
        ))
    }

    /// Function component slot from a shared component
    pub fn component(component: Arc<dyn Component>, props: Props) -> Self {
        Slot::Function(ComponentSlot::new(component, "dyn Component", props))
    }

    pub fn element(tag: impl Into<String>) -> ElementSlot {
        ElementSlot::new(tag)
    }

    pub fn fragment(children: impl Into<ChildTree>) -> Self {
        Slot::Null(FragmentSlot {
            children: children.into().into_vec(),
        })
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Class(_) => SlotKind::Class,
            Slot::Function(_) => SlotKind::Function,
            Slot::Element(_) => SlotKind::Element,
            Slot::Null(_) => SlotKind::Null,
            Slot::Leaf(_) => SlotKind::Leaf,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Slot::Class(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Slot::Function(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Slot::Element(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Slot::Null(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Slot::Leaf(_))
    }

    /// Children as currently known
    ///
    /// Component slots return `None` until they have been expanded.
    pub fn children(&self) -> Option<&[Slot]> {
        match self {
            Slot::Class(c) | Slot::Function(c) => c.resolved_children(),
            Slot::Element(e) => Some(&e.children),
            Slot::Null(f) => Some(&f.children),
            Slot::Leaf(_) => None,
        }
    }
}

/// Class or function component awaiting expansion
#[derive(Clone)]
pub struct ComponentSlot {
    component: Arc<dyn Component>,
    name: &'static str,
    props: Props,
    children: OnceCell<Vec<Slot>>,
}

impl ComponentSlot {
    fn new(component: Arc<dyn Component>, name: &'static str, props: Props) -> Self {
        Self {
            component,
            name,
            props,
            children: OnceCell::new(),
        }
    }

    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// Type name of the component, for diagnostics
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn is_resolved(&self) -> bool {
        self.children.get().is_some()
    }

    pub fn resolved_children(&self) -> Option<&[Slot]> {
        self.children.get().map(Vec::as_slice)
    }

    /// Record rendered children
    ///
    /// First write wins; later writes are ignored and the stored children
    /// are returned.
    pub fn set_children(&self, children: Vec<Slot>) -> &[Slot] {
        self.children.get_or_init(|| children)
    }
}

impl fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("name", &self.name)
            .field("props", &self.props)
            .field("children", &self.children.get())
            .finish()
    }
}

/// Tagged element
#[derive(Debug, Clone, Default)]
pub struct ElementSlot {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<Slot>,
}

impl ElementSlot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn child(mut self, child: impl Into<Slot>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl Into<ChildTree>) -> Self {
        self.children.extend(children.into().into_vec());
        self
    }
}

/// Grouping node without markup
#[derive(Debug, Clone, Default)]
pub struct FragmentSlot {
    pub children: Vec<Slot>,
}

/// Normalized render result: always a sequence
#[derive(Debug, Clone, Default)]
pub struct ChildTree(Vec<Slot>);

impl ChildTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<Slot> {
        self.0
    }
}

impl From<Vec<Slot>> for ChildTree {
    fn from(slots: Vec<Slot>) -> Self {
        ChildTree(slots)
    }
}

impl From<Slot> for ChildTree {
    fn from(slot: Slot) -> Self {
        ChildTree(vec![slot])
    }
}

impl From<ElementSlot> for ChildTree {
    fn from(element: ElementSlot) -> Self {
        ChildTree(vec![element.into()])
    }
}

impl FromIterator<Slot> for ChildTree {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        ChildTree(iter.into_iter().collect())
    }
}

impl From<ElementSlot> for Slot {
    fn from(element: ElementSlot) -> Self {
        Slot::Element(element)
    }
}

impl From<FragmentSlot> for Slot {
    fn from(fragment: FragmentSlot) -> Self {
        Slot::Null(fragment)
    }
}

impl From<Leaf> for Slot {
    fn from(leaf: Leaf) -> Self {
        Slot::Leaf(leaf)
    }
}

impl From<Leaf> for ChildTree {
    fn from(leaf: Leaf) -> Self {
        ChildTree(vec![Slot::Leaf(leaf)])
    }
}

macro_rules! leaf_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Slot {
                fn from(value: $ty) -> Self {
                    Slot::Leaf(value.into())
                }
            }

            impl From<$ty> for ChildTree {
                fn from(value: $ty) -> Self {
                    ChildTree(vec![Slot::Leaf(value.into())])
                }
            }
        )*
    };
}

leaf_conversions!(&str, String, bool, i32, i64, u32, f64);
