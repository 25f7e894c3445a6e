//! Slot Serializer - Convert a slot tree to XML or HTML
//!
//! This module handles:
//! - Dispatching on slot kind
//! - Expanding components once and caching their children on the slot
//! - Format-dependent self-closing rules for elements
//! - Escaping text and attribute values

use crate::component::Component;
use crate::error::{Result, SerializeError};
use crate::slot::{ComponentSlot, ElementSlot, Slot, SlotKind};
use crate::types::{Format, HTML_VOID_ELEMENTS};
use crate::utils::escape;
use ahash::AHashSet;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Format used by `serialize_default`
    pub default_format: Format,
    /// Tags that self-close in html
    pub void_elements: AHashSet<String>,
    /// Reject leaf roots with `InvalidInput`
    pub strict_root: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            default_format: Format::Html,
            void_elements: HTML_VOID_ELEMENTS.iter().map(|s| s.to_string()).collect(),
            strict_root: false,
        }
    }
}

/// Slot tree serializer
///
/// Stateless apart from its config; the only write during a call is the
/// children memo on component slots.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a tree to a markup string
    pub fn serialize(&self, root: &Slot, format: Format) -> Result<String> {
        if self.config.strict_root && root.is_leaf() {
            tracing::warn!("Rejected leaf root in strict mode");
            return Err(SerializeError::InvalidInput(format!(
                "root must be a node, got {}",
                root.kind()
            )));
        }

        tracing::debug!(%format, kind = %root.kind(), "Serializing slot tree");

        let mut output = String::with_capacity(256);
        self.serialize_slot(root, format, &mut output)?;

        tracing::debug!(%format, len = output.len(), "Serialized slot tree");
        Ok(output)
    }

    /// Serialize with a format given as text
    ///
    /// The format is validated before the tree is touched.
    pub fn serialize_str(&self, root: &Slot, format: &str) -> Result<String> {
        let format: Format = format.parse()?;
        self.serialize(root, format)
    }

    /// Serialize with the configured default format
    pub fn serialize_default(&self, root: &Slot) -> Result<String> {
        self.serialize(root, self.config.default_format)
    }

    fn serialize_slot(&self, slot: &Slot, format: Format, output: &mut String) -> Result<()> {
        match slot {
            Slot::Leaf(leaf) => {
                if !leaf.is_blank() {
                    output.push_str(&escape(&leaf.as_text()));
                }
            }
            Slot::Class(component) => {
                let children = self.expand(component, SlotKind::Class)?;
                self.serialize_children(children, format, output)?;
            }
            Slot::Function(component) => {
                let children = self.expand(component, SlotKind::Function)?;
                self.serialize_children(children, format, output)?;
            }
            Slot::Element(element) => self.render_element(element, format, output)?,
            Slot::Null(fragment) => self.serialize_children(&fragment.children, format, output)?,
        }

        Ok(())
    }

    /// Render a component once and memoize its children on the slot
    fn expand<'a>(&self, component: &'a ComponentSlot, kind: SlotKind) -> Result<&'a [Slot]> {
        if let Some(children) = component.resolved_children() {
            tracing::trace!(component = component.name(), "Reusing expanded children");
            return Ok(children);
        }

        tracing::trace!(component = component.name(), %kind, "Expanding component");

        let tree = component
            .component()
            .render(component.props())
            .map_err(SerializeError::Component)?;

        Ok(component.set_children(tree.into_vec()))
    }

    fn render_element(
        &self,
        element: &ElementSlot,
        format: Format,
        output: &mut String,
    ) -> Result<()> {
        let self_close = match format {
            Format::Html => self.config.void_elements.contains(element.tag.as_str()),
            Format::Xml => element.children.is_empty(),
        };

        output.push('<');
        output.push_str(&element.tag);

        for (key, value) in element.attributes.iter() {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape(value));
            output.push('"');
        }

        if self_close {
            // Children of html void elements are dropped
            output.push_str(match format {
                Format::Html => "/>",
                Format::Xml => " />",
            });
            return Ok(());
        }

        output.push('>');
        self.serialize_children(&element.children, format, output)?;
        output.push_str("</");
        output.push_str(&element.tag);
        output.push('>');

        Ok(())
    }

    fn serialize_children(
        &self,
        children: &[Slot],
        format: Format,
        output: &mut String,
    ) -> Result<()> {
        for child in children {
            self.serialize_slot(child, format, output)?;
        }
        Ok(())
    }
}

/// Serialize with the default configuration
pub fn serialize(root: &Slot, format: Format) -> Result<String> {
    Serializer::new().serialize(root, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ClassComponent;
    use crate::error::ComponentError;
    use crate::slot::ChildTree;
    use crate::types::{Leaf, Props};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn html(slot: &Slot) -> String {
        serialize(slot, Format::Html).unwrap()
    }

    fn xml(slot: &Slot) -> String {
        serialize(slot, Format::Xml).unwrap()
    }

    fn counted(counter: &Arc<AtomicUsize>, body: &'static str) -> Slot {
        let counter = counter.clone();
        Slot::function(
            move |_: &Props| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Slot::element("p").child(body).into())
            },
            Props::new(),
        )
    }

    #[test]
    fn test_blank_leaves_render_empty() {
        for leaf in [Leaf::Null, Leaf::Undefined, Leaf::Bool(false)] {
            let slot = Slot::Leaf(leaf);
            assert_eq!(html(&slot), "");
            assert_eq!(xml(&slot), "");
        }
    }

    #[test]
    fn test_primitive_leaves() {
        assert_eq!(html(&Slot::from(5)), "5");
        assert_eq!(html(&Slot::from(true)), "true");
        assert_eq!(html(&Slot::from(2.5)), "2.5");
        assert_eq!(html(&Slot::from("<b>")), "&lt;b&gt;");
        assert_eq!(xml(&Slot::from("&<")), "&amp;&lt;");
        assert_eq!(html(&Slot::from("&<")), "&amp;&lt;");
    }

    #[test]
    fn test_element_with_attributes() {
        let slot: Slot = Slot::element("div")
            .attr("id", "a")
            .attr("class", "x&y")
            .child("text")
            .into();

        assert_eq!(html(&slot), r#"<div id="a" class="x&amp;y">text</div>"#);
        assert_eq!(xml(&slot), r#"<div id="a" class="x&amp;y">text</div>"#);
    }

    #[test]
    fn test_empty_non_void_element_in_html() {
        let slot: Slot = Slot::element("div").into();
        assert_eq!(html(&slot), "<div></div>");
        assert_eq!(xml(&slot), "<div />");
    }

    #[test]
    fn test_html_void_rule_is_tag_driven() {
        let empty: Slot = Slot::element("br").into();
        assert_eq!(html(&empty), "<br/>");

        let with_child: Slot = Slot::element("br").child("ignored").into();
        assert_eq!(html(&with_child), "<br/>");

        let img: Slot = Slot::element("img").attr("src", "a.png").attr("alt", "\"quoted\"").into();
        assert_eq!(html(&img), r#"<img src="a.png" alt="&quot;quoted&quot;"/>"#);
    }

    #[test]
    fn test_xml_void_rule_is_child_driven() {
        let empty: Slot = Slot::element("br").into();
        assert_eq!(xml(&empty), "<br />");

        let with_child: Slot = Slot::element("br").child("x").into();
        assert_eq!(xml(&with_child), "<br>x</br>");

        // A blank leaf still counts as a child
        let with_blank: Slot = Slot::element("item").child(Leaf::Null).into();
        assert_eq!(xml(&with_blank), "<item></item>");

        let empty_with_attr: Slot = Slot::element("node").attr("k", "v").into();
        assert_eq!(xml(&empty_with_attr), r#"<node k="v" />"#);
    }

    #[test]
    fn test_fragment_concatenates_children() {
        let a: Slot = Slot::element("a").child("1").into();
        let b: Slot = Slot::from("two");
        let expected = format!("{}{}", html(&a), html(&b));

        let fragment = Slot::fragment(vec![a, b]);
        assert_eq!(html(&fragment), expected);
        assert_eq!(html(&fragment), "<a>1</a>two");
    }

    #[test]
    fn test_function_component_expands() {
        let mut props = Props::new();
        props.insert("who".to_string(), "<you>".into());

        let slot = Slot::function(
            |props: &Props| {
                let who = props.get("who").and_then(|v| v.as_str()).unwrap_or_default();
                Ok(vec![Slot::from("hi "), Slot::from(who.to_string())].into())
            },
            props,
        );

        assert_eq!(html(&slot), "hi &lt;you&gt;");
        assert!(slot.is_function());
        assert_eq!(slot.children().map(<[Slot]>::len), Some(2));
    }

    #[test]
    fn test_class_component_expands() {
        static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

        struct Counter {
            start: i64,
        }

        impl ClassComponent for Counter {
            fn new(props: Props) -> Self {
                CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
                Self {
                    start: props.get("start").and_then(|v| v.as_i64()).unwrap_or(0),
                }
            }

            fn render(&self) -> std::result::Result<ChildTree, ComponentError> {
                Ok(Slot::element("span").child(self.start).into())
            }
        }

        let mut props = Props::new();
        props.insert("start".to_string(), 7.into());
        let slot = Slot::class::<Counter>(props);

        assert_eq!(html(&slot), "<span>7</span>");
        assert_eq!(xml(&slot), "<span>7</span>");
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_component_invoked_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let slot = counted(&counter, "body");

        let serializer = Serializer::new();
        assert_eq!(serializer.serialize(&slot, Format::Html).unwrap(), "<p>body</p>");
        assert_eq!(serializer.serialize(&slot, Format::Xml).unwrap(), "<p>body</p>");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_component_memoizes_per_slot() {
        let counter = Arc::new(AtomicUsize::new(0));
        let render_counter = counter.clone();
        let render = move |props: &Props| -> std::result::Result<ChildTree, ComponentError> {
            render_counter.fetch_add(1, Ordering::SeqCst);
            let label = props.get("label").and_then(|v| v.as_str()).unwrap_or_default();
            Ok(Slot::element("em").child(label.to_string()).into())
        };
        let shared: Arc<dyn Component> = Arc::new(render);

        let mut first_props = Props::new();
        first_props.insert("label".to_string(), "one".into());
        let mut second_props = Props::new();
        second_props.insert("label".to_string(), "two".into());

        let first = Slot::component(shared.clone(), first_props);
        let second = Slot::component(shared, second_props);
        assert!(first.is_function());

        assert_eq!(html(&first), "<em>one</em>");
        assert_eq!(html(&second), "<em>two</em>");
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        assert_eq!(html(&first), "<em>one</em>");
        assert_eq!(html(&second), "<em>two</em>");
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_nested_components() {
        let counter = Arc::new(AtomicUsize::new(0));
        let inner_counter = counter.clone();

        let outer = Slot::function(
            move |_: &Props| {
                let inner = counted(&inner_counter, "inner");
                Ok(Slot::element("section").child(inner).into())
            },
            Props::new(),
        );

        assert_eq!(html(&outer), "<section><p>inner</p></section>");
        assert_eq!(html(&outer), "<section><p>inner</p></section>");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_component_failure_propagates() {
        let slot: Slot = Slot::element("div")
            .child("before")
            .child(Slot::function(|_: &Props| Err("render failed".into()), Props::new()))
            .into();

        let err = serialize(&slot, Format::Html).unwrap_err();
        assert!(err.is_component());
        assert_eq!(err.to_string(), "render failed");
    }

    #[test]
    fn test_invalid_format_skips_traversal() {
        let counter = Arc::new(AtomicUsize::new(0));
        let slot = counted(&counter, "never");

        let err = Serializer::new().serialize_str(&slot, "json").unwrap_err();
        assert!(matches!(err, SerializeError::InvalidFormat(ref f) if f == "json"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        let ok = Serializer::new().serialize_str(&slot, "xml").unwrap();
        assert_eq!(ok, "<p>never</p>");
    }

    #[test]
    fn test_default_format_from_config() {
        let slot: Slot = Slot::element("br").into();

        assert_eq!(Serializer::new().serialize_default(&slot).unwrap(), "<br/>");

        let config = SerializerConfig {
            default_format: Format::Xml,
            ..Default::default()
        };
        assert_eq!(Serializer::with_config(config).serialize_default(&slot).unwrap(), "<br />");
    }

    #[test]
    fn test_custom_void_elements() {
        let mut config = SerializerConfig::default();
        config.void_elements.insert("spacer".to_string());
        config.void_elements.remove("br");
        let serializer = Serializer::with_config(config);

        let spacer: Slot = Slot::element("spacer").into();
        let br: Slot = Slot::element("br").into();
        assert_eq!(serializer.serialize(&spacer, Format::Html).unwrap(), "<spacer/>");
        assert_eq!(serializer.serialize(&br, Format::Html).unwrap(), "<br></br>");
    }

    #[test]
    fn test_strict_root_rejects_leaf() {
        let serializer = Serializer::with_config(SerializerConfig {
            strict_root: true,
            ..Default::default()
        });

        let err = serializer.serialize(&Slot::from("text"), Format::Html).unwrap_err();
        assert!(matches!(err, SerializeError::InvalidInput(_)));

        // Leaves below the root are still fine
        let slot: Slot = Slot::element("b").child("text").into();
        assert_eq!(serializer.serialize(&slot, Format::Html).unwrap(), "<b>text</b>");
    }

    #[test]
    fn test_independent_trees_on_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i: i64| {
                let tree: Slot = Slot::element("li").child(i).into();
                std::thread::spawn(move || serialize(&tree, Format::Html).unwrap())
            })
            .collect();

        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec!["<li>0</li>", "<li>1</li>", "<li>2</li>", "<li>3</li>"]);
    }
}
