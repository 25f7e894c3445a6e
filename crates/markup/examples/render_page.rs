//! Render a small page with components in both formats

use markup::{ChildTree, ClassComponent, ComponentError, Format, Props, Serializer, Slot};

struct Card {
    title: String,
    body: String,
}

impl ClassComponent for Card {
    fn new(props: Props) -> Self {
        let field = |key: &str| {
            props
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            title: field("title"),
            body: field("body"),
        }
    }

    fn render(&self) -> Result<ChildTree, ComponentError> {
        Ok(Slot::element("article")
            .attr("class", "card")
            .child(Slot::element("h2").child(self.title.clone()))
            .child(Slot::element("p").child(self.body.clone()))
            .child(Slot::element("hr"))
            .into())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut props = Props::new();
    props.insert("title".to_string(), "Fish & Chips".into());
    props.insert("body".to_string(), "Served <hot>".into());

    let footer = Slot::function(
        |_: &Props| Ok(vec![Slot::from("Page "), Slot::from(1)].into()),
        Props::new(),
    );

    let page: Slot = Slot::element("body")
        .child(Slot::class::<Card>(props))
        .child(Slot::element("footer").child(footer))
        .into();

    let serializer = Serializer::new();
    println!("html: {}", serializer.serialize(&page, Format::Html)?);
    println!("xml:  {}", serializer.serialize(&page, Format::Xml)?);

    Ok(())
}
