//! Built-in component library

use crate::definition::{ComponentCategory as Cat, ComponentDefinition, PropertyKind, PropertySchema};
use crate::render::RenderContext;
use serde_json::{json, Value};
use sitecraft_model::ComponentNode;

fn text(key: &str, label: &str) -> PropertySchema {
    PropertySchema::new(key, label, PropertyKind::Text)
}

fn textarea(key: &str, label: &str) -> PropertySchema {
    PropertySchema::new(key, label, PropertyKind::Textarea)
}

fn url(key: &str, label: &str) -> PropertySchema {
    PropertySchema::new(key, label, PropertyKind::Url)
}

fn number(key: &str, label: &str, min: Option<f64>, max: Option<f64>) -> PropertySchema {
    PropertySchema::new(key, label, PropertyKind::Number { min, max })
}

fn boolean(key: &str, label: &str) -> PropertySchema {
    PropertySchema::new(key, label, PropertyKind::Boolean)
}

fn select(key: &str, label: &str, options: &[&str]) -> PropertySchema {
    PropertySchema::new(
        key,
        label,
        PropertyKind::Select {
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    )
}

pub(crate) fn builtin_definitions() -> Vec<ComponentDefinition> {
    vec![
        // Basic
        ComponentDefinition::new("text", "Text", Cat::Basic, render_text)
            .prop(textarea("content", "Content"), "Add your text here"),
        ComponentDefinition::new("heading", "Heading", Cat::Basic, render_heading)
            .prop(text("text", "Text"), "Heading")
            .prop(number("level", "Level", Some(1.0), Some(6.0)), 2),
        ComponentDefinition::new("button", "Button", Cat::Basic, render_button)
            .prop(text("label", "Label"), "Click me")
            .prop(url("href", "Link"), "#")
            .prop(select("variant", "Variant", &["primary", "secondary", "outline"]), "primary")
            .style("padding", "12px 24px")
            .style("border-radius", "var(--radius-md)"),
        ComponentDefinition::new("link", "Link", Cat::Basic, render_link)
            .prop(text("text", "Text"), "Learn more")
            .prop(url("href", "Link"), "#")
            .prop(boolean("newTab", "Open in new tab"), false),
        // Layout
        ComponentDefinition::new("container", "Container", Cat::Layout, render_container)
            .style("padding", "var(--spacing-md)")
            .container(None),
        ComponentDefinition::new("columns", "Columns", Cat::Layout, render_columns)
            .prop(number("gap", "Gap (px)", Some(0.0), None), 16)
            .container(Some(4)),
        ComponentDefinition::new("column", "Column", Cat::Layout, render_container)
            .container(None)
            .only_inside(&["columns"]),
        ComponentDefinition::new("spacer", "Spacer", Cat::Layout, render_spacer)
            .prop(number("height", "Height (px)", Some(0.0), Some(400.0)), 32),
        ComponentDefinition::new("divider", "Divider", Cat::Layout, render_divider),
        // Media
        ComponentDefinition::new("image", "Image", Cat::Media, render_image)
            .prop(url("src", "Image URL"), "https://via.placeholder.com/600x400")
            .prop(text("alt", "Alt text"), "Image")
            .style("max-width", "100%"),
        ComponentDefinition::new("video", "Video", Cat::Media, render_video)
            .prop(url("src", "Video URL"), "")
            .prop(boolean("autoplay", "Autoplay"), false)
            .prop(boolean("controls", "Show controls"), true),
        // Marketing
        ComponentDefinition::new("hero", "Hero Section", Cat::Marketing, render_hero)
            .prop(text("title", "Title"), "Your headline here")
            .prop(textarea("subtitle", "Subtitle"), "A short supporting sentence")
            .prop(url("backgroundImage", "Background image"), "")
            .prop(select("align", "Alignment", &["left", "center", "right"]), "center")
            .style("padding", "var(--spacing-xl) var(--spacing-md)")
            .container(Some(3)),
        ComponentDefinition::new("testimonial", "Testimonial", Cat::Marketing, render_testimonial)
            .prop(textarea("quote", "Quote"), "This store changed my life.")
            .prop(text("author", "Author"), "Happy customer")
            .prop(number("rating", "Rating", Some(0.0), Some(5.0)), 5),
        // Commerce
        ComponentDefinition::new("product_card", "Product Card", Cat::Commerce, render_product_card)
            .prop(text("name", "Product name"), "Product")
            .prop(number("price", "Price", Some(0.0), None), 0.0)
            .prop(text("currency", "Currency"), "$")
            .prop(url("image", "Image URL"), "")
            .prop(text("buttonLabel", "Button label"), "Add to cart")
            .style("border-radius", "var(--radius-md)"),
        // Forms
        ComponentDefinition::new("form", "Form", Cat::Forms, render_form)
            .prop(text("formId", "Form"), "contact"),
    ]
}

fn prop<'a>(node: &'a ComponentNode, key: &str) -> &'a str {
    node.prop_str(key).unwrap_or_default()
}

fn number_prop(node: &ComponentNode, key: &str) -> Option<f64> {
    node.props.get(key).and_then(Value::as_f64)
}

fn render_text(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.text_element("p", node, &[], prop(node, "content"));
}

fn render_heading(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let level = number_prop(node, "level").unwrap_or(2.0).clamp(1.0, 6.0) as u8;
    ctx.text_element(&format!("h{}", level), node, &[], prop(node, "text"));
}

fn render_button(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let variant = node.prop_str("variant").unwrap_or("primary");
    ctx.text_element(
        "a",
        node,
        &[
            ("class", format!("btn btn-{}", variant)),
            ("href", prop(node, "href").to_string()),
        ],
        prop(node, "label"),
    );
}

fn render_link(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let mut attrs = vec![("href", prop(node, "href").to_string())];
    if node.props.get("newTab") == Some(&json!(true)) {
        attrs.push(("target", "_blank".to_string()));
        attrs.push(("rel", "noopener".to_string()));
    }
    ctx.text_element("a", node, &attrs, prop(node, "text"));
}

fn render_container(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.open("div", node, &[("class", node.component_type.clone())]);
    ctx.render_children(node);
    ctx.close("div");
}

fn render_columns(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let count = node.children.len().max(1);
    let gap = number_prop(node, "gap").unwrap_or(16.0);
    ctx.open(
        "div",
        node,
        &[
            ("class", "columns".to_string()),
            (
                "data-layout",
                format!("grid-template-columns: repeat({}, 1fr); gap: {}px", count, gap),
            ),
        ],
    );
    ctx.render_children(node);
    ctx.close("div");
}

fn render_spacer(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let height = number_prop(node, "height").unwrap_or(32.0);
    ctx.text_element(
        "div",
        node,
        &[("aria-hidden", "true".to_string()), ("data-height", format!("{}px", height))],
        "",
    );
}

fn render_divider(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.void_element("hr", node, &[]);
}

fn render_image(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.void_element(
        "img",
        node,
        &[
            ("src", prop(node, "src").to_string()),
            ("alt", prop(node, "alt").to_string()),
        ],
    );
}

fn render_video(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let mut attrs = vec![("src", prop(node, "src").to_string())];
    if node.props.get("controls") != Some(&json!(false)) {
        attrs.push(("controls", "controls".to_string()));
    }
    if node.props.get("autoplay") == Some(&json!(true)) {
        attrs.push(("autoplay", "autoplay".to_string()));
        attrs.push(("muted", "muted".to_string()));
    }
    ctx.text_element("video", node, &attrs, "");
}

fn render_hero(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let mut attrs = vec![(
        "class",
        format!("hero hero-{}", node.prop_str("align").unwrap_or("center")),
    )];
    let background = prop(node, "backgroundImage");
    if !background.is_empty() {
        attrs.push(("data-background", background.to_string()));
    }
    ctx.open("header", node, &attrs);
    ctx.plain_element("h1", &[], prop(node, "title"));
    let subtitle = prop(node, "subtitle");
    if !subtitle.is_empty() {
        ctx.plain_element("p", &[], subtitle);
    }
    ctx.render_children(node);
    ctx.close("header");
}

fn render_testimonial(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.open("blockquote", node, &[("class", "testimonial".to_string())]);
    ctx.plain_element("p", &[], prop(node, "quote"));
    let rating = number_prop(node, "rating").unwrap_or(0.0).clamp(0.0, 5.0) as usize;
    if rating > 0 {
        ctx.plain_element("span", &[("class", "rating".to_string())], &"★".repeat(rating));
    }
    ctx.plain_element("cite", &[], prop(node, "author"));
    ctx.close("blockquote");
}

fn render_product_card(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    ctx.open("article", node, &[("class", "product-card".to_string())]);
    let image = prop(node, "image");
    if !image.is_empty() {
        ctx.add_line(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            crate::render::escape(image),
            crate::render::escape(prop(node, "name"))
        ));
    }
    ctx.plain_element("h3", &[], prop(node, "name"));
    let price = number_prop(node, "price").unwrap_or(0.0);
    ctx.plain_element(
        "p",
        &[("class", "price".to_string())],
        &format!("{}{:.2}", node.prop_str("currency").unwrap_or("$"), price),
    );
    ctx.plain_element("button", &[("type", "button".to_string())], prop(node, "buttonLabel"));
    ctx.close("article");
}

fn render_form(node: &ComponentNode, ctx: &mut RenderContext<'_>) {
    let form_id = prop(node, "formId");
    let Some(form) = ctx.document().settings.form(form_id) else {
        ctx.add_line(&format!(
            "<!-- form not found: {} -->",
            form_id.replace("--", "- -")
        ));
        return;
    };

    ctx.open("form", node, &[("data-form", form.id.clone())]);
    for field in &form.fields {
        let input_type = match field.kind {
            sitecraft_model::FieldKind::Text => "text",
            sitecraft_model::FieldKind::Email => "email",
            sitecraft_model::FieldKind::Phone => "tel",
            sitecraft_model::FieldKind::Textarea => "textarea",
            sitecraft_model::FieldKind::Checkbox => "checkbox",
        };
        ctx.add_line("<label>");
        ctx.indent();
        ctx.add_line(&crate::render::escape(&field.label));
        let required = if field.required { " required" } else { "" };
        if input_type == "textarea" {
            ctx.add_line(&format!(
                "<textarea name=\"{}\"{}></textarea>",
                crate::render::escape(&field.name),
                required
            ));
        } else {
            ctx.add_line(&format!(
                "<input type=\"{}\" name=\"{}\"{}>",
                input_type,
                crate::render::escape(&field.name),
                required
            ));
        }
        ctx.dedent();
        ctx.add_line("</label>");
    }
    ctx.plain_element("button", &[("type", "submit".to_string())], &form.submit_label);
    ctx.close("form");
}
