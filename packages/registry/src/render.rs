//! # HTML Preview Rendering
//!
//! Every registered component type carries a [`RenderFn`]. A render fn
//! writes markup for one node into a [`RenderContext`]; container types call
//! [`RenderContext::render_children`] to recurse.
//!
//! Rendering never fails. A node whose type is not registered (possible
//! with hand-edited or older stored documents) becomes an HTML comment.

use crate::ComponentRegistry;
use sitecraft_model::{ComponentNode, Document, PageId, Section};

/// Renderer for one component type
pub type RenderFn = fn(&ComponentNode, &mut RenderContext<'_>);

/// Options for preview rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit `data-component-id` attributes (used by the editor overlay)
    pub annotate: bool,
    /// Render sections whose `visible` flag is off
    pub include_hidden: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            annotate: true,
            include_hidden: false,
        }
    }
}

pub struct RenderContext<'a> {
    registry: &'a ComponentRegistry,
    document: &'a Document,
    options: RenderOptions,
    depth: usize,
    buffer: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        document: &'a Document,
        options: RenderOptions,
    ) -> Self {
        Self {
            registry,
            document,
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    /// The document being rendered (forms look up their definitions here)
    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Opening tag for `node`, carrying its styles and annotation
    pub fn start_tag(&self, tag: &str, node: &ComponentNode, attrs: &[(&str, String)]) -> String {
        let mut out = format!("<{}", tag);
        if self.options.annotate {
            out.push_str(&format!(
                " data-component-id=\"{}\" data-component-type=\"{}\"",
                escape(&node.id),
                escape(&node.component_type)
            ));
        }
        for (name, value) in attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !node.styles.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape(&inline_style(node))));
        }
        out.push('>');
        out
    }

    /// `<tag ...>` then indent
    pub fn open(&mut self, tag: &str, node: &ComponentNode, attrs: &[(&str, String)]) {
        let line = self.start_tag(tag, node, attrs);
        self.add_line(&line);
        self.indent();
    }

    /// dedent then `</tag>`
    pub fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// `<tag ...>text</tag>` on one line
    pub fn text_element(
        &mut self,
        tag: &str,
        node: &ComponentNode,
        attrs: &[(&str, String)],
        text: &str,
    ) {
        let line = format!("{}{}</{}>", self.start_tag(tag, node, attrs), escape(text), tag);
        self.add_line(&line);
    }

    /// Unannotated child element, e.g. the `<h1>` inside a hero
    pub fn plain_element(&mut self, tag: &str, attrs: &[(&str, String)], text: &str) {
        let mut line = format!("<{}", tag);
        for (name, value) in attrs {
            line.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        line.push('>');
        line.push_str(&escape(text));
        line.push_str(&format!("</{}>", tag));
        self.add_line(&line);
    }

    /// Void element like `<img>` or `<hr>`
    pub fn void_element(&mut self, tag: &str, node: &ComponentNode, attrs: &[(&str, String)]) {
        let line = self.start_tag(tag, node, attrs);
        self.add_line(&line);
    }

    pub fn render_node(&mut self, node: &ComponentNode) {
        let registry = self.registry;
        match registry.get(&node.component_type) {
            Some(def) => (def.render)(node, self),
            None => {
                tracing::warn!(
                    "No renderer for component type {} (node {})",
                    node.component_type,
                    node.id
                );
                self.add_line(&format!(
                    "<!-- unknown component: {} -->",
                    escape_comment(&node.component_type)
                ));
            }
        }
    }

    pub fn render_children(&mut self, node: &ComponentNode) {
        for child in &node.children {
            self.render_node(child);
        }
    }

    pub fn render_section(&mut self, section: &Section) {
        let mut attrs = vec![("class", format!("section section-{}", section.category))];
        if self.options.annotate {
            attrs.push(("data-section-id", section.id.clone()));
        }

        let mut line = String::from("<section");
        for (name, value) in &attrs {
            line.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !section.styles.is_empty() {
            let style = section
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            line.push_str(&format!(" style=\"{}\"", escape(&style)));
        }
        line.push('>');

        self.add_line(&line);
        self.indent();
        for component in &section.components {
            self.render_node(component);
        }
        self.close("section");
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

/// Render one page of `document` as a standalone HTML preview
pub fn render_page(
    document: &Document,
    page: PageId,
    registry: &ComponentRegistry,
    options: RenderOptions,
) -> String {
    let include_hidden = options.include_hidden;
    let mut ctx = RenderContext::new(registry, document, options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = if document.settings.seo.title.is_empty() {
        page.as_str().to_string()
    } else {
        document.settings.seo.title.clone()
    };
    ctx.add_line(&format!("<title>{}</title>", escape(&title)));
    if !document.settings.seo.description.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape(&document.settings.seo.description)
        ));
    }
    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line(":root {");
    ctx.indent();
    for (name, value) in document.theme.css_variables() {
        ctx.add_line(&format!("{}: {};", css_ident(&name), css_value(&value)));
    }
    ctx.dedent();
    ctx.add_line("}");
    ctx.add_line("body { font-family: var(--font-primary); color: var(--color-text); background: var(--color-background); }");
    ctx.dedent();
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();

    if !document.settings.navigation.is_empty() {
        ctx.add_line("<nav>");
        ctx.indent();
        for item in &document.settings.navigation {
            ctx.plain_element("a", &[("href", item.target.clone())], &item.label);
        }
        ctx.dedent();
        ctx.add_line("</nav>");
    }

    if let Some(page) = document.page(page) {
        for section in page.ordered_sections() {
            if section.visible || include_hidden {
                ctx.render_section(section);
            }
        }
    }

    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");

    ctx.into_output()
}

/// Render a single node (and its subtree) without page chrome
pub fn render_fragment(
    node: &ComponentNode,
    document: &Document,
    registry: &ComponentRegistry,
    options: RenderOptions,
) -> String {
    let mut ctx = RenderContext::new(registry, document, options);
    ctx.render_node(node);
    ctx.into_output()
}

/// Renderer that emits nothing, for types with no visual output
pub fn render_nothing(_node: &ComponentNode, _ctx: &mut RenderContext<'_>) {}

fn inline_style(node: &ComponentNode) -> String {
    node.styles
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Custom property name reduced to `[A-Za-z0-9_-]`
fn css_ident(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Theme value safe inside a `<style>` block: characters that could end the
/// declaration, the rule or the element are dropped
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\\'))
        .collect()
}

fn escape_comment(text: &str) -> String {
    text.replace("--", "- -")
}
