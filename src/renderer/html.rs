//! HTML string renderer.

use crate::syntax::{Node, SyntaxKind, slugify};

use super::sanitize::escape_html;
use super::{NodeOverride, RenderOptions};

pub struct HtmlRenderer<'a> {
    options: &'a RenderOptions,
    overrides: &'a dyn NodeOverride,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(options: &'a RenderOptions, overrides: &'a dyn NodeOverride) -> Self {
        Self { options, overrides }
    }

    pub fn render(&self, node: &Node) -> String {
        if let Some(output) = self.overrides.render_node(node) {
            log::trace!("RENDER_NODE override for {:?}", node.kind);
            return output.into_html();
        }

        match node.kind {
            SyntaxKind::DOCUMENT => self.children(node),
            SyntaxKind::HEADING => {
                let level = node.level.unwrap_or(1);
                format!(
                    "<h{level} id=\"{}\">{}</h{level}>",
                    escape_html(&heading_id(node)),
                    self.inner(node)
                )
            }
            SyntaxKind::PARAGRAPH => format!("<p>{}</p>", self.inner(node)),
            SyntaxKind::BLOCKQUOTE => format!("<blockquote>{}</blockquote>", self.inner(node)),
            SyntaxKind::LIST => {
                let tag = if node.attr_flag("ordered") { "ol" } else { "ul" };
                let class = if node.attr_flag("toc") {
                    " class=\"toc\""
                } else {
                    ""
                };
                format!("<{tag}{class}>{}</{tag}>", self.children(node))
            }
            SyntaxKind::LIST_ITEM => {
                if node.attr_flag("task") {
                    let checked = if node.attr_flag("checked") {
                        " checked"
                    } else {
                        ""
                    };
                    format!(
                        "<li class=\"task-list-item\"><input type=\"checkbox\" disabled{checked}> {}</li>",
                        self.inner(node)
                    )
                } else {
                    format!("<li>{}</li>", self.inner(node))
                }
            }
            SyntaxKind::CODE_BLOCK => {
                let lang = node.attr_str("lang").unwrap_or("");
                let class = if lang.is_empty() {
                    String::new()
                } else {
                    format!(" class=\"language-{}\"", escape_html(lang))
                };
                format!(
                    "<pre><code{class}>{}</code></pre>",
                    escape_html(node.content_str())
                )
            }
            SyntaxKind::INLINE_CODE => {
                format!("<code>{}</code>", escape_html(node.content_str()))
            }
            SyntaxKind::EMPHASIS => format!("<em>{}</em>", self.inner(node)),
            SyntaxKind::STRONG => format!("<strong>{}</strong>", self.inner(node)),
            SyntaxKind::LINK => self.link(node),
            SyntaxKind::IMAGE => {
                let src = self.options.url(node.attr_str("src").unwrap_or(""));
                let alt = node.attr_str("alt").unwrap_or("");
                let title = node
                    .attr_str("title")
                    .map(|t| format!(" title=\"{}\"", escape_html(t)))
                    .unwrap_or_default();
                format!(
                    "<img src=\"{}\" alt=\"{}\"{title}>",
                    escape_html(&src),
                    escape_html(alt)
                )
            }
            SyntaxKind::TEXT => self.text(node.content_str()),
            SyntaxKind::HORIZONTAL_RULE => "<hr>".to_string(),
            SyntaxKind::TABLE => self.table(node),
            SyntaxKind::TABLE_ROW => format!("<tr>{}</tr>", self.children(node)),
            SyntaxKind::TABLE_CELL => {
                let tag = if node.attr_flag("header") { "th" } else { "td" };
                let style = match node.attr_str("align") {
                    Some(align @ ("center" | "right")) => {
                        format!(" style=\"text-align: {align}\"")
                    }
                    _ => String::new(),
                };
                format!("<{tag}{style}>{}</{tag}>", self.inner(node))
            }
            SyntaxKind::CUSTOM_BLOCK => match node.attr_str("type") {
                Some("footnotes") => format!(
                    "<section class=\"footnotes\"><ol>{}</ol></section>",
                    self.children(node)
                ),
                Some("footnote") => format!(
                    "<li id=\"fn-{}\">{}</li>",
                    escape_html(node.attr_str("id").unwrap_or("")),
                    self.inner(node)
                ),
                _ => format!("<div class=\"custom-block\">{}</div>", self.inner(node)),
            },
            SyntaxKind::CUSTOM_INLINE => match node.attr_str("type") {
                Some("footnote-ref") => {
                    let id = escape_html(node.attr_str("id").unwrap_or(""));
                    format!("<sup class=\"footnote-ref\"><a href=\"#fn-{id}\">{id}</a></sup>")
                }
                _ => format!("<span class=\"custom-inline\">{}</span>", self.inner(node)),
            },
        }
    }

    fn link(&self, node: &Node) -> String {
        let href = self.options.url(node.attr_str("href").unwrap_or(""));
        let mut attrs = format!("href=\"{}\"", escape_html(&href));
        if let Some(target) = self.options.target_for(&href) {
            attrs.push_str(&format!(" target=\"{}\"", escape_html(target)));
            if target == "_blank" {
                attrs.push_str(" rel=\"noopener noreferrer\"");
            }
        }
        format!("<a {attrs}>{}</a>", self.inner(node))
    }

    fn table(&self, node: &Node) -> String {
        let mut head = String::new();
        let mut body = String::new();
        for row in &node.children {
            let is_header = row.children.first().is_some_and(|c| c.attr_flag("header"));
            if is_header {
                head.push_str(&self.render(row));
            } else {
                body.push_str(&self.render(row));
            }
        }

        let mut out = String::from("<table>");
        if !head.is_empty() {
            out.push_str(&format!("<thead>{head}</thead>"));
        }
        if !body.is_empty() {
            out.push_str(&format!("<tbody>{body}</tbody>"));
        }
        out.push_str("</table>");
        out
    }

    /// Rendered children when there are any, else the node's own text.
    fn inner(&self, node: &Node) -> String {
        if node.children.is_empty() {
            self.text(node.content_str())
        } else {
            self.children(node)
        }
    }

    fn children(&self, node: &Node) -> String {
        node.children.iter().map(|c| self.render(c)).collect()
    }

    fn text(&self, text: &str) -> String {
        if self.options.sanitize {
            escape_html(text)
        } else {
            text.to_string()
        }
    }
}

/// `attrs.id` when a transform stamped one, else the slug of the heading text.
pub(crate) fn heading_id(node: &Node) -> String {
    match node.attr_str("id") {
        Some(id) => id.to_string(),
        None => slugify(&node.text_content()),
    }
}
