use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::models::HighlightVariant;
use crate::render::{DisplayNode, DisplayTree, ListEntry, NodeKind};

/// Public page markup for a display tree, one top-level element per line.
///
/// Text and attribute values are escaped; rich-text payloads are emitted as stored.
pub fn to_html(tree: &DisplayTree) -> String {
    let mut out = String::new();
    if let Some(title) = &tree.title {
        let _ = writeln!(out, "<h1 class=\"title\">{}</h1>", text(title));
    }
    if let Some(cover) = &tree.cover_image {
        let _ = writeln!(out, "<img class=\"cover\" src=\"{}\" alt=\"\">", attr(cover));
    }
    for node in &tree.body {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &DisplayNode) {
    let id = attr(node.block_id.as_str());
    let _ = match &node.kind {
        NodeKind::Heading { level, text: body } => {
            let n = level.as_u8();
            writeln!(out, "<h{n} data-block=\"{id}\">{}</h{n}>", text(body))
        }
        NodeKind::Subtitle { text: body } => {
            writeln!(out, "<p class=\"subtitle\" data-block=\"{id}\">{}</p>", text(body))
        }
        NodeKind::RichText { markup } => {
            writeln!(out, "<div class=\"rich-text\" data-block=\"{id}\">{markup}</div>")
        }
        NodeKind::Text { text: body } => writeln!(out, "<p data-block=\"{id}\">{}</p>", text(body)),
        NodeKind::Image {
            src,
            caption,
            credit,
        } => {
            let alt = caption.as_deref().unwrap_or_default();
            let _ = write!(
                out,
                "<figure data-block=\"{id}\"><img src=\"{}\" alt=\"{}\">",
                attr(src),
                attr(alt)
            );
            if caption.is_some() || credit.is_some() {
                let _ = write!(out, "<figcaption>");
                if let Some(caption) = caption {
                    let _ = write!(out, "{}", text(caption));
                }
                if let Some(credit) = credit {
                    let _ = write!(out, "<span class=\"credit\">{}</span>", text(credit));
                }
                let _ = write!(out, "</figcaption>");
            }
            writeln!(out, "</figure>")
        }
        NodeKind::VideoEmbed { src } => writeln!(
            out,
            "<iframe data-block=\"{id}\" src=\"{}\" allowfullscreen></iframe>",
            attr(src)
        ),
        NodeKind::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let _ = write!(out, "<{tag} data-block=\"{id}\">");
            for item in items {
                write_list_entry(out, item);
            }
            writeln!(out, "</{tag}>")
        }
        NodeKind::ChartImage { src } => writeln!(
            out,
            "<figure class=\"chart\" data-block=\"{id}\"><img src=\"{}\" alt=\"\"></figure>",
            attr(src)
        ),
        NodeKind::Callout {
            variant,
            text: body,
        } => {
            let tag = match variant {
                HighlightVariant::Alert => "aside",
                HighlightVariant::Quote => "blockquote",
            };
            writeln!(
                out,
                "<{tag} class=\"{}\" data-block=\"{id}\">{}</{tag}>",
                variant.as_str(),
                text(body)
            )
        }
    };
}

fn write_list_entry(out: &mut String, item: &ListEntry) {
    let _ = match &item.href {
        Some(href) => write!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            attr(href),
            text(&item.text)
        ),
        None => write!(out, "<li>{}</li>", text(&item.text)),
    };
}
