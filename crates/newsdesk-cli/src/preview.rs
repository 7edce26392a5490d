use newsdesk_engine::models::HighlightVariant;
use newsdesk_engine::render::{DisplayTree, NodeKind};

/// Plain-text lines for drawing a display tree in the terminal
pub fn preview_lines(tree: &DisplayTree) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(title) = &tree.title {
        lines.push(title.to_uppercase());
        lines.push("=".repeat(title.chars().count()));
    }
    if let Some(cover) = &tree.cover_image {
        lines.push(format!("[cover: {cover}]"));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }

    for node in &tree.body {
        match &node.kind {
            NodeKind::Heading { level, text } => {
                lines.push(format!("{} {text}", "#".repeat(level.as_u8() as usize)));
            }
            NodeKind::Subtitle { text } => lines.push(format!("  {text}")),
            // Markup is shown as stored; the terminal has no rich-text renderer
            NodeKind::RichText { markup } => lines.extend(markup.lines().map(str::to_string)),
            NodeKind::Text { text } => lines.push(text.clone()),
            NodeKind::Image {
                src,
                caption,
                credit,
            } => {
                let src = if src.is_empty() { "(no image yet)" } else { src };
                lines.push(format!("[image: {src}]"));
                if let Some(caption) = caption {
                    lines.push(format!("  {caption}"));
                }
                if let Some(credit) = credit {
                    lines.push(format!("  Photo: {credit}"));
                }
            }
            NodeKind::VideoEmbed { src } => lines.push(format!("[video: {src}]")),
            NodeKind::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", i + 1)
                    } else {
                        "•".to_string()
                    };
                    match &item.href {
                        Some(href) => lines.push(format!("{marker} {} <{href}>", item.text)),
                        None => lines.push(format!("{marker} {}", item.text)),
                    }
                }
            }
            NodeKind::ChartImage { src } => lines.push(format!("[chart: {src}]")),
            NodeKind::Callout { variant, text } => match variant {
                HighlightVariant::Alert => lines.push(format!("! {text}")),
                HighlightVariant::Quote => lines.push(format!("> {text}")),
            },
        }
        lines.push(String::new());
    }

    lines
}
