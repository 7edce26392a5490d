use newsdesk_engine::editing::{Cmd, Draft};
use newsdesk_engine::models::{
    Article, Block, BlockContent, BlockType, EmbedSource, HeadingLevel, ListItem, RichText,
};
use newsdesk_engine::render::{NodeKind, html::to_html, render, video};
use newsdesk_engine::wire::{self, DecodeMode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_legacy_article_renders_one_paragraph_per_line() {
    let article = Article::new("Old").with_legacy_content("Line one\nLine two");

    let tree = render(&article);

    let texts: Vec<_> = tree
        .body
        .iter()
        .map(|node| match &node.kind {
            NodeKind::Text { text } => text.as_str(),
            other => panic!("unexpected node {other:?}"),
        })
        .collect();
    assert_eq!(texts, vec!["Line one", "Line two"]);
}

#[rstest]
#[case("https://x.test/watch?v=abc123", Some(EmbedSource::Youtube), Some("https://x.test/embed/abc123"))]
#[case("https://x.test/xyz", Some(EmbedSource::Youtube), Some("https://x.test/xyz"))]
#[case("https://x.test/watch?v=abc123", Some(EmbedSource::Vimeo), None)]
#[case("", Some(EmbedSource::Youtube), None)]
fn test_video_blocks(
    #[case] url: &str,
    #[case] embed_type: Option<EmbedSource>,
    #[case] expected: Option<&str>,
) {
    let article = Article::new("Video").with_blocks(vec![Block::new(
        "v",
        BlockContent::Video {
            url: url.to_string(),
            embed_type,
        },
    )]);

    let body = render(&article).body;

    let src = body.first().map(|node| match &node.kind {
        NodeKind::VideoEmbed { src } => src.as_str(),
        other => panic!("unexpected node {other:?}"),
    });
    assert_eq!(src, expected);
}

/// Author builds an article, it is stored, loaded back for display and rendered to HTML
#[test]
fn test_draft_to_published_page() {
    let mut draft = Draft::new("Eleições 2026");
    let heading = draft.add_heading(HeadingLevel::H2).changed;
    let paragraph = draft.add_block(BlockType::Paragraph).changed;
    let list = draft.add_block(BlockType::List).changed;

    draft
        .apply(Cmd::Update {
            id: heading.clone(),
            block: Block::new(
                heading.clone(),
                BlockContent::Heading {
                    level: HeadingLevel::H2,
                    text: "Resultado".to_string(),
                },
            ),
        })
        .unwrap();
    draft
        .apply(Cmd::Update {
            id: paragraph.clone(),
            block: Block::new(
                paragraph.clone(),
                BlockContent::Paragraph {
                    text: RichText::new("<p>Apuração <em>encerrada</em></p>"),
                },
            ),
        })
        .unwrap();
    draft
        .apply(Cmd::UpdateListItem {
            id: list.clone(),
            index: 0,
            item: ListItem::new("Fonte").with_link("https://tse.test"),
        })
        .unwrap();
    draft
        .apply(Cmd::Move {
            id: list.clone(),
            before: paragraph.clone(),
        })
        .unwrap();

    let article = draft.finish().unwrap();
    let stored = wire::encode_article(&article).unwrap();
    let loaded = wire::decode_article(&stored, DecodeMode::Lenient).unwrap();

    assert_eq!(loaded.slug, "eleicoes-2026");
    assert_eq!(render(&loaded), draft.preview());

    let html = to_html(&render(&loaded));
    let lines: Vec<_> = html.lines().collect();
    assert_eq!(lines[0], "<h1 class=\"title\">Eleições 2026</h1>");
    assert_eq!(lines[1], format!("<h2 data-block=\"{heading}\">Resultado</h2>"));
    assert_eq!(
        lines[2],
        format!("<ul data-block=\"{list}\"><li><a href=\"https://tse.test\">Fonte</a></li></ul>")
    );
    assert_eq!(
        lines[3],
        format!("<div class=\"rich-text\" data-block=\"{paragraph}\"><p>Apuração <em>encerrada</em></p></div>")
    );
}

#[test]
fn test_blocks_win_over_legacy_text() {
    let article = Article::new("Both")
        .with_legacy_content("should not appear")
        .with_blocks(vec![Block::new(
            "s",
            BlockContent::Subtitle {
                text: "shown".to_string(),
            },
        )]);

    let tree = render(&article);

    assert_eq!(tree.body.len(), 1);
    assert_eq!(
        tree.body[0].kind,
        NodeKind::Subtitle {
            text: "shown".to_string()
        }
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_config::cases()))]
    #[test]
    fn test_legacy_lines_map_to_paragraphs(lines in prop::collection::vec("[a-zA-Z0-9 ]{0,20}", 0..10)) {
        let article = Article::new("Legacy").with_legacy_content(lines.join("\n"));

        let body = render(&article).body;

        let expected: Vec<&String> = lines.iter().filter(|l| !l.trim().is_empty()).collect();
        prop_assert_eq!(body.len(), expected.len());
        for (node, line) in body.iter().zip(expected) {
            prop_assert_eq!(&node.kind, &NodeKind::Text { text: line.clone() });
        }
    }

    #[test]
    fn test_embed_rewrite_matches_first_occurrence(prefix in "[a-z:/.]{0,20}", rest in "[a-zA-Z0-9?=&]{0,20}") {
        let url = format!("{prefix}watch?v={rest}");

        let embedded = video::embed_url(&url);

        prop_assert_eq!(embedded, format!("{prefix}embed/{rest}"));
    }

    #[test]
    fn test_render_is_pure(texts in prop::collection::vec(".{0,30}", 0..8)) {
        let blocks = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Block::new(format!("h{i}"), BlockContent::Heading { level: HeadingLevel::H1, text }))
            .collect();
        let article = Article::new("Pure").with_blocks(blocks);

        prop_assert_eq!(render(&article), render(&article));
    }
}
