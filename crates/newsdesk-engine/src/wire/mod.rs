//! Persisted JSON shape of articles and block sequences.
//!
//! Blocks are stored as an order-preserving array of `{ id, type, ...fields }` objects.
//! Decoding comes in two modes:
//!
//! - [`DecodeMode::Strict`] rejects a block whose fields do not match its type tag. Used when
//!   loading an article for editing and by `Block`'s `Deserialize` impl.
//! - [`DecodeMode::Lenient`] substitutes the variant default for any field it cannot
//!   interpret and skips entries without an id or type. Used for public display.
//!
//! Unknown extra fields are ignored in both modes. Blocks with an unrecognised type tag are
//! kept as [`BlockContent::Unknown`] so the renderer can skip them.

mod fields;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{Article, Block, BlockContent, BlockId, BlockType, RichText};
use crate::validate::{self, ValidationError};

use fields::FieldReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Strict,
    Lenient,
}

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an array of blocks")]
    NotAnArray,
    #[error("block at position {index} is not an object")]
    NotAnObject { index: usize },
    #[error("block at position {index} has no `{field}` string")]
    MissingField { index: usize, field: &'static str },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Decode one persisted block object
pub fn decode_block(value: Value, mode: DecodeMode) -> Result<Block, WireError> {
    decode_entry(0, value, mode)
}

/// Decode a persisted block array from JSON text
pub fn decode_blocks(json: &str, mode: DecodeMode) -> Result<Vec<Block>, WireError> {
    let value: Value = serde_json::from_str(json)?;
    decode_blocks_value(value, mode)
}

/// Decode a persisted block array that has already been parsed
pub fn decode_blocks_value(value: Value, mode: DecodeMode) -> Result<Vec<Block>, WireError> {
    let Value::Array(entries) = value else {
        return Err(WireError::NotAnArray);
    };

    let mut blocks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_entry(index, entry, mode) {
            Ok(block) => blocks.push(block),
            Err(error @ (WireError::NotAnObject { .. } | WireError::MissingField { .. }))
                if mode == DecodeMode::Lenient =>
            {
                log::warn!("skipping stored block: {error}");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(blocks)
}

/// Validate and serialize a block sequence to its persisted form
pub fn encode_blocks(blocks: &[Block]) -> Result<String, WireError> {
    validate::validate_blocks(blocks)?;
    Ok(serde_json::to_string(blocks)?)
}

#[derive(Deserialize)]
struct ArticleRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    cover_image_url: Option<String>,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    content_blocks: Option<Value>,
}

/// Decode a stored article record.
///
/// `content_blocks` may be absent, `null`, an array, or an array encoded as a JSON string.
pub fn decode_article(json: &str, mode: DecodeMode) -> Result<Article, WireError> {
    let record: ArticleRecord = serde_json::from_str(json)?;

    let blocks = match record.content_blocks {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(encoded)) if encoded.trim().is_empty() => Vec::new(),
        Some(Value::String(encoded)) => decode_blocks(&encoded, mode)?,
        Some(value) => decode_blocks_value(value, mode)?,
    };

    Ok(Article {
        title: record.title,
        slug: record.slug,
        cover_image_url: record.cover_image_url,
        is_featured: record.is_featured,
        legacy_content: record.content.unwrap_or_default(),
        blocks,
    })
}

/// Validate and serialize an article record (pretty-printed)
pub fn encode_article(article: &Article) -> Result<String, WireError> {
    validate::validate_article(article)?;
    Ok(serde_json::to_string_pretty(article)?)
}

fn decode_entry(index: usize, entry: Value, mode: DecodeMode) -> Result<Block, WireError> {
    let Value::Object(mut object) = entry else {
        return Err(WireError::NotAnObject { index });
    };

    let id = match object.remove("id") {
        Some(Value::String(id)) => BlockId::from(id),
        // Older records stored numeric ids
        Some(Value::Number(n)) if mode == DecodeMode::Lenient => {
            log::warn!("block {index} has numeric id {n}, reading it as a string");
            BlockId::from(n.to_string())
        }
        _ => return Err(WireError::MissingField { index, field: "id" }),
    };
    let Some(Value::String(type_tag)) = object.remove("type") else {
        return Err(WireError::MissingField {
            index,
            field: "type",
        });
    };

    let content = match type_tag.parse::<BlockType>() {
        Ok(block_type) => decode_content(&id, block_type, &object, mode)?,
        Err(_) => BlockContent::Unknown {
            type_tag,
            fields: object,
        },
    };

    Ok(Block { id, content })
}

fn decode_content(
    id: &BlockId,
    block_type: BlockType,
    object: &Map<String, Value>,
    mode: DecodeMode,
) -> Result<BlockContent, ValidationError> {
    let mut r = FieldReader::new(object);

    let content = match block_type {
        BlockType::Heading => BlockContent::Heading {
            level: r.heading_level("level"),
            text: r.text("text"),
        },
        BlockType::Subtitle => BlockContent::Subtitle {
            text: r.text("text"),
        },
        BlockType::Paragraph => BlockContent::Paragraph {
            text: RichText::new(r.text("text")),
        },
        BlockType::Image => BlockContent::Image {
            url: r.text("url"),
            caption: r.optional_text("caption"),
            credit: r.optional_text("credit"),
        },
        BlockType::Video => BlockContent::Video {
            url: r.text("url"),
            embed_type: r.embed_source("embedType"),
        },
        BlockType::List => BlockContent::List {
            ordered: r.flag("ordered"),
            items: r.list_items("items"),
        },
        BlockType::Chart => BlockContent::Chart {
            image_url: r.optional_text("imageUrl"),
            data: r.optional_text("data"),
        },
        BlockType::Highlight => BlockContent::Highlight {
            text: r.text("text"),
            variant: r.highlight_variant("variant"),
        },
    };

    let problems = r.into_problems();
    if problems.is_empty() {
        return Ok(content);
    }

    match mode {
        DecodeMode::Strict => Err(ValidationError::InvalidVariant {
            id: id.clone(),
            block_type,
            reason: problems.join("; "),
        }),
        DecodeMode::Lenient => {
            for problem in &problems {
                log::warn!("block {id} ({block_type}): {problem}, using default");
            }
            Ok(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmbedSource, HeadingLevel, HighlightVariant, ListItem};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::new(
                "h",
                BlockContent::Heading {
                    level: HeadingLevel::H3,
                    text: "Contexto".to_string(),
                },
            ),
            Block::new(
                "s",
                BlockContent::Subtitle {
                    text: "O que se sabe".to_string(),
                },
            ),
            Block::new(
                "p",
                BlockContent::Paragraph {
                    text: RichText::new("<p>Texto <strong>forte</strong></p>"),
                },
            ),
            Block::new(
                "i",
                BlockContent::Image {
                    url: "https://cdn.test/a.png".to_string(),
                    caption: Some("Legenda".to_string()),
                    credit: None,
                },
            ),
            Block::new(
                "v",
                BlockContent::Video {
                    url: "https://youtube.com/watch?v=abc".to_string(),
                    embed_type: Some(EmbedSource::Vimeo),
                },
            ),
            Block::new(
                "l",
                BlockContent::List {
                    ordered: true,
                    items: vec![
                        ListItem::new("um"),
                        ListItem::new("dois").with_link("https://x.test"),
                    ],
                },
            ),
            Block::new(
                "c",
                BlockContent::Chart {
                    image_url: None,
                    data: Some("1,2,3".to_string()),
                },
            ),
            Block::new(
                "q",
                BlockContent::Highlight {
                    text: "Atenção".to_string(),
                    variant: HighlightVariant::Quote,
                },
            ),
        ]
    }

    #[test]
    fn test_blocks_roundtrip_through_persisted_shape() {
        let blocks = sample_blocks();

        let json = encode_blocks(&blocks).unwrap();
        let decoded = decode_blocks(&json, DecodeMode::Strict).unwrap();

        assert_eq!(decoded, blocks);
    }

    #[test]
    fn test_serde_deserialize_uses_strict_decoding() {
        let ok: Vec<Block> =
            serde_json::from_value(json!([{ "id": "a", "type": "subtitle", "text": "x" }]))
                .unwrap();
        assert_eq!(ok.len(), 1);

        let bad = serde_json::from_value::<Vec<Block>>(json!([{ "id": "a", "type": "heading" }]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let json = r#"[{ "id": "p1", "type": "paragraph", "text": "oi", "formatting": { "bold": true } }]"#;

        let blocks = decode_blocks(json, DecodeMode::Strict).unwrap();

        assert_eq!(
            blocks[0].content,
            BlockContent::Paragraph {
                text: RichText::new("oi")
            }
        );
    }

    #[test]
    fn test_missing_optional_fields_are_absent() {
        let json = r#"[{ "id": "v1", "type": "video", "url": "u" }, { "id": "c1", "type": "chart" }]"#;

        let blocks = decode_blocks(json, DecodeMode::Strict).unwrap();

        assert_eq!(
            blocks[0].content,
            BlockContent::Video {
                url: "u".to_string(),
                embed_type: None
            }
        );
        assert_eq!(
            blocks[1].content,
            BlockContent::Chart {
                image_url: None,
                data: None
            }
        );
    }

    #[test]
    fn test_heading_level_accepts_tag_or_integer() {
        let json = r#"[
            { "id": "a", "type": "heading", "level": "h2", "text": "x" },
            { "id": "b", "type": "heading", "level": 3, "text": "y" }
        ]"#;

        let blocks = decode_blocks(json, DecodeMode::Strict).unwrap();

        assert!(matches!(
            blocks[0].content,
            BlockContent::Heading {
                level: HeadingLevel::H2,
                ..
            }
        ));
        assert!(matches!(
            blocks[1].content,
            BlockContent::Heading {
                level: HeadingLevel::H3,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_rejects_out_of_range_heading_level() {
        let json = r#"[{ "id": "a", "type": "heading", "level": 4, "text": "x" }]"#;

        let err = decode_blocks(json, DecodeMode::Strict).unwrap_err();

        match err {
            WireError::Invalid(ValidationError::InvalidVariant { id, block_type, .. }) => {
                assert_eq!(id, BlockId::from("a"));
                assert_eq!(block_type, BlockType::Heading);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_heading_without_level() {
        let json = r#"[{ "id": "a", "type": "heading", "text": "x" }]"#;

        assert!(matches!(
            decode_blocks(json, DecodeMode::Strict),
            Err(WireError::Invalid(ValidationError::InvalidVariant { .. }))
        ));
    }

    #[test]
    fn test_lenient_substitutes_variant_defaults() {
        let json = r#"[
            { "id": "a", "type": "heading", "level": "h9", "text": 42 },
            { "id": "b", "type": "highlight", "text": "cuidado", "variant": "shout" },
            { "id": "c", "type": "list", "ordered": "yes" }
        ]"#;

        let blocks = decode_blocks(json, DecodeMode::Lenient).unwrap();

        assert_eq!(
            blocks[0].content,
            BlockContent::Heading {
                level: HeadingLevel::H1,
                text: String::new()
            }
        );
        assert_eq!(
            blocks[1].content,
            BlockContent::Highlight {
                text: "cuidado".to_string(),
                variant: HighlightVariant::Alert
            }
        );
        assert_eq!(
            blocks[2].content,
            BlockContent::List {
                ordered: false,
                items: vec![ListItem::default()]
            }
        );
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let json = r#"[{ "id": "x", "type": "carousel", "slides": [1, 2] }]"#;

        let blocks = decode_blocks(json, DecodeMode::Strict).unwrap();

        match &blocks[0].content {
            BlockContent::Unknown { type_tag, fields } => {
                assert_eq!(type_tag, "carousel");
                assert_eq!(fields.get("slides"), Some(&json!([1, 2])));
            }
            other => panic!("expected unknown content, got {other:?}"),
        }
    }

    #[test]
    fn test_entries_without_id_or_type() {
        let json = r#"[{ "type": "subtitle", "text": "x" }, 7, { "id": "ok", "type": "subtitle", "text": "y" }]"#;

        assert!(matches!(
            decode_blocks(json, DecodeMode::Strict),
            Err(WireError::MissingField {
                index: 0,
                field: "id"
            })
        ));

        let lenient = decode_blocks(json, DecodeMode::Lenient).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient[0].id, BlockId::from("ok"));
    }

    #[test]
    fn test_numeric_id_only_read_leniently() {
        let json = r#"[{ "id": 7, "type": "subtitle", "text": "x" }]"#;

        assert!(matches!(
            decode_blocks(json, DecodeMode::Strict),
            Err(WireError::MissingField { index: 0, field: "id" })
        ));
        let blocks = decode_blocks(json, DecodeMode::Lenient).unwrap();
        assert_eq!(blocks[0].id, BlockId::from("7"));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            decode_blocks(r#"{ "id": "a" }"#, DecodeMode::Lenient),
            Err(WireError::NotAnArray)
        ));
    }

    #[test]
    fn test_encode_rejects_duplicate_ids() {
        let mut blocks = sample_blocks();
        blocks[1].id = blocks[0].id.clone();

        assert!(matches!(
            encode_blocks(&blocks),
            Err(WireError::Invalid(ValidationError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_decode_article_with_string_encoded_blocks() {
        let json = json!({
            "title": "Chuvas no litoral",
            "slug": "chuvas-no-litoral",
            "content": "Linha antiga",
            "cover_image_url": null,
            "content_blocks": r#"[{ "id": "s", "type": "subtitle", "text": "x" }]"#,
            "author_id": "ignored"
        })
        .to_string();

        let article = decode_article(&json, DecodeMode::Strict).unwrap();

        assert_eq!(article.title, "Chuvas no litoral");
        assert_eq!(article.legacy_content, "Linha antiga");
        assert_eq!(article.cover_image_url, None);
        assert_eq!(article.blocks.len(), 1);
    }

    #[test]
    fn test_decode_article_with_null_blocks() {
        let json = r#"{ "title": "Antiga", "content": "a\nb", "content_blocks": null }"#;

        let article = decode_article(json, DecodeMode::Strict).unwrap();

        assert!(article.blocks.is_empty());
        assert_eq!(article.legacy_content, "a\nb");
    }

    #[test]
    fn test_article_roundtrip() {
        let article = Article::new("Chuvas no litoral")
            .with_cover_image("https://cdn.test/capa.png")
            .with_blocks(sample_blocks());

        let json = encode_article(&article).unwrap();
        let decoded = decode_article(&json, DecodeMode::Strict).unwrap();

        assert_eq!(decoded, article);
    }
}
