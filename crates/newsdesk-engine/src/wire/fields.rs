use serde_json::{Map, Value};

use crate::models::{EmbedSource, HeadingLevel, HighlightVariant, ListItem};

/// Reads variant fields out of a stored block object.
///
/// Every accessor returns a usable value; anything it could not interpret is replaced by
/// the variant default and recorded as a problem for the caller to reject or log.
pub(super) struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    problems: Vec<String>,
}

impl<'a> FieldReader<'a> {
    pub(super) fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            problems: Vec::new(),
        }
    }

    pub(super) fn into_problems(self) -> Vec<String> {
        self.problems
    }

    fn field(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key)
    }

    fn problem(&mut self, message: String) {
        self.problems.push(message);
    }

    /// Required string field
    pub(super) fn text(&mut self, key: &str) -> String {
        match self.field(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.problem(format!("`{key}` must be a string, found {}", kind(other)));
                String::new()
            }
            None => {
                self.problem(format!("missing `{key}`"));
                String::new()
            }
        }
    }

    /// Optional string field; `null` counts as absent
    pub(super) fn optional_text(&mut self, key: &str) -> Option<String> {
        match self.field(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.problem(format!("`{key}` must be a string, found {}", kind(other)));
                None
            }
        }
    }

    /// Required boolean field
    pub(super) fn flag(&mut self, key: &str) -> bool {
        match self.field(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.problem(format!("`{key}` must be a boolean, found {}", kind(other)));
                false
            }
            None => {
                self.problem(format!("missing `{key}`"));
                false
            }
        }
    }

    /// Heading level, stored as `"h1"`..`"h3"` or as the integers 1..=3
    pub(super) fn heading_level(&mut self, key: &str) -> HeadingLevel {
        let parsed = match self.field(key) {
            Some(Value::String(tag)) => HeadingLevel::from_tag(tag),
            Some(Value::Number(n)) => n.as_u64().and_then(|n| HeadingLevel::try_from(n).ok()),
            Some(_) => None,
            None => {
                self.problem(format!("missing `{key}`"));
                return HeadingLevel::default();
            }
        };

        parsed.unwrap_or_else(|| {
            let found = self.field(key).map(Value::to_string).unwrap_or_default();
            self.problem(format!("`{key}` must be one of h1, h2, h3, found {found}"));
            HeadingLevel::default()
        })
    }

    /// Optional embed source; an unrecognised source counts as absent
    pub(super) fn embed_source(&mut self, key: &str) -> Option<EmbedSource> {
        match self.field(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(tag)) => EmbedSource::from_tag(tag).or_else(|| {
                self.problem(format!("`{key}` must be youtube, vimeo or upload, found {tag:?}"));
                None
            }),
            Some(other) => {
                self.problem(format!("`{key}` must be a string, found {}", kind(other)));
                None
            }
        }
    }

    pub(super) fn highlight_variant(&mut self, key: &str) -> HighlightVariant {
        match self.field(key) {
            Some(Value::String(tag)) => HighlightVariant::from_tag(tag).unwrap_or_else(|| {
                self.problem(format!("`{key}` must be alert or quote, found {tag:?}"));
                HighlightVariant::default()
            }),
            Some(other) => {
                self.problem(format!("`{key}` must be a string, found {}", kind(other)));
                HighlightVariant::default()
            }
            None => {
                self.problem(format!("missing `{key}`"));
                HighlightVariant::default()
            }
        }
    }

    /// Required item array; a missing or malformed array becomes one empty item
    pub(super) fn list_items(&mut self, key: &str) -> Vec<ListItem> {
        let entries = match self.field(key) {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                self.problem(format!("`{key}` must be an array, found {}", kind(other)));
                return vec![ListItem::default()];
            }
            None => {
                self.problem(format!("missing `{key}`"));
                return vec![ListItem::default()];
            }
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.list_item(key, index, entry))
            .collect()
    }

    fn list_item(&mut self, key: &str, index: usize, entry: &Value) -> ListItem {
        let Value::Object(item) = entry else {
            self.problem(format!("`{key}[{index}]` must be an object"));
            return ListItem::default();
        };

        let mut reader = FieldReader::new(item);
        let text = reader.text("text");
        let link = reader.optional_text("link");
        for problem in reader.into_problems() {
            self.problem(format!("`{key}[{index}]`: {problem}"));
        }

        ListItem { text, link }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
