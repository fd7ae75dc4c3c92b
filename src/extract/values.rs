use std::collections::HashMap;

use super::comment::normalize_group;
use crate::model::Comment;
use crate::syntax::{AttributeValue, Block, SyntaxTree};

/// Flattened view of one top-level block, used only while classifying
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    /// First key token, e.g. `variable`
    pub keyword: String,
    /// Remaining key tokens with quotes trimmed
    pub identifiers: Vec<String>,
    /// Rendered literal and list attributes
    pub attributes: HashMap<String, String>,
    pub comment: Comment,
}

impl Value {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn identifier(&self, index: usize) -> Option<&str> {
        self.identifiers.get(index).map(|s| s.as_str())
    }
}

/// Strips one `\"` and then one `"` from each end of `input`.
pub fn trim_quotes(input: &str) -> &str {
    let mut result = input;
    for pattern in ["\\\"", "\""] {
        result = result.strip_prefix(pattern).unwrap_or(result);
        result = result.strip_suffix(pattern).unwrap_or(result);
    }
    result
}

/// Renders an attribute value; `None` for kinds extraction ignores.
pub fn render_value(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Literal(text) => Some(trim_quotes(text).to_string()),
        AttributeValue::List(items) => {
            let items: Vec<&str> = items.iter().map(|i| trim_quotes(i)).collect();
            Some(format!("[{}]", items.join(", ")))
        }
        AttributeValue::Other => None,
    }
}

pub fn block_value(block: &Block) -> Value {
    let keyword = block.keys.first().cloned().unwrap_or_default();
    let identifiers = block
        .keys
        .iter()
        .skip(1)
        .map(|k| trim_quotes(k).to_string())
        .collect();

    let attributes = block
        .body
        .iter()
        .flat_map(|body| body.attributes.iter())
        .filter_map(|attr| {
            render_value(&attr.value).map(|rendered| (trim_quotes(&attr.name).to_string(), rendered))
        })
        .collect();

    let comment = block
        .lead_comment
        .as_ref()
        .and_then(normalize_group)
        .unwrap_or_default();

    Value {
        keyword,
        identifiers,
        attributes,
        comment,
    }
}

/// One [`Value`] per top-level block, in source order.
pub fn extract_values(tree: &SyntaxTree) -> Vec<Value> {
    tree.blocks.iter().map(block_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Attribute, Body, CommentGroup, RawComment};

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("\"x\""), "x");
        assert_eq!(trim_quotes("\\\"x\\\""), "x");
        assert_eq!(trim_quotes("x"), "x");
        assert_eq!(trim_quotes("\"\"x\"\""), "\"x\"");
        assert_eq!(trim_quotes(""), "");
    }

    #[test]
    fn test_render_lists() {
        let two = AttributeValue::List(vec!["\"a\"".to_string(), "\"b\"".to_string()]);
        assert_eq!(render_value(&two).unwrap(), "[a, b]");

        let one = AttributeValue::List(vec!["a".to_string()]);
        assert_eq!(render_value(&one).unwrap(), "[a]");

        assert_eq!(render_value(&AttributeValue::List(Vec::new())).unwrap(), "[]");
    }

    #[test]
    fn test_render_other_is_ignored() {
        assert!(render_value(&AttributeValue::Other).is_none());
    }

    #[test]
    fn test_block_value() {
        let block = Block::new(
            &["resource", "\"aws_ami\"", "\"ami\""],
            Some(Body::new(vec![
                Attribute::literal("most_recent", "true"),
                Attribute::list("owners", &["\"self\"", "\"amazon\""]),
                Attribute::other("filter"),
            ])),
        )
        .with_lead_comment(CommentGroup::new(vec![RawComment::new(
            "// this is a resource",
            4,
            1,
        )]));

        let value = block_value(&block);
        assert_eq!(value.keyword, "resource");
        assert_eq!(value.identifiers, vec!["aws_ami", "ami"]);
        assert_eq!(value.attribute("most_recent"), Some("true"));
        assert_eq!(value.attribute("owners"), Some("[self, amazon]"));
        assert_eq!(value.attribute("filter"), None);
        assert_eq!(value.attributes.len(), 2);
        assert_eq!(value.comment.text, "this is a resource");
        assert_eq!(value.comment.line, 4);
    }

    #[test]
    fn test_block_without_body_or_comment() {
        let value = block_value(&Block::new(&["region"], None));
        assert_eq!(value.keyword, "region");
        assert!(value.identifiers.is_empty());
        assert!(value.attributes.is_empty());
        assert_eq!(value.comment, Comment::default());
    }

    #[test]
    fn test_extract_values_keeps_every_block() {
        let tree = SyntaxTree {
            blocks: vec![
                Block::new(&["variable", "\"a\""], Some(Body::default())),
                Block::new(&["locals"], Some(Body::default())),
                Block::new(&[], None),
            ],
            comments: Vec::new(),
        };

        let values = extract_values(&tree);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].identifier(0), Some("a"));
        assert_eq!(values[1].keyword, "locals");
        assert_eq!(values[2].keyword, "");
    }
}
