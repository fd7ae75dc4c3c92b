//! Generic configuration syntax tree
//!
//! Parsers turn raw configuration text into a [`SyntaxTree`]: ordered top-level
//! blocks with their key tokens, an attribute body and an optional leading comment
//! group, plus every comment group found in the file.

pub mod hcl;

pub use hcl::HclParser;

use crate::error::Result;

/// Turns raw configuration text into a [`SyntaxTree`].
pub trait SourceParser: Send + Sync {
    /// Parses `source`; `file` is only used to locate errors.
    fn parse(&self, file: &str, source: &str) -> Result<SyntaxTree>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    /// Top-level blocks in source order
    pub blocks: Vec<Block>,
    /// All comment groups of the file in source order
    pub comments: Vec<CommentGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Keyword followed by the raw (still quoted) labels
    pub keys: Vec<String>,
    /// `None` for top-level attributes, which have no nested body
    pub body: Option<Body>,
    pub lead_comment: Option<CommentGroup>,
    /// 1-based line of the block keyword
    pub line: usize,
}

impl Block {
    pub fn new(keys: &[&str], body: Option<Body>) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            body,
            lead_comment: None,
            line: 0,
        }
    }

    pub fn with_lead_comment(mut self, comment: CommentGroup) -> Self {
        self.lead_comment = Some(comment);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub attributes: Vec<Attribute>,
}

impl Body {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn literal(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            value: AttributeValue::Literal(text.to_string()),
        }
    }

    pub fn list(name: &str, items: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            value: AttributeValue::List(items.iter().map(|i| i.to_string()).collect()),
        }
    }

    pub fn other(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: AttributeValue::Other,
        }
    }
}

/// Attribute value as far as extraction cares about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Raw literal text, quotes included
    Literal(String),
    /// Raw text of each literal element
    List(Vec<String>),
    /// Nested blocks, objects, heredocs and other expressions
    Other,
}

/// One raw comment token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComment {
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    /// Byte offset of the comment start
    pub offset: usize,
    /// Shares its line with preceding code
    pub trailing: bool,
}

impl RawComment {
    pub fn new(text: &str, line: usize, column: usize) -> Self {
        Self {
            text: text.to_string(),
            line,
            column,
            end_line: line + text.matches('\n').count(),
            offset: 0,
            trailing: false,
        }
    }
}

/// Comments on consecutive lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: Vec<RawComment>,
}

impl CommentGroup {
    pub fn new(comments: Vec<RawComment>) -> Self {
        Self { comments }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn line(&self) -> usize {
        self.comments.first().map(|c| c.line).unwrap_or(0)
    }

    pub fn column(&self) -> usize {
        self.comments.first().map(|c| c.column).unwrap_or(0)
    }

    pub fn end_line(&self) -> usize {
        self.comments.last().map(|c| c.end_line).unwrap_or(0)
    }

    pub fn offset(&self) -> usize {
        self.comments.first().map(|c| c.offset).unwrap_or(0)
    }

    pub fn is_trailing(&self) -> bool {
        self.comments.first().is_some_and(|c| c.trailing)
    }

    /// Groups raw comments (in source order) into runs on consecutive lines.
    /// Trailing comments always stand alone.
    pub fn group(comments: Vec<RawComment>) -> Vec<CommentGroup> {
        let mut groups: Vec<CommentGroup> = Vec::new();

        for comment in comments {
            let joins = match groups.last() {
                Some(last) => {
                    !comment.trailing
                        && !last.is_trailing()
                        && comment.line <= last.end_line() + 1
                }
                None => false,
            };

            match groups.last_mut() {
                Some(last) if joins => last.comments.push(comment),
                _ => groups.push(CommentGroup::new(vec![comment])),
            }
        }

        groups
    }
}
