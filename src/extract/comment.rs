use crate::model::Comment;
use crate::syntax::{CommentGroup, SyntaxTree};

/// Strips comment delimiters and surrounding whitespace from one raw comment.
pub fn tidy_comment(raw: &str) -> String {
    let text = if let Some(rest) = raw.strip_prefix("//") {
        rest
    } else if let Some(rest) = raw.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else if let Some(rest) = raw.strip_prefix('#') {
        rest
    } else {
        raw
    };

    text.trim().to_string()
}

/// Collapses a comment group into one [`Comment`]; empty groups yield nothing.
pub fn normalize_group(group: &CommentGroup) -> Option<Comment> {
    if group.is_empty() {
        return None;
    }

    let text = group
        .comments
        .iter()
        .map(|c| tidy_comment(&c.text))
        .collect::<Vec<_>>()
        .join(" ");

    Some(Comment::new(text, group.line(), group.column()))
}

/// All comment groups of a file, normalized, in source order.
pub fn file_comments(tree: &SyntaxTree) -> Vec<Comment> {
    tree.comments.iter().filter_map(normalize_group).collect()
}
