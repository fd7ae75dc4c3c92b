use crate::model::Comment;

/// Picks the module description: the first file-level comment whose text starts
/// with the module title. Empty when nothing matches.
pub fn resolve_description(comments: &[Comment], title: &str) -> String {
    comments
        .iter()
        .filter(|c| c.is_file_level())
        .map(|c| c.text.trim())
        .find(|text| text.starts_with(title))
        .map(str::to_string)
        .unwrap_or_default()
}
