use std::path::{Component, Path};

use super::classify::{classify, Classified, Element};
use super::comment::file_comments;
use super::description::resolve_description;
use super::loader::SourceFile;
use super::values::{extract_values, Value};
use crate::error::{DocError, Result};
use crate::model::{ModuleDocument, ModuleReference, Output, Resource, Variable};
use crate::syntax::{HclParser, SourceParser};

/// Builds one [`ModuleDocument`] from the files of a module directory
pub struct ModuleAssembler<P: SourceParser = HclParser> {
    parser: P,
    lenient: bool,
}

impl ModuleAssembler<HclParser> {
    pub fn new() -> Self {
        Self::with_parser(HclParser::new())
    }
}

impl Default for ModuleAssembler<HclParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SourceParser> ModuleAssembler<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            lenient: false,
        }
    }

    /// Keep valid elements of a file even when a sibling block is invalid.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Parses and classifies `files` in order. The first parse or classification
    /// error aborts the module.
    pub fn assemble(&self, title: &str, path: &str, files: &[SourceFile]) -> Result<ModuleDocument> {
        if title.is_empty() {
            return Err(DocError::Input("module title cannot be empty".to_string()));
        }

        let mut doc = ModuleDocument {
            title: title.to_string(),
            path: path.to_string(),
            link: module_link(path, title),
            ..Default::default()
        };
        let mut comments = Vec::new();

        for file in files {
            let tree = self.parser.parse(&file.name, &file.text)?;
            comments.extend(file_comments(&tree));

            let values = extract_values(&tree);
            doc.variables.extend(self.accept::<Variable>(&values, &file.name)?);
            doc.outputs.extend(self.accept::<Output>(&values, &file.name)?);
            doc.modules.extend(self.accept::<ModuleReference>(&values, &file.name)?);
            doc.resources.extend(self.accept::<Resource>(&values, &file.name)?);

            tracing::debug!("Extracted {} blocks from {}/{}", values.len(), title, file.name);
        }

        doc.description = resolve_description(&comments, title);

        Ok(doc)
    }

    fn accept<T: Element>(&self, values: &[Value], file: &str) -> Result<Vec<T>> {
        let classified: Classified<T> = classify(values);

        if !self.lenient {
            return classified.into_strict().map_err(|e| e.in_file(file));
        }

        for err in &classified.errors {
            tracing::warn!("Skipping {} in {}: {}", T::KIND, file, err);
        }
        Ok(classified.items)
    }
}

/// Leaf directory name of a module; falls back to the canonical path for `.`-style roots.
pub fn module_title(dir: &Path) -> Result<String> {
    let name = match dir.file_name() {
        Some(name) => Some(name.to_string_lossy().to_string()),
        None => dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string())),
    };

    name.filter(|n| !n.is_empty())
        .ok_or_else(|| DocError::Input(format!("cannot derive a module title from {}", dir.display())))
}

/// Directory segments strictly between `root` and `dir`, joined by `/`.
pub fn module_path(root: &Path, dir: &Path) -> String {
    let Ok(relative) = dir.strip_prefix(root) else {
        return String::new();
    };

    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    match segments.split_last() {
        Some((_, parents)) => parents.join("/"),
        None => String::new(),
    }
}

/// Flattens `path` and `title` into `seg1-seg2_title`, or just `title` at the root.
pub fn module_link(path: &str, title: &str) -> String {
    let link = format!("{}_{}", path.replace('/', "-"), title);
    match link.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => link,
    }
}
