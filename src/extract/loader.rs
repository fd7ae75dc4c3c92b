use std::path::Path;

use super::walker::ModuleWalker;
use crate::error::{DocError, Result};

/// Raw text of one configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Reads every configuration file of a module directory in listing order.
pub fn load_module(walker: &ModuleWalker, dir: &Path) -> Result<Vec<SourceFile>> {
    walker
        .list_module_files(dir)?
        .into_iter()
        .map(|name| {
            let path = dir.join(&name);
            let text = std::fs::read_to_string(&path).map_err(|e| DocError::io(&path, e))?;
            Ok(SourceFile::new(name, text))
        })
        .collect()
}
