use std::fmt;

use serde::{Deserialize, Serialize};

// =====================================================
// Document model
// =====================================================

/// Documentation extracted from one module directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocument {
    /// Leaf directory name of the module
    pub title: String,
    /// Directory segments between the scan root and the module directory
    pub path: String,
    /// Flattened identifier (`path-segments_title`, or just `title` at the root)
    pub link: String,
    /// First file-level comment that starts with the title
    pub description: String,
    pub variables: Vec<Variable>,
    pub outputs: Vec<Output>,
    pub resources: Vec<Resource>,
    pub modules: Vec<ModuleReference>,
}

/// A `variable "name" { ... }` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: String,
    pub description: String,
    /// Rendered default value, empty when none is declared
    pub default: String,
    pub required: bool,
}

impl Variable {
    /// Builds a variable; `required` always follows from `default`.
    pub fn new(
        name: impl Into<String>,
        var_type: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            var_type: var_type.into(),
            description: description.into(),
            required: default.is_empty(),
            default,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub description: String,
}

/// A `module "name" { source = ... }` block referencing another module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReference {
    pub name: String,
    pub source: String,
    pub description: String,
}

/// Normalized comment text with the 1-based position of its group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }

    /// File-level comments start on the first line of a file.
    pub fn is_file_level(&self) -> bool {
        self.line == 1
    }
}

// =====================================================
// Element kinds
// =====================================================

/// Kind of top-level block that ends up in a [`ModuleDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Variable,
    Output,
    Resource,
    Module,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Variable,
        ElementKind::Output,
        ElementKind::Resource,
        ElementKind::Module,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ElementKind::Variable => "variable",
            ElementKind::Output => "output",
            ElementKind::Resource => "resource",
            ElementKind::Module => "module",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "variable" => Some(ElementKind::Variable),
            "output" => Some(ElementKind::Output),
            "resource" => Some(ElementKind::Resource),
            "module" => Some(ElementKind::Module),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
