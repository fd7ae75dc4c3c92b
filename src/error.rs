use std::path::PathBuf;

use thiserror::Error;

use crate::model::ElementKind;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("no modules found in path {}", .0.display())]
    Discovery(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in {file} at {line}:{column}: {message}")]
    Syntax {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{field} is required for a {kind}")]
    MissingField {
        kind: ElementKind,
        field: &'static str,
    },

    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<DocError>,
    },

    #[error("module {module}: {source}")]
    InModule {
        module: String,
        #[source]
        source: Box<DocError>,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches the originating file name, leaving already-located errors alone.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            err @ (Self::Syntax { .. } | Self::InFile { .. } | Self::Io { .. }) => err,
            other => Self::InFile {
                file: file.to_string(),
                source: Box::new(other),
            },
        }
    }

    pub fn in_module(self, module: &str) -> Self {
        Self::InModule {
            module: module.to_string(),
            source: Box::new(self),
        }
    }

    /// Strips file and module context, returning the underlying error.
    pub fn root_cause(&self) -> &DocError {
        match self {
            Self::InFile { source, .. } | Self::InModule { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
