pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod scan;
pub mod syntax;

pub use config::{ScanConfig, CONFIG_FILENAME};
pub use error::{DocError, Result};
pub use extract::{ModuleAssembler, ModuleWalker, SourceFile, Value};
pub use model::{Comment, ElementKind, ModuleDocument, ModuleReference, Output, Resource, Variable};
pub use scan::{scan, Scanner};
pub use syntax::{HclParser, SourceParser, SyntaxTree};
