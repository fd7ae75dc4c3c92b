pub mod assembler;
pub mod classify;
pub mod comment;
pub mod description;
pub mod loader;
pub mod values;
pub mod walker;

pub use assembler::{module_link, module_path, module_title, ModuleAssembler};
pub use classify::{classify, select, Classified, Element};
pub use comment::{file_comments, normalize_group, tidy_comment};
pub use description::resolve_description;
pub use loader::{load_module, SourceFile};
pub use values::{block_value, extract_values, render_value, trim_quotes, Value};
pub use walker::ModuleWalker;
