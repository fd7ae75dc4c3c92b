use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::ScanConfig;
use crate::error::{DocError, Result};

/// Finds module directories and their configuration files
pub struct ModuleWalker {
    config: ScanConfig,
}

impl ModuleWalker {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Names of the configuration files directly inside `dir`, sorted.
    pub fn list_module_files(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(dir).map_err(|e| DocError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DocError::io(dir, e))?;
            let path = entry.path();
            if path.is_file() && self.config.is_config_file(&path) {
                files.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        files.sort();

        Ok(files)
    }

    /// Every directory under `root` (root included) that directly holds a
    /// configuration file, parents before children, siblings by name.
    pub fn locate_modules(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(root).map_err(|e| DocError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(DocError::Input(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let respect = self.config.respect_gitignore;
        let walker = WalkBuilder::new(root)
            .hidden(!self.config.include_hidden)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut modules = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let dir = entry.path();
            match self.list_module_files(dir) {
                Ok(files) if !files.is_empty() => {
                    tracing::debug!("Found module {} ({} files)", dir.display(), files.len());
                    modules.push(dir.to_path_buf());
                }
                Ok(_) => {}
                Err(e) if entry.depth() > 0 => {
                    tracing::warn!("Skipping {}: {}", dir.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(modules)
    }
}

impl Default for ModuleWalker {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
