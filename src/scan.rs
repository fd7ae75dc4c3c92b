use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::config::ScanConfig;
use crate::error::{DocError, Result};
use crate::extract::{load_module, module_path, module_title, ModuleAssembler, ModuleWalker};
use crate::model::ModuleDocument;

/// Scans a directory tree into one [`ModuleDocument`] per module directory
pub struct Scanner {
    walker: ModuleWalker,
    assembler: ModuleAssembler,
    parallel: bool,
    progress: Option<ProgressBar>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        let assembler = ModuleAssembler::new().lenient(config.lenient);
        let parallel = config.parallel;
        Self {
            walker: ModuleWalker::new(config),
            assembler,
            parallel,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        self.walker.config()
    }

    /// Module directories under `root`; an empty result is an error.
    pub fn locate(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if root.as_os_str().is_empty() {
            return Err(DocError::Input("directory cannot be empty".to_string()));
        }

        let modules = self.walker.locate_modules(root)?;
        if modules.is_empty() {
            return Err(DocError::Discovery(root.to_path_buf()));
        }

        Ok(modules)
    }

    /// Documents in discovery order. The first failing module (in that order)
    /// aborts the scan.
    pub fn scan(&self, root: &Path) -> Result<Vec<ModuleDocument>> {
        let modules = self.locate(root)?;
        tracing::info!("Found {} modules under {}", modules.len(), root.display());

        if let Some(progress) = &self.progress {
            progress.set_length(modules.len() as u64);
        }

        let results: Vec<Result<ModuleDocument>> = if self.parallel {
            modules
                .par_iter()
                .map(|dir| self.scan_module_tracked(root, dir))
                .collect()
        } else {
            modules
                .iter()
                .map(|dir| self.scan_module_tracked(root, dir))
                .collect()
        };

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        results.into_iter().collect()
    }

    fn scan_module_tracked(&self, root: &Path, dir: &Path) -> Result<ModuleDocument> {
        let result = self.scan_module(root, dir);
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
        result
    }

    /// Builds the document of a single module directory below `root`.
    pub fn scan_module(&self, root: &Path, dir: &Path) -> Result<ModuleDocument> {
        let title = module_title(dir)?;
        let path = module_path(root, dir);

        let files = load_module(&self.walker, dir)?;
        tracing::debug!("Loading module {} ({} files)", dir.display(), files.len());

        self.assembler
            .assemble(&title, &path, &files)
            .map_err(|e| e.in_module(&dir.display().to_string()))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

/// Scans `root` with the default configuration.
pub fn scan(root: &Path) -> Result<Vec<ModuleDocument>> {
    Scanner::default().scan(root)
}
