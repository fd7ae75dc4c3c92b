//! Scan configuration.
//!
//! Read from an optional `.tf-docs.yml` in the scan root; CLI flags override it.
//!
//! ```yaml
//! extensions: [tf]
//! include_hidden: false
//! respect_gitignore: false
//! max_depth: 4
//! lenient: false
//! parallel: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};
use crate::syntax::hcl::TERRAFORM_EXTENSIONS;

/// Name of the optional configuration file in the scan root
pub const CONFIG_FILENAME: &str = ".tf-docs.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) that mark configuration files
    pub extensions: Vec<String>,
    /// Descend into hidden directories such as `.terraform`
    pub include_hidden: bool,
    /// Skip paths excluded by `.gitignore`/`.ignore`
    pub respect_gitignore: bool,
    /// Maximum directory depth below the scan root
    pub max_depth: Option<usize>,
    /// Keep valid elements when a sibling block is invalid, logging the rest
    pub lenient: bool,
    /// Extract modules on the rayon pool
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: TERRAFORM_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
            respect_gitignore: false,
            max_depth: None,
            lenient: false,
            parallel: true,
        }
    }
}

impl ScanConfig {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| DocError::Config(format!("Invalid {}: {}", CONFIG_FILENAME, e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocError::io(path, e))?;
        Self::parse(&content)
    }

    /// Loads `.tf-docs.yml` from `root` when present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn is_config_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}
