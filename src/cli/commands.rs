use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use tf_docs::error::Result;
use tf_docs::{ModuleDocument, ModuleWalker, ScanConfig, Scanner};

#[derive(Parser)]
#[command(name = "tf-docs")]
#[command(about = "Extract documentation metadata from Terraform module trees")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Extract every module under the current directory as JSON
    tf-docs scan

    # One summary line per module, keeping valid blocks next to invalid ones
    tf-docs scan ./modules --format text --lenient

    # List module directories two levels deep
    tf-docs modules ./modules --max-depth 2

    # List the configuration files of one module
    tf-docs files ./modules/vpc
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .tf-docs.yml in the scanned directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract module documents
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Skip invalid blocks instead of failing the module
        #[arg(long)]
        lenient: bool,

        /// Maximum directory depth below the scanned directory
        #[arg(long)]
        max_depth: Option<usize>,

        /// Descend into hidden directories
        #[arg(long)]
        include_hidden: bool,

        /// Extract modules one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// List module directories
    Modules {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum directory depth below the scanned directory
        #[arg(long)]
        max_depth: Option<usize>,

        /// Descend into hidden directories
        #[arg(long)]
        include_hidden: bool,
    },

    /// List configuration files of one directory
    Files {
        /// Module directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON documents
    Json,
    /// One summary line per module
    Text,
}

/// Explicit `--config` file, else `.tf-docs.yml` in `root`, else defaults.
pub fn load_config(root: &Path, config: Option<&PathBuf>) -> Result<ScanConfig> {
    match config {
        Some(path) => ScanConfig::load(path),
        None => ScanConfig::discover(root),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn scan(
    path: &Path,
    config_path: Option<&PathBuf>,
    format: OutputFormat,
    lenient: bool,
    max_depth: Option<usize>,
    include_hidden: bool,
    sequential: bool,
) -> Result<()> {
    let mut config = load_config(path, config_path)?;
    config.lenient |= lenient;
    config.include_hidden |= include_hidden;
    config.parallel &= !sequential;
    if max_depth.is_some() {
        config.max_depth = max_depth;
    }

    let mut scanner = Scanner::new(config);
    if std::io::stderr().is_terminal() {
        scanner = scanner.with_progress(progress_bar());
    }

    let docs = scanner.scan(path)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&docs)?),
        OutputFormat::Text => {
            for doc in &docs {
                println!("{}", summary_line(doc));
            }
            println!("\n{} modules", docs.len());
        }
    }

    Ok(())
}

pub fn list_modules(
    path: &Path,
    config_path: Option<&PathBuf>,
    max_depth: Option<usize>,
    include_hidden: bool,
) -> Result<()> {
    let mut config = load_config(path, config_path)?;
    config.include_hidden |= include_hidden;
    if max_depth.is_some() {
        config.max_depth = max_depth;
    }

    let modules = Scanner::new(config).locate(path)?;
    for module in &modules {
        println!("{}", module.display());
    }

    Ok(())
}

pub fn list_files(dir: &Path, config_path: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir, config_path)?;
    let walker = ModuleWalker::new(config);

    for file in walker.list_module_files(dir)? {
        println!("{}", file);
    }

    Ok(())
}

fn summary_line(doc: &ModuleDocument) -> String {
    let mut line = format!(
        "{}: {} variables, {} outputs, {} resources, {} modules",
        doc.link,
        doc.variables.len(),
        doc.outputs.len(),
        doc.resources.len(),
        doc.modules.len()
    );
    if !doc.description.is_empty() {
        line.push_str(&format!(" - {}", doc.description));
    }
    line
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} modules")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    progress
}
