/*!
 * Configuration handling for treeclip
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::sections::DEFAULT_SECTION_SIZE;

/// Verbosity of diagnostics written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Command-line arguments for treeclip
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "treeclip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a directory tree and its file contents to the clipboard",
    long_about = "Scans a directory, renders a tree of the matching files and copies the tree plus every file's contents to the clipboard, ready to paste into an AI chat."
)]
pub struct Args {
    /// File extensions to include, e.g. `go .rs md` (default: all files)
    pub extensions: Vec<String>,

    /// Directory to scan
    #[clap(long, default_value = ".")]
    pub dir: String,

    /// Split the output into sections and copy them one at a time
    #[clap(long)]
    pub chatgpt: bool,

    /// Maximum section size in characters for --chatgpt
    #[clap(long, default_value_t = DEFAULT_SECTION_SIZE)]
    pub section_size: usize,

    /// Comma-separated list of glob patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Respect .gitignore files
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Print the output to stdout instead of copying it
    #[clap(long)]
    pub stdout: bool,

    /// Don't print the tree to the terminal
    #[clap(long)]
    pub no_tree: bool,

    /// Diagnostic log level
    #[clap(long, value_enum, default_value_t = LogLevel::default())]
    pub log_level: LogLevel,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Normalized extensions: lowercase, no leading dot (empty = all files)
    pub extensions: Vec<String>,

    /// Glob patterns matched against entry names
    pub ignore_patterns: Vec<String>,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Deliver in sections instead of all at once
    pub chat_mode: bool,

    /// Maximum section size for chat mode
    pub section_size: usize,

    /// Print instead of copying
    pub to_stdout: bool,

    /// Print the tree to the terminal
    pub show_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            extensions: Vec::new(),
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            chat_mode: false,
            section_size: DEFAULT_SECTION_SIZE,
            to_stdout: false,
            show_tree: true,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.dir),
            extensions: args.extensions.iter().map(|e| normalize_extension(e)).collect(),
            ignore_patterns: args.ignore_patterns,
            respect_gitignore: args.respect_gitignore,
            chat_mode: args.chatgpt,
            section_size: args.section_size,
            to_stdout: args.stdout,
            show_tree: !args.no_tree,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );
        ensure!(
            self.section_size > 0,
            InvalidArgument,
            "--section-size must be greater than zero"
        );
        ensure!(
            !(self.chat_mode && self.to_stdout),
            InvalidArgument,
            "--chatgpt and --stdout cannot be combined"
        );
        Ok(())
    }
}

/// Lowercase an extension argument and drop its leading dot
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    lower.strip_prefix('.').unwrap_or(&lower).to_string()
}
