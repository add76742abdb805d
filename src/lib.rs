/*!
 * treeclip - copy a directory tree and its files to the clipboard
 *
 * This library scans a directory, renders the matching files as a tree and
 * concatenates their contents into a single text ready to paste into an AI
 * chat, optionally split into paste-sized sections.
 */

pub mod assembler;
pub mod clipboard;
pub mod config;
pub mod delivery;
pub mod error;
pub mod report;
pub mod scanner;
pub mod sections;
pub mod tree;
pub mod types;


// Re-export main components for easier access
pub use assembler::{Assembler, Assembly};
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::Config;
pub use delivery::{Delivery, DeliveryOutcome};
pub use error::{Result, TreeclipError};
pub use report::{ReportFormat, Reporter};
pub use scanner::{ScannedFiles, Scanner};
pub use sections::{split, Sections};
pub use tree::TreeNode;
pub use types::{ScanStatistics, SizeTier};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
