/*!
 * Assembly of the clipboard text: tree, blank line, then one block per file
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::tree::{relative_segments, TreeNode};
use crate::types::ScanStatistics;

/// The assembled output and what went into it
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Tree of the files that were passed in
    pub root: TreeNode,
    /// Rendered tree, one entry per line
    pub tree: String,
    /// Full text handed to the clipboard
    pub buffer: String,
    /// Counters over the included file contents
    pub statistics: ScanStatistics,
}

/// Builds the clipboard text for a set of files
pub struct Assembler {
    base_dir: PathBuf,
}

impl Assembler {
    /// Create an assembler for files under `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Build the tree and the buffer for `files`, in the given order
    ///
    /// Files that cannot be read are left out of both the buffer and the
    /// counters; they still appear in the tree.
    pub fn assemble(&self, files: &[PathBuf]) -> Assembly {
        let root = TreeNode::build(&self.base_dir, files);
        let tree = root.render();

        let mut buffer = String::with_capacity(tree.len() + 1);
        buffer.push_str(&tree);
        buffer.push('\n');

        let mut statistics = ScanStatistics::default();
        for path in files {
            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            buffer.push_str(&file_header(&self.base_dir, path));
            buffer.push_str(&String::from_utf8_lossy(&data));
            if data.last().is_some_and(|&b| b != b'\n') {
                buffer.push('\n');
            }
            statistics.record(&data);
        }

        Assembly {
            root,
            tree,
            buffer,
            statistics,
        }
    }
}

/// `./<relative path>` with forward slashes
pub fn display_path(base_dir: &Path, path: &Path) -> String {
    let segments = relative_segments(base_dir, path);
    if segments.is_empty() {
        return ".".to_string();
    }
    format!("./{}", segments.join("/"))
}

/// Header line that opens a file's block
pub fn file_header(base_dir: &Path, path: &Path) -> String {
    format!("===={}====\n", display_path(base_dir, path))
}
