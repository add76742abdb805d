/*!
 * Directory tree construction and rendering
 *
 * Turns the flat list of matched files into a nested name hierarchy and
 * renders it with box-drawing branches, one entry per line.
 */

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Component, Path};

/// Name of the synthetic root node; never rendered
pub const ROOT_NAME: &str = ".";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PAD: &str = "│   ";
const PAD: &str = "    ";

/// One path segment (directory or file) in the scanned subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Base name of the segment
    pub name: String,
    /// True only for leaf segments
    pub is_file: bool,
    /// Child segments keyed by name; render order comes from sorting, not from the map
    pub children: HashMap<String, TreeNode>,
}

impl TreeNode {
    fn new(name: impl Into<String>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            is_file,
            children: HashMap::new(),
        }
    }

    /// Empty synthetic root
    pub fn root() -> Self {
        Self::new(ROOT_NAME, false)
    }

    /// Build the tree for `files`, each made relative to `base`
    ///
    /// Paths outside `base` are used as if they were already relative.
    pub fn build<P: AsRef<Path>>(base: &Path, files: &[P]) -> Self {
        let mut root = Self::root();
        for file in files {
            root.insert(relative_segments(base, file.as_ref()));
        }
        root
    }

    /// Insert one path given as its segments; the last segment is the file
    pub fn insert(&mut self, segments: Vec<String>) {
        let count = segments.len();
        let mut current = self;

        for (i, segment) in segments.into_iter().enumerate() {
            let is_last = i + 1 == count;
            // A node that gains children stops being a file.
            current.is_file = false;
            current = current
                .children
                .entry(segment)
                .or_insert_with_key(|name| TreeNode::new(name.clone(), is_last));
        }
    }

    /// True for the synthetic root
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// Children sorted lexicographically by name
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut children: Vec<&TreeNode> = self.children.values().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    /// Number of file (leaf) nodes under this node
    pub fn file_count(&self) -> usize {
        if self.children.is_empty() {
            return usize::from(self.is_file);
        }
        self.children.values().map(TreeNode::file_count).sum()
    }

    /// Lazily yield the rendered lines, without trailing newlines
    pub fn lines(&self) -> TreeLines<'_> {
        TreeLines {
            stack: vec![Frame {
                node: self,
                prefix: String::new(),
                last: true,
            }],
        }
    }

    /// Stream the rendered tree into `out`, one line at a time
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Render the whole tree into a string
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::root()
    }
}

/// Pending node plus the prefix its line is drawn with
struct Frame<'a> {
    node: &'a TreeNode,
    prefix: String,
    last: bool,
}

/// Depth-first iterator over rendered tree lines
pub struct TreeLines<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let Frame { node, prefix, last } = self.stack.pop()?;

            let child_prefix = if node.is_root() {
                String::new()
            } else if last {
                format!("{}{}", prefix, PAD)
            } else {
                format!("{}{}", prefix, PIPE_PAD)
            };

            let children = node.sorted_children();
            let count = children.len();
            // Reverse push so the first child is popped first.
            for (i, child) in children.into_iter().enumerate().rev() {
                self.stack.push(Frame {
                    node: child,
                    prefix: child_prefix.clone(),
                    last: i + 1 == count,
                });
            }

            if !node.is_root() {
                let branch = if last { LAST_BRANCH } else { BRANCH };
                return Some(format!("{}{}{}", prefix, branch, node.name));
            }
        }
    }
}

/// Split `path` relative to `base` into its name segments
///
/// Falls back to the path's own normal components when it is not under `base`.
pub fn relative_segments(base: &Path, path: &Path) -> Vec<String> {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_shared_ancestors() {
        let files = paths(&["/root/a/x.go", "/root/a/y.go", "/root/b/z.go"]);
        let tree = TreeNode::build(Path::new("/root"), &files);

        assert_eq!(tree.children.len(), 2);
        let a = &tree.children["a"];
        let b = &tree.children["b"];
        assert!(!a.is_file);
        assert!(!b.is_file);
        assert_eq!(a.children.len(), 2);
        assert!(a.children["x.go"].is_file);
        assert!(a.children["y.go"].is_file);
        assert!(b.children["z.go"].is_file);
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn test_render_scenario() {
        let files = paths(&["/root/b/z.go", "/root/a/y.go", "/root/a/x.go"]);
        let tree = TreeNode::build(Path::new("/root"), &files);

        let expected = "\
├── a
│   ├── x.go
│   └── y.go
└── b
    └── z.go
";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn test_render_nested_prefixes() {
        let files = paths(&[
            "/p/src/main.rs",
            "/p/src/cli/args.rs",
            "/p/src/cli/mod.rs",
            "/p/README.md",
        ]);
        let tree = TreeNode::build(Path::new("/p"), &files);

        let expected = "\
├── README.md
└── src
    ├── cli
    │   ├── args.rs
    │   └── mod.rs
    └── main.rs
";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn test_render_is_order_invariant() {
        let base = Path::new("/w");
        let mut files = paths(&[
            "/w/z/1.txt",
            "/w/a/b/c.txt",
            "/w/a/b/a.txt",
            "/w/a/d.txt",
            "/w/m.txt",
            "/w/z/0.txt",
        ]);
        let expected = TreeNode::build(base, &files).render();

        files.reverse();
        assert_eq!(TreeNode::build(base, &files).render(), expected);

        files.rotate_left(2);
        assert_eq!(TreeNode::build(base, &files).render(), expected);

        files.swap(0, 3);
        assert_eq!(TreeNode::build(base, &files).render(), expected);
    }

    #[test]
    fn test_leaf_count_matches_inputs() {
        let files = paths(&[
            "/r/a/b/c/1", "/r/a/b/c/2", "/r/a/b/3", "/r/a/4", "/r/5", "/r/d/e/6",
        ]);
        let tree = TreeNode::build(Path::new("/r"), &files);
        assert_eq!(tree.file_count(), files.len());
        assert_eq!(tree.children["a"].children["b"].children.len(), 2);
    }

    #[test]
    fn test_write_to_matches_render() {
        let files = paths(&["/r/a/x", "/r/a/y/z", "/r/b"]);
        let tree = TreeNode::build(Path::new("/r"), &files);

        let mut streamed = Vec::new();
        tree.write_to(&mut streamed).unwrap();
        assert_eq!(String::from_utf8(streamed).unwrap(), tree.render());
    }

    #[test]
    fn test_paths_outside_base_are_used_as_relative() {
        let files = paths(&["/elsewhere/f.txt", "rel/g.txt"]);
        let tree = TreeNode::build(Path::new("/base"), &files);

        assert!(tree.children["elsewhere"].children["f.txt"].is_file);
        assert!(tree.children["rel"].children["g.txt"].is_file);
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = TreeNode::build::<PathBuf>(Path::new("/base"), &[]);
        assert_eq!(tree.lines().count(), 0);
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn test_file_becomes_directory_when_it_gains_children() {
        let mut tree = TreeNode::root();
        tree.insert(vec!["a".into()]);
        tree.insert(vec!["a".into(), "b".into()]);

        assert!(!tree.children["a"].is_file);
        assert_eq!(tree.file_count(), 1);
    }
}
