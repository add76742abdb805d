/*!
 * Directory scanning and file selection
 */

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob_match::glob_match;
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;

/// Version control metadata directories, never copied in gitignore mode
pub const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg", ".bzr"];

/// Files selected by a scan, in walk order
#[derive(Debug, Clone, Default)]
pub struct ScannedFiles {
    /// Absolute directory the scan started from
    pub base_dir: PathBuf,
    /// Absolute paths of the matching files
    pub files: Vec<PathBuf>,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress spinner
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the target directory and collect the files that pass the filters
    ///
    /// Entries that cannot be read are skipped; only a missing or unreadable
    /// target directory is an error.
    pub fn scan(&self) -> io::Result<ScannedFiles> {
        let base_dir = fs::canonicalize(&self.config.target_dir)?;
        debug!("Scanning {}", base_dir.display());

        let files = if self.config.respect_gitignore {
            self.walk_with_gitignore(&base_dir)
        } else {
            self.walk_all(&base_dir)
        };

        debug!("Selected {} files", files.len());
        Ok(ScannedFiles { base_dir, files })
    }

    /// Plain recursive walk that includes everything not explicitly ignored
    fn walk_all(&self, base_dir: &Path) -> Vec<PathBuf> {
        let patterns = &self.config.ignore_patterns;

        WalkDir::new(base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(patterns, e.file_name()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|e| {
                e.file_type().is_file() || (e.path_is_symlink() && resolves_to_file(e.path()))
            })
            .map(|e| e.into_path())
            .filter(|path| self.accept(path))
            .collect()
    }

    /// Walk that applies .gitignore rules on top of the ignore patterns
    fn walk_with_gitignore(&self, base_dir: &Path) -> Vec<PathBuf> {
        let patterns = self.config.ignore_patterns.clone();

        let mut walker = WalkBuilder::new(base_dir);
        walker
            .hidden(false)
            .require_git(false)
            .sort_by_file_name(|a: &OsStr, b: &OsStr| -> Ordering { a.cmp(b) })
            .filter_entry(move |e| {
                let name = e.file_name();
                e.depth() == 0 || !(is_vcs_dir(name) || is_ignored(&patterns, name))
            });

        walker
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|e| {
                e.file_type().map_or(false, |ft| ft.is_file())
                    || (e.path_is_symlink() && resolves_to_file(e.path()))
            })
            .map(|e| e.into_path())
            .filter(|path| self.accept(path))
            .collect()
    }

    /// Apply the extension filter and tick the spinner for accepted files
    fn accept(&self, path: &Path) -> bool {
        if !matches_extension(&self.config.extensions, path) {
            return false;
        }
        self.progress.inc(1);
        if let Some(name) = path.file_name() {
            self.progress
                .set_message(format!("Found {}", name.to_string_lossy()));
        }
        true
    }
}

/// True if `name` matches any of the glob `patterns`
pub fn is_ignored(patterns: &[String], name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    patterns.iter().any(|pattern| glob_match(pattern, &name))
}

/// True if `name` is a version control metadata directory
pub fn is_vcs_dir(name: &OsStr) -> bool {
    VCS_DIRS.iter().any(|dir| OsStr::new(dir) == name)
}

/// True if `path` follows through to a regular file
fn resolves_to_file(path: &Path) -> bool {
    fs::metadata(path).map_or(false, |m| m.is_file())
}

/// True if the file's extension is one of `extensions`, or the list is empty
///
/// The extension is everything after the last `.` of the file name,
/// compared case-insensitively.
pub fn matches_extension(extensions: &[String], path: &Path) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };
    match name.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| e == ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn relative(scanned: &ScannedFiles) -> Vec<String> {
        scanned
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(&scanned.base_dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn scanner(config: Config) -> Scanner {
        Scanner::new(config, Arc::new(ProgressBar::hidden()))
    }

    #[test]
    fn test_matches_extension() {
        let go = exts(&["go"]);
        assert!(matches_extension(&go, Path::new("/a/main.go")));
        assert!(matches_extension(&go, Path::new("/a/MAIN.GO")));
        assert!(!matches_extension(&go, Path::new("/a/main.rs")));
        assert!(!matches_extension(&go, Path::new("/a/Makefile")));
        assert!(matches_extension(&[], Path::new("/a/Makefile")));
        assert!(matches_extension(&exts(&["bashrc"]), Path::new("/home/.bashrc")));
        assert!(matches_extension(&exts(&["gz"]), Path::new("x.tar.gz")));
    }

    #[test]
    fn test_is_ignored() {
        let patterns = exts(&["target", "*.lock"]);
        assert!(is_ignored(&patterns, OsStr::new("target")));
        assert!(is_ignored(&patterns, OsStr::new("Cargo.lock")));
        assert!(!is_ignored(&patterns, OsStr::new("src")));
        assert!(!is_ignored(&[], OsStr::new("anything")));
    }

    #[test]
    fn test_scan_sorted_and_filtered() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "b/z.go", "package b\n");
        touch(dir.path(), "a/y.go", "package a\n");
        touch(dir.path(), "a/x.go", "package a\n");
        touch(dir.path(), "a/notes.txt", "skip me\n");
        touch(dir.path(), "top.GO", "package main\n");

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            extensions: exts(&["go"]),
            ..Config::default()
        };
        let scanned = scanner(config).scan()?;

        assert_eq!(
            relative(&scanned),
            vec!["a/x.go", "a/y.go", "b/z.go", "top.GO"]
        );
        assert!(scanned.files.iter().all(|p| p.is_absolute()));
        Ok(())
    }

    #[test]
    fn test_scan_ignore_patterns_prune_directories() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "src/lib.rs", "");
        touch(dir.path(), "target/debug/out.rs", "");
        touch(dir.path(), "Cargo.lock", "");

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            ignore_patterns: exts(&["target", "*.lock"]),
            ..Config::default()
        };
        let scanned = scanner(config).scan()?;

        assert_eq!(relative(&scanned), vec!["src/lib.rs"]);
        Ok(())
    }

    #[test]
    fn test_scan_includes_hidden_files_by_default() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), ".env", "KEY=1\n");
        touch(dir.path(), "main.go", "");

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let scanned = scanner(config).scan()?;

        assert_eq!(relative(&scanned), vec![".env", "main.go"]);
        Ok(())
    }

    #[test]
    fn test_scan_respects_gitignore() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), ".gitignore", "*.log\nbuild/\n");
        touch(dir.path(), "app.log", "noise\n");
        touch(dir.path(), "build/out.txt", "artifact\n");
        touch(dir.path(), "src/main.rs", "fn main() {}\n");

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            respect_gitignore: true,
            ..Config::default()
        };
        let scanned = scanner(config).scan()?;

        assert_eq!(relative(&scanned), vec![".gitignore", "src/main.rs"]);
        Ok(())
    }

    #[test]
    fn test_gitignore_mode_skips_vcs_metadata() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), ".git/HEAD", "ref: refs/heads/main\n");
        touch(dir.path(), ".git/objects/ab/cdef", "\u{0}\u{1}binary");
        touch(dir.path(), ".hg/store/data", "x");
        touch(dir.path(), ".gitignore", "*.log\n");
        touch(dir.path(), "main.rs", "fn main() {}\n");

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            respect_gitignore: true,
            ..Config::default()
        };
        let scanned = scanner(config).scan()?;

        assert_eq!(relative(&scanned), vec![".gitignore", "main.rs"]);
        Ok(())
    }

    #[test]
    fn test_is_vcs_dir() {
        assert!(is_vcs_dir(OsStr::new(".git")));
        assert!(is_vcs_dir(OsStr::new(".svn")));
        assert!(!is_vcs_dir(OsStr::new(".github")));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_files() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let elsewhere = tempfile::tempdir()?;
        touch(dir.path(), "main.go", "package main\n");
        touch(elsewhere.path(), "real.go", "package shared\n");
        std::os::unix::fs::symlink(
            elsewhere.path().join("real.go"),
            dir.path().join("shared.go"),
        )?;
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("linked_dir"))?;

        for respect_gitignore in [false, true] {
            let config = Config {
                target_dir: dir.path().to_path_buf(),
                extensions: exts(&["go"]),
                respect_gitignore,
                ..Config::default()
            };
            let scanned = scanner(config).scan()?;

            assert_eq!(relative(&scanned), vec!["main.go", "shared.go"]);
        }
        Ok(())
    }

    #[test]
    fn test_scan_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            target_dir: dir.path().join("missing"),
            ..Config::default()
        };
        assert!(scanner(config).scan().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_unreadable_directories() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        touch(dir.path(), "open/a.txt", "a\n");
        touch(dir.path(), "locked/b.txt", "b\n");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        let config = Config {
            target_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let result = scanner(config).scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        let scanned = result?;
        assert!(relative(&scanned).contains(&"open/a.txt".to_string()));
        Ok(())
    }
}
