use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::config::AuditSettings;

use super::pattern::{PatternError, PatternSet};

/// Which files under the source-language root are candidates for translation.
#[derive(Debug, Clone)]
pub struct WalkRules {
    extensions: Vec<String>,
    skip_directories: PatternSet,
    restricted: PatternSet,
}

impl WalkRules {
    pub fn new<S: AsRef<str>>(
        extensions: &[S],
        skip_directories: &[S],
        restricted_patterns: &[S],
    ) -> Result<Self, PatternError> {
        Ok(Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
            skip_directories: PatternSet::compile(skip_directories)?,
            restricted: PatternSet::compile(restricted_patterns)?,
        })
    }

    pub fn from_settings(settings: &AuditSettings) -> Result<Self, PatternError> {
        Self::new(
            &settings.extensions,
            &settings.skip_directories,
            &settings.restricted_patterns,
        )
    }

    fn is_documentation(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }

    fn skips_directory(&self, name: &str) -> bool {
        self.skip_directories.matches_any(name)
    }

    fn is_restricted(&self, relative: &Path) -> bool {
        self.restricted.matches_any(&slash_path(relative))
    }
}

/// Candidate files found directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryBatch {
    pub directory: PathBuf,
    /// Paths relative to the walker root, in file-name order.
    pub files: Vec<PathBuf>,
}

/// Lazy, read-only traversal of a source-language root.
///
/// Directories are visited pre-order with entries sorted by name, so two
/// walks over an unchanged tree yield the same sequence. A missing root
/// yields nothing.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    root: PathBuf,
    rules: WalkRules,
}

impl DirectoryWalker {
    pub fn new(root: impl Into<PathBuf>, rules: WalkRules) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh traversal yielding one batch per directory with candidates.
    pub fn directories(&self) -> Directories<'_> {
        let stack = if self.root.is_dir() {
            vec![self.root.clone()]
        } else {
            debug!(root = %self.root.display(), "Walk root does not exist");
            Vec::new()
        };
        Directories {
            walker: self,
            stack,
        }
    }

    /// Start a fresh traversal yielding candidate paths relative to the root.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.directories().flat_map(|batch| batch.files)
    }
}

/// Iterator returned by [`DirectoryWalker::directories`].
#[derive(Debug)]
pub struct Directories<'a> {
    walker: &'a DirectoryWalker,
    stack: Vec<PathBuf>,
}

impl Iterator for Directories<'_> {
    type Item = DirectoryBatch;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.stack.pop() {
            let (subdirs, files) = self.read_directory(&dir);
            self.stack.extend(subdirs.into_iter().rev());
            if !files.is_empty() {
                return Some(DirectoryBatch {
                    directory: dir,
                    files,
                });
            }
        }
        None
    }
}

impl Directories<'_> {
    fn read_directory(&self, dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    dir = %dir.display(),
                    error = %err,
                    "Failed to read directory during walk"
                );
                return (Vec::new(), Vec::new());
            }
        };
        let mut entries: Vec<_> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(
                        dir = %dir.display(),
                        error = %err,
                        "Failed to read directory entry during walk"
                    );
                    None
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.file_name());

        let rules = &self.walker.rules;
        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Failed to read file type during walk"
                    );
                    continue;
                }
            };
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                let name = entry.file_name();
                if rules.skips_directory(&name.to_string_lossy()) {
                    debug!(dir = %path.display(), "Skipping asset directory");
                } else {
                    subdirs.push(path);
                }
                continue;
            }
            if !file_type.is_file() || !rules.is_documentation(&path) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.walker.root) else {
                continue;
            };
            if rules.is_restricted(relative) {
                continue;
            }
            files.push(relative.to_path_buf());
        }
        (subdirs, files)
    }
}

/// Render a relative path with `/` separators for pattern matching.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"# doc").unwrap();
    }

    fn default_walker(root: &Path) -> DirectoryWalker {
        let rules = WalkRules::from_settings(&AuditSettings::default()).unwrap();
        DirectoryWalker::new(root, rules)
    }

    fn walk(walker: &DirectoryWalker) -> Vec<String> {
        walker.files().map(|path| slash_path(&path)).collect()
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempdir().unwrap();
        let walker = default_walker(&dir.path().join("absent"));
        assert_eq!(walker.directories().count(), 0);
    }

    #[test]
    fn yields_only_documentation_extensions() {
        let dir = tempdir().unwrap();
        for name in ["index.md", "api.mdx", "legacy.rst", "notes.txt", "_toctree.yml", "logo.png"] {
            touch(dir.path(), name);
        }
        assert_eq!(
            walk(&default_walker(dir.path())),
            vec!["api.mdx", "index.md", "legacy.rst"]
        );
    }

    #[test]
    fn readme_files_are_never_yielded() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "guides/README.md");
        touch(dir.path(), "guides/deep/README.md");
        touch(dir.path(), "guides/setup.md");
        assert_eq!(walk(&default_walker(dir.path())), vec!["guides/setup.md"]);
    }

    #[test]
    fn asset_directories_are_pruned() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "intro.md");
        touch(dir.path(), "img/diagram.md");
        touch(dir.path(), "_static/js/theme.md");
        touch(dir.path(), "guides/images/caption.md");
        touch(dir.path(), "guides/css-tricks.md");
        assert_eq!(
            walk(&default_walker(dir.path())),
            vec!["intro.md", "guides/css-tricks.md"]
        );
    }

    #[test]
    fn traversal_is_preorder_and_sorted() {
        let dir = tempdir().unwrap();
        for name in ["b.md", "a.md", "z/inner.md", "c/deep/x.md", "c/y.md"] {
            touch(dir.path(), name);
        }
        let walker = default_walker(dir.path());
        let first = walk(&walker);
        assert_eq!(first, vec!["a.md", "b.md", "c/y.md", "c/deep/x.md", "z/inner.md"]);
        assert_eq!(walk(&walker), first);
    }

    #[test]
    fn batches_group_files_by_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.md");
        touch(dir.path(), "empty/notes.txt");
        touch(dir.path(), "guide/one.md");
        touch(dir.path(), "guide/two.md");
        let batches: Vec<_> = default_walker(dir.path()).directories().collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].directory, dir.path());
        assert_eq!(batches[1].directory, dir.path().join("guide"));
        assert_eq!(
            batches[1].files,
            vec![PathBuf::from("guide/one.md"), PathBuf::from("guide/two.md")]
        );
    }

    #[test]
    fn custom_rules_apply() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "keep.txt");
        touch(dir.path(), "drafts/skip.txt");
        touch(dir.path(), "private-notes.txt");
        let rules = WalkRules::new(&[".txt"], &["drafts"], &["private-*"]).unwrap();
        let walker = DirectoryWalker::new(dir.path(), rules);
        assert_eq!(walk(&walker), vec!["keep.txt"]);
    }
}
