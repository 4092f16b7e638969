use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;
use walkdir::WalkDir;

use crate::error::{Result, SproutError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File { content: Vec<u8> },
}

/// One entry of a template tree, addressed relative to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub relative_path: PathBuf,
    pub kind: NodeKind,
}

/// An in-memory template tree. Parents always precede their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    pub nodes: Vec<TreeNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.nodes.push(TreeNode {
            relative_path: path.into(),
            kind: NodeKind::Directory,
        });
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.nodes.push(TreeNode {
            relative_path: path.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        });
        self
    }
}

/// Read a template tree from disk.
///
/// Entries are visited depth-first with siblings sorted by file name, so the
/// resulting order does not depend on the platform's directory listing.
pub fn read_tree(root: &Path) -> Result<TemplateTree> {
    if !root.is_dir() {
        return Err(SproutError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut tree = TemplateTree::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SproutError::SourceRead {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        let src_path = entry.path();
        let relative_path = src_path
            .strip_prefix(root)
            .expect("entry must be under template root")
            .to_path_buf();

        let file_type = entry.file_type();
        if file_type.is_dir() {
            tree = tree.with_dir(relative_path);
        } else if file_type.is_file() {
            let content = std::fs::read(src_path).map_err(|e| SproutError::SourceRead {
                path: src_path.to_path_buf(),
                source: e,
            })?;
            tree = tree.with_file(relative_path, content);
        } else {
            log::debug!("skipping special file {}", src_path.display());
        }
    }

    Ok(tree)
}

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BundledTemplate;

/// The template tree compiled into the binary.
///
/// Ordered like [`read_tree`]: parents first, siblings by file name. Directories
/// are inferred from file paths, so every bundled directory needs at least one file.
pub fn bundled_tree() -> TemplateTree {
    let mut paths: Vec<PathBuf> = BundledTemplate::iter()
        .map(|p| PathBuf::from(p.as_ref()))
        .collect();
    paths.sort();

    let mut tree = TemplateTree::new();
    let mut seen_dirs: HashSet<PathBuf> = HashSet::new();

    for path in paths {
        let Some(file) = path.to_str().and_then(BundledTemplate::get) else {
            continue;
        };

        let ancestors: Vec<_> = path
            .ancestors()
            .skip(1)
            .filter(|a| !a.as_os_str().is_empty())
            .collect();
        for dir in ancestors.into_iter().rev() {
            if seen_dirs.insert(dir.to_path_buf()) {
                tree = tree.with_dir(dir);
            }
        }

        tree = tree.with_file(path, file.data.into_owned());
    }

    tree
}
