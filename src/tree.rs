/*!
 * Hierarchical view of a flat file list and its text rendering
 */

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::utils::locale_cmp;

/// Indentation added per level of depth
const INDENT: &str = "  ";

/// A node of the project tree
///
/// Directory nodes are only ever created on the way to a file, so no
/// directory in a built tree is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Directory, keyed by child segment name
    Directory {
        children: BTreeMap<String, TreeNode>,
    },
    /// File, holding its absolute path
    File { path: PathBuf },
}

impl TreeNode {
    /// Empty directory node
    pub fn empty() -> Self {
        Self::Directory {
            children: BTreeMap::new(),
        }
    }

    /// Build the tree of `files` relative to `root`
    ///
    /// Files sharing a directory prefix share the node for that prefix.
    /// Files that are not under `root` are left out.
    pub fn build(root: &Path, files: &[PathBuf]) -> Self {
        let mut tree = Self::empty();

        for file in files {
            let segments = match file.strip_prefix(root) {
                Ok(rel) => rel
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
                Err(_) => {
                    warn!(
                        "{} is outside {}, left out of the tree",
                        file.display(),
                        root.display()
                    );
                    continue;
                }
            };

            tree.insert(&segments, file);
        }

        tree
    }

    /// Insert one file by its relative segments
    fn insert(&mut self, segments: &[String], file: &Path) {
        let Some((leaf, dirs)) = segments.split_last() else {
            return;
        };

        let mut node = self;
        for segment in dirs {
            node = node
                .children_mut()
                .entry(segment.clone())
                .or_insert_with(TreeNode::empty);
        }

        node.children_mut().insert(
            leaf.clone(),
            TreeNode::File {
                path: file.to_path_buf(),
            },
        );
    }

    /// Children of a directory node; a file node is turned into an empty directory first
    fn children_mut(&mut self) -> &mut BTreeMap<String, TreeNode> {
        if self.is_file() {
            *self = TreeNode::empty();
        }
        match self {
            TreeNode::Directory { children } => children,
            TreeNode::File { .. } => unreachable!("file node replaced above"),
        }
    }

    /// Whether this node is a file
    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File { .. })
    }

    /// Child of a directory node by segment name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        match self {
            TreeNode::Directory { children } => children.get(name),
            TreeNode::File { .. } => None,
        }
    }

    /// Number of file leaves below this node
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::Directory { children } => children.values().map(TreeNode::file_count).sum(),
            TreeNode::File { .. } => 1,
        }
    }

    /// Render the tree: directories first, then files, each group sorted by name
    ///
    /// Directory lines start with `+ `, file lines with `- `, and each level is
    /// indented by two spaces. Every line ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let TreeNode::Directory { children } = self else {
            return;
        };

        let mut entries: Vec<(&String, &TreeNode)> = children.iter().collect();
        entries.sort_by(|(a_name, a), (b_name, b)| {
            a.is_file()
                .cmp(&b.is_file())
                .then_with(|| locale_cmp(a_name, b_name))
        });

        let indent = INDENT.repeat(depth);
        for (name, node) in entries {
            match node {
                TreeNode::Directory { .. } => {
                    out.push_str(&format!("{}+ {}\n", indent, name));
                    node.render_into(out, depth + 1);
                }
                TreeNode::File { .. } => out.push_str(&format!("{}- {}\n", indent, name)),
            }
        }
    }
}

/// Build and render in one step
pub fn render_tree(root: &Path, files: &[PathBuf]) -> String {
    TreeNode::build(root, files).render()
}
