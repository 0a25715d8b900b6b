/*!
 * Name-based decisions on what the scanner descends into and picks up
 *
 * Directories are opt-out: everything is walked except well-known build,
 * dependency and tooling folders. Files are opt-in: only known source, config
 * and documentation files are listed.
 */

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;

/// Directory names never descended into (compared lowercased)
pub static EXCLUDED_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Dependencies
        "node_modules",
        "bower_components",
        "jspm_packages",
        "vendor",
        ".pnpm-store",
        ".yarn",
        // Build & Dist
        "dist",
        "build",
        "out",
        "target",
        "bin",
        "obj",
        ".next",
        ".nuxt",
        ".output",
        "coverage",
        ".gradle",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
        "venv",
        ".venv",
        "env",
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        // Caches
        ".cache",
        ".terraform",
    ]
    .into_iter()
    .collect()
});

/// File extensions (without the dot, lowercased) that are listed
pub static INCLUDED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // JavaScript/TypeScript
        "js", "jsx", "mjs", "cjs", "ts", "tsx", "vue", "svelte",
        // Systems
        "c", "h", "cpp", "cc", "cxx", "hpp", "hh", "rs", "go", "zig", "swift",
        // JVM & .NET
        "java", "kt", "kts", "scala", "groovy", "gradle", "cs", "fs", "vb",
        // Scripting
        "py", "pyi", "rb", "php", "pl", "lua", "r", "dart", "ex", "exs", "erl", "hs",
        "clj", "sh", "bash", "zsh", "fish", "ps1", "bat", "cmd",
        // Web
        "html", "htm", "css", "scss", "sass", "less",
        // Data & Config
        "json", "jsonc", "xml", "yml", "yaml", "toml", "ini", "cfg", "conf", "env",
        "properties", "sql", "graphql", "gql", "proto",
        // Docs
        "md", "mdx", "rst", "txt", "adoc",
    ]
    .into_iter()
    .collect()
});

/// Extensionless (or dot-) file names that are listed, lowercased
pub static INCLUDED_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Build manifests
        "makefile",
        "gnumakefile",
        "dockerfile",
        "containerfile",
        "gemfile",
        "rakefile",
        "procfile",
        "vagrantfile",
        "justfile",
        "cmakelists.txt",
        "build",
        "workspace",
        // Docs & legal
        "readme",
        "license",
        "licence",
        "copying",
        "changelog",
        "authors",
        "contributing",
        "notice",
        // CI/VCS dotfiles
        ".gitignore",
        ".gitattributes",
        ".gitmodules",
        ".dockerignore",
        ".editorconfig",
        ".npmrc",
        ".nvmrc",
        ".prettierrc",
        ".eslintrc",
        ".babelrc",
        ".travis.yml",
        ".gitlab-ci.yml",
        ".env",
    ]
    .into_iter()
    .collect()
});

/// File names left out when the user picks "select all"
pub static BULK_EXCLUDED_NAMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["package-lock.json", ".env"].into_iter().collect());

/// Pure name-based filter used by the scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFilter;

impl PathFilter {
    /// Create the default filter
    pub fn new() -> Self {
        Self
    }

    /// Whether a directory with this name should be walked
    pub fn should_descend(&self, dir_name: &str) -> bool {
        !EXCLUDED_DIRS.contains(dir_name.to_lowercase().as_str())
    }

    /// Whether a file with this name should be listed
    pub fn should_include(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        if INCLUDED_NAMES.contains(lower.as_str()) {
            return true;
        }

        Path::new(&lower)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| INCLUDED_EXTENSIONS.contains(ext))
    }

    /// Whether a file is skipped by "select all" even though it is listed
    pub fn is_bulk_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| BULK_EXCLUDED_NAMES.contains(name))
    }
}
