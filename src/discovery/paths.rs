// src/discovery/paths.rs

//! Default seeds-directory resolution.

use std::path::{Component, Path, PathBuf};

use crate::fs::FileSystem;

/// Seeds directories relative to a project root, in preference order.
pub const SEED_DIRS: &[&str] = &["resources/seeds", "database/seeds"];

/// Files whose presence marks a project root.
pub const PROJECT_MANIFESTS: &[&str] = &["Cargo.toml", "composer.json"];

/// Directory name that marks a vendored dependency tree.
pub const VENDOR_DIR: &str = "vendor";

/// Candidate seeds directories for `cwd`, in the order they are tried.
///
/// `cwd/{resources,database}/seeds`, then the same under the parent, then,
/// when `cwd` sits inside a `vendor` tree, the same under the nearest
/// ancestor holding a project manifest.
pub fn candidate_seed_paths(fs: &dyn FileSystem, cwd: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = SEED_DIRS.iter().map(|d| cwd.join(d)).collect();

    let parent = cwd.parent().unwrap_or(cwd);
    candidates.extend(SEED_DIRS.iter().map(|d| parent.join(d)));

    if is_inside_vendor(cwd) {
        if let Some(root) = find_project_root(fs, cwd) {
            candidates.extend(SEED_DIRS.iter().map(|d| root.join(d)));
        }
    }

    candidates
}

/// First existing candidate, else `cwd/resources/seeds`.
pub fn default_seeds_path(fs: &dyn FileSystem, cwd: &Path) -> PathBuf {
    candidate_seed_paths(fs, cwd)
        .into_iter()
        .find(|path| fs.is_dir(path))
        .unwrap_or_else(|| cwd.join(SEED_DIRS[0]))
}

/// Nearest ancestor of `start` (inclusive) that contains a project manifest.
pub fn find_project_root(fs: &dyn FileSystem, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| {
            PROJECT_MANIFESTS
                .iter()
                .any(|manifest| fs.is_file(&dir.join(manifest)))
        })
        .map(Path::to_path_buf)
}

fn is_inside_vendor(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == VENDOR_DIR))
}
