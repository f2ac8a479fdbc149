//! Directory exclusion rule for the browsing tree.

/// Directories whose name starts with this character are hidden from browsing.
pub const HIDDEN_PREFIX: char = '.';

/// Well-known dependency directory skipped while browsing.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Check if a directory name is excluded from the browsing tree.
///
/// Applies to directories only; hidden files are still considered assets.
pub fn is_excluded_dir(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX) || name == DEPENDENCY_DIR
}
