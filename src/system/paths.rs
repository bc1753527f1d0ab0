// src/system/paths.rs

use crate::constants::{RC_FILENAME, SWIZZLE_CONFIG_FILENAME};
use std::{
    env,
    path::{Component, Path, PathBuf},
};

/// Returns `swizzle.json` inside the current working directory.
pub fn get_swizzle_json_path() -> std::io::Result<PathBuf> {
    Ok(env::current_dir()?.join(SWIZZLE_CONFIG_FILENAME))
}

/// Returns the rc file that belongs next to a primary config file.
pub fn rc_path_for(primary_file: &Path) -> PathBuf {
    match primary_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(RC_FILENAME),
        _ => PathBuf::from(RC_FILENAME),
    }
}

/// Lists the rc files that exist, in load order: the home rc first, then
/// the one in the working directory, so the local file wins when both exist.
pub fn get_rc_file_paths_if_exist() -> Vec<PathBuf> {
    // Local last: saves always write the rc next to swizzle.json (`rc_path_for`).
    let mut candidates = Vec::new();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(RC_FILENAME));
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join(RC_FILENAME));
    }
    candidates.dedup_by(|a, b| same_path(a, b));
    candidates.into_iter().filter(|p| p.is_file()).collect()
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Normalizes a path for comparison. Existing paths (or paths whose parent
/// exists) are canonicalized; anything else only loses its `.` components.
fn normalize(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    if let Ok(canonical) = dunce::canonicalize(&expanded) {
        return canonical;
    }
    if let (Some(parent), Some(name)) = (expanded.parent(), expanded.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(canonical_parent) = dunce::canonicalize(parent) {
            return canonical_parent.join(name);
        }
    }
    expanded
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether two paths refer to the same file.
pub fn same_path(a: &Path, b: &Path) -> bool {
    a == b || normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_rc_path_sits_next_to_primary_file() {
        assert_eq!(
            rc_path_for(Path::new("/work/project/swizzle.json")),
            PathBuf::from("/work/project/.swizzlerc")
        );
        assert_eq!(rc_path_for(Path::new("swizzle.json")), PathBuf::from(".swizzlerc"));
    }

    #[test]
    fn test_same_path_ignores_current_dir_components() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("swizzle.json");
        fs::write(&file, "{}").unwrap();

        let dotted = dir.path().join(".").join("swizzle.json");
        assert!(same_path(&file, &dotted));
        assert!(!same_path(&file, &dir.path().join("other.json")));
    }

    #[test]
    fn test_same_path_for_files_not_yet_created() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("new.json");
        let b = dir.path().join("./new.json");
        assert!(same_path(&a, &b));
    }
}
