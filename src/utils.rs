use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the filesystem root is dropped.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // Prefixes, the root and normal components are kept
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Joins `path` onto `root` and returns the result only if it stays inside
/// `root`. Absolute paths are accepted when they point inside `root`.
///
/// A relative `path` is rejected as soon as a `..` would climb above `root`,
/// whether or not `root` itself is absolute.
pub fn resolve_within(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = normalize_path(root);

    if path.is_absolute() {
        let resolved = normalize_path(path);
        return resolved.starts_with(&root).then_some(resolved);
    }

    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::Normal(_) => depth += 1,
            // a drive prefix or root on a relative path points elsewhere
            Component::Prefix(_) | Component::RootDir => return None,
        }
    }

    Some(normalize_path(&root.join(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_within_relative_root_rejects_parent_escape() {
        assert_eq!(resolve_within(Path::new("."), Path::new("../escape.txt")), None);
        assert_eq!(resolve_within(Path::new(""), Path::new("a/../../b")), None);
        assert_eq!(
            resolve_within(Path::new("out"), Path::new("a/../b.txt")),
            Some(PathBuf::from("out/b.txt"))
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/work/./a/../b/c")),
            PathBuf::from("/work/b/c")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_resolve_within_accepts_nested_paths() {
        let root = Path::new("/work/project");

        assert_eq!(
            resolve_within(root, Path::new("src/main.rs")),
            Some(PathBuf::from("/work/project/src/main.rs"))
        );
        assert_eq!(
            resolve_within(root, Path::new("src/../docs/")),
            Some(PathBuf::from("/work/project/docs"))
        );
        assert_eq!(
            resolve_within(root, Path::new("/work/project/lib")),
            Some(PathBuf::from("/work/project/lib"))
        );
    }

    #[test]
    fn test_resolve_within_rejects_escapes() {
        let root = Path::new("/work/project");

        assert_eq!(resolve_within(root, Path::new("../outside.txt")), None);
        assert_eq!(resolve_within(root, Path::new("a/../../b")), None);
        assert_eq!(resolve_within(root, Path::new("/etc/passwd")), None);
        assert_eq!(resolve_within(root, Path::new("../project-other/x")), None);
    }
}
