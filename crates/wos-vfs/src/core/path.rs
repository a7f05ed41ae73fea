//! Path utilities for the VFS layer.
//!
//! Pure string functions: nothing here looks at the tree, and nothing fails.
//! A path that names no node is still a valid path; lookups report it later.

use super::error::VfsError;

/// Path separator.
pub const SEPARATOR: char = '/';

/// Iterate the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Normalize a path by collapsing repeated separators and dropping a trailing one.
///
/// `.` and `..` are kept as literal segments; use [`resolve`] to interpret them.
/// Relative input is anchored at the root.
pub fn normalize(path: &str) -> String {
    let mut result = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        result.push(SEPARATOR);
        result.push_str(segment);
    }
    if result.is_empty() {
        result.push(SEPARATOR);
    }
    result
}

/// Resolve `target` against the working directory `cwd`.
///
/// Absolute targets are only normalized. Relative targets are folded onto
/// `cwd` segment by segment: `.` is skipped, `..` pops (and is absorbed at the
/// root), anything else is pushed.
pub fn resolve(cwd: &str, target: &str) -> String {
    if target.starts_with(SEPARATOR) {
        return normalize(target);
    }

    let mut stack: Vec<&str> = segments(cwd).collect();
    for segment in segments(target) {
        match segment {
            "." => {}
            ".." => {
                stack.pop();
            }
            name => stack.push(name),
        }
    }

    normalize(&stack.join("/"))
}

/// Get the parent path of a normalized path.
pub fn parent_path(path: &str) -> String {
    if path == "/" {
        return String::from("/");
    }

    match path.rfind(SEPARATOR) {
        Some(0) | None => String::from("/"),
        Some(pos) => String::from(&path[..pos]),
    }
}

/// Get the filename (last component) of a normalized path.
pub fn filename(path: &str) -> &str {
    if path == "/" {
        return "";
    }

    match path.rfind(SEPARATOR) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Join a directory path and a child name.
pub fn join_path(base: &str, name: &str) -> String {
    if base == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Check if `path` is `base` or lies underneath it.
pub fn is_under(path: &str, base: &str) -> bool {
    if base == "/" {
        return true;
    }

    path.starts_with(base) && (path.len() == base.len() || path.as_bytes()[base.len()] == b'/')
}

/// Check if `path` lies strictly underneath `base` (textual prefix test).
pub fn is_strict_descendant(path: &str, base: &str) -> bool {
    path.len() > base.len() && is_under(path, base)
}

/// Validate a name about to become a node in the tree.
pub fn validate_name(name: &str, path: &str) -> Result<(), VfsError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return Err(VfsError::InvalidPath(String::from(path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("//"), "/");
        assert_eq!(normalize("/home/user/"), "/home/user");
        assert_eq!(normalize("/home//user///docs"), "/home/user/docs");
        assert_eq!(normalize("home/user"), "/home/user");
        // Dots are not interpreted
        assert_eq!(normalize("/home/./user/.."), "/home/./user/..");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("/a/b", ".."), "/a");
        assert_eq!(resolve("/", ".."), "/");
        assert_eq!(resolve("/", "../../.."), "/");
        assert_eq!(resolve("/home/user", "Documents"), "/home/user/Documents");
        assert_eq!(resolve("/home/user", "./a/../b"), "/home/user/b");
        assert_eq!(resolve("/home/user", "/etc//hosts/"), "/etc/hosts");
        assert_eq!(resolve("/home/user", ""), "/home/user");
        assert_eq!(resolve("/home/user/", "../../tmp"), "/tmp");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/"), "/");
        assert_eq!(parent_path("/home"), "/");
        assert_eq!(parent_path("/home/user"), "/home");
        assert_eq!(parent_path("/home/user/docs"), "/home/user");
    }

    #[test]
    fn test_filename() {
        assert_eq!(filename("/"), "");
        assert_eq!(filename("/home"), "home");
        assert_eq!(filename("/home/user/file.txt"), "file.txt");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/", "home"), "/home");
        assert_eq!(join_path("/home/user", "file.txt"), "/home/user/file.txt");
    }

    #[test]
    fn test_is_under() {
        assert!(is_under("/home/user", "/home"));
        assert!(is_under("/home", "/home"));
        assert!(is_under("/anything", "/"));
        assert!(!is_under("/home", "/home/user"));
        assert!(!is_under("/homeuser", "/home"));

        assert!(is_strict_descendant("/a/b", "/a"));
        assert!(!is_strict_descendant("/a", "/a"));
        assert!(!is_strict_descendant("/ab", "/a"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("notes.txt", "/notes.txt").is_ok());
        assert!(validate_name("", "/").is_err());
        assert!(validate_name(".", "/a/.").is_err());
        assert!(validate_name("..", "/a/..").is_err());
        assert!(validate_name("a\0b", "/a\0b").is_err());
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof!["[a-z]{1,4}", Just(".".to_string()), Just("..".to_string()), Just(String::new())], 0..8)
            .prop_map(|parts| format!("/{}", parts.join("/")))
    }

    proptest! {
        #[test]
        fn prop_resolve_dot_is_normalize(cwd in path_strategy()) {
            prop_assert_eq!(resolve(&cwd, "."), normalize(&cwd));
        }

        #[test]
        fn prop_absolute_target_ignores_cwd(cwd in path_strategy(), target in path_strategy()) {
            prop_assert_eq!(resolve(&cwd, &target), normalize(&target));
        }

        #[test]
        fn prop_normalize_is_idempotent(path in path_strategy()) {
            let once = normalize(&path);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(once.starts_with('/'));
            prop_assert!(once == "/" || !once.ends_with('/'));
            prop_assert!(!once.contains("//"));
        }
    }
}
