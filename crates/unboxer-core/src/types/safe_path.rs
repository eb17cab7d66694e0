//! Validated relative path for archive entries.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::UnboxError;

/// An entry path that is safe to join onto an extraction directory.
///
/// `SafePath` is relative, contains no `..` components and no root or
/// prefix, and has `.` components removed. It can only be obtained through
/// validation.
///
/// # Examples
///
/// ```
/// use unboxer_core::types::SafePath;
///
/// let safe = SafePath::from_entry_name("./release/a.txt").unwrap().unwrap();
/// assert_eq!(safe.as_path(), std::path::Path::new("release/a.txt"));
///
/// assert!(SafePath::from_entry_name("../etc/passwd").is_err());
/// assert!(SafePath::from_entry_name("./").unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an entry name as recorded in an archive.
    ///
    /// Returns `Ok(None)` for names that normalize to nothing (`""`, `.`,
    /// `./`); such entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PathTraversal` for `..` components and absolute paths, and
    /// `InvalidArchive` for names containing null bytes.
    pub fn from_entry_name(name: &str) -> Result<Option<Self>> {
        if name.contains('\0') {
            return Err(UnboxError::InvalidArchive(format!(
                "entry name contains null byte: {}",
                name.escape_default()
            )));
        }
        Self::validate(Path::new(name))
    }

    /// Validates an entry path.
    ///
    /// # Errors
    ///
    /// Returns `PathTraversal` for `..` components and absolute paths.
    pub fn validate(path: &Path) -> Result<Option<Self>> {
        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(UnboxError::PathTraversal {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            Ok(None)
        } else {
            Ok(Some(Self(normalized)))
        }
    }

    /// Checks that a symlink stored at this path with the given `target`
    /// resolves inside the extraction directory.
    ///
    /// Resolution is lexical: `target` is applied relative to the link's
    /// parent directory.
    ///
    /// # Errors
    ///
    /// Returns `PathTraversal` when the target is absolute or climbs above
    /// the extraction root.
    pub fn check_link_target(&self, target: &Path) -> Result<()> {
        let escape = || UnboxError::PathTraversal {
            path: self.0.join(target),
        };

        let mut depth = self.0.components().count().saturating_sub(1);
        for component in target.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(escape)?,
                Component::RootDir | Component::Prefix(_) => return Err(escape()),
            }
        }
        Ok(())
    }

    /// Returns the path as a `&Path`.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nested_path() {
        let safe = SafePath::from_entry_name("foo/bar/baz.txt").unwrap().unwrap();
        assert_eq!(safe.as_path(), Path::new("foo/bar/baz.txt"));
    }

    #[test]
    fn test_current_dir_is_normalized() {
        let safe = SafePath::from_entry_name("./foo/./bar.txt").unwrap().unwrap();
        assert_eq!(safe.as_path(), Path::new("foo/bar.txt"));
    }

    #[test]
    fn test_empty_names_are_skipped() {
        assert!(SafePath::from_entry_name("").unwrap().is_none());
        assert!(SafePath::from_entry_name(".").unwrap().is_none());
        assert!(SafePath::from_entry_name("./").unwrap().is_none());
    }

    #[test]
    fn test_traversal_rejected() {
        for name in [
            "../etc/passwd",
            "../../etc/passwd",
            "foo/../../etc/passwd",
            "foo/../bar",
        ] {
            assert!(
                matches!(
                    SafePath::from_entry_name(name),
                    Err(UnboxError::PathTraversal { .. })
                ),
                "path should be rejected: {name}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_rejected() {
        assert!(matches!(
            SafePath::from_entry_name("/etc/passwd"),
            Err(UnboxError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_null_byte_rejected() {
        assert!(matches!(
            SafePath::from_entry_name("foo\0bar"),
            Err(UnboxError::InvalidArchive(_))
        ));
    }

    #[test]
    fn test_link_target_inside() {
        let link = SafePath::from_entry_name("dir/sub/link").unwrap().unwrap();
        assert!(link.check_link_target(Path::new("../file.txt")).is_ok());
        assert!(link.check_link_target(Path::new("../../top.txt")).is_ok());
        assert!(link.check_link_target(Path::new("sibling")).is_ok());
    }

    #[test]
    fn test_link_target_escape() {
        let link = SafePath::from_entry_name("dir/link").unwrap().unwrap();
        assert!(link.check_link_target(Path::new("../../outside")).is_err());

        let top = SafePath::from_entry_name("link").unwrap().unwrap();
        assert!(top.check_link_target(Path::new("../outside")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_target_absolute() {
        let link = SafePath::from_entry_name("link").unwrap().unwrap();
        assert!(link.check_link_target(Path::new("/etc/passwd")).is_err());
    }
}
