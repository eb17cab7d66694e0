//! Output directory name derived from an archive's file name.

use std::fmt;
use std::path::Path;

/// Recognized archive suffixes, in matching priority order.
///
/// Compound suffixes come before the shorter suffixes they end with, so
/// `bundle.tar.gz` strips to `bundle` rather than `bundle.tar`.
pub const ARCHIVE_SUFFIXES: [&str; 9] = [
    ".tar.gz", ".tar.bz2", ".tar.xz", ".tar.zst", ".tgz", ".zip", ".tar", ".7z", ".rar",
];

/// Archive file name with one recognized suffix removed.
///
/// Suffixes are matched case-insensitively and at most one is stripped. A
/// name that would become empty, `.` or `..` (e.g. `.zip`, `...zip`) is kept
/// whole, so the output directory always stays a child of the output root.
///
/// # Examples
///
/// ```
/// use unboxer_core::types::BaseName;
///
/// assert_eq!(BaseName::from_file_name("release-1.0.zip").as_str(), "release-1.0");
/// assert_eq!(BaseName::from_file_name("bundle.TAR.GZ").as_str(), "bundle");
/// assert_eq!(BaseName::from_file_name("notes.txt").as_str(), "notes.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseName(String);

impl BaseName {
    /// Derives the base name from a bare file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let stripped = ARCHIVE_SUFFIXES
            .iter()
            .find(|suffix| lower.ends_with(*suffix))
            .map_or(name, |suffix| &name[..name.len() - suffix.len()]);

        if matches!(stripped, "" | "." | "..") {
            Self(name.to_owned())
        } else {
            Self(stripped.to_owned())
        }
    }

    /// Derives the base name from the final component of `path`.
    ///
    /// Returns `None` if the path has no file name (e.g. `..` or `/`).
    #[must_use]
    pub fn from_archive_path(path: &Path) -> Option<Self> {
        path.file_name()
            .map(|name| Self::from_file_name(&name.to_string_lossy()))
    }

    /// Returns the base name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for BaseName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl PartialEq<str> for BaseName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_suffixes() {
        assert_eq!(BaseName::from_file_name("a.zip").as_str(), "a");
        assert_eq!(BaseName::from_file_name("a.tar").as_str(), "a");
        assert_eq!(BaseName::from_file_name("a.7z").as_str(), "a");
        assert_eq!(BaseName::from_file_name("a.rar").as_str(), "a");
        assert_eq!(BaseName::from_file_name("a.tgz").as_str(), "a");
    }

    #[test]
    fn test_compound_suffix_wins() {
        assert_eq!(BaseName::from_file_name("bundle.tar.gz").as_str(), "bundle");
        assert_eq!(BaseName::from_file_name("bundle.tar.xz").as_str(), "bundle");
        assert_eq!(BaseName::from_file_name("bundle.tar.bz2").as_str(), "bundle");
    }

    #[test]
    fn test_only_one_suffix_stripped() {
        assert_eq!(BaseName::from_file_name("nested.zip.zip").as_str(), "nested.zip");
        assert_eq!(BaseName::from_file_name("data.zip.tar").as_str(), "data.zip");
    }

    #[test]
    fn test_case_insensitive_preserves_original_case() {
        assert_eq!(BaseName::from_file_name("Release-1.0.ZIP").as_str(), "Release-1.0");
        assert_eq!(BaseName::from_file_name("Bundle.Tar.Gz").as_str(), "Bundle");
    }

    #[test]
    fn test_dots_inside_name_kept() {
        assert_eq!(BaseName::from_file_name("release-1.0.zip").as_str(), "release-1.0");
        assert_eq!(BaseName::from_file_name("v1.2.3.7z").as_str(), "v1.2.3");
    }

    #[test]
    fn test_unrecognized_suffix_kept() {
        assert_eq!(BaseName::from_file_name("archive.gz").as_str(), "archive.gz");
        assert_eq!(BaseName::from_file_name("README").as_str(), "README");
    }

    #[test]
    fn test_bare_suffix_kept_whole() {
        assert_eq!(BaseName::from_file_name(".zip").as_str(), ".zip");
        assert_eq!(BaseName::from_file_name(".tar.gz").as_str(), ".tar.gz");
    }

    #[test]
    fn test_dot_names_kept_whole() {
        assert_eq!(BaseName::from_file_name("..zip").as_str(), "..zip");
        assert_eq!(BaseName::from_file_name("...zip").as_str(), "...zip");
        assert_eq!(BaseName::from_file_name("...TAR.GZ").as_str(), "...TAR.GZ");
        assert_eq!(BaseName::from_file_name("....zip").as_str(), "...");
    }

    #[test]
    fn test_from_archive_path() {
        let name = BaseName::from_archive_path(Path::new("demo/input/bundle.tar.gz"));
        assert_eq!(name.as_ref().map(BaseName::as_str), Some("bundle"));
        assert!(BaseName::from_archive_path(Path::new("..")).is_none());
    }
}
