//! Root item analysis over archive entry names.

use std::collections::BTreeSet;

use crate::UnboxError;

/// Unique first path segments of an archive's entries, sorted.
pub type RootItemSet = BTreeSet<String>;

/// Outcome of listing an archive before extraction.
#[derive(Debug)]
pub enum RootDiscovery {
    /// Listing succeeded.
    Found(RootItemSet),
    /// Listing failed; extraction proceeds with the top-level layout.
    Failed(UnboxError),
}

impl RootDiscovery {
    /// Builds a discovery result from a listing attempt.
    #[must_use]
    pub fn from_listing(listing: crate::Result<Vec<String>>) -> Self {
        match listing {
            Ok(names) => Self::Found(analyze_roots(&names)),
            Err(err) => Self::Failed(err),
        }
    }

    /// Returns the root set, or an empty set if listing failed.
    #[must_use]
    pub fn roots(&self) -> RootItemSet {
        match self {
            Self::Found(roots) => roots.clone(),
            Self::Failed(_) => RootItemSet::new(),
        }
    }

    /// Returns `true` if listing succeeded.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Returns the first path segment of `name`, skipping leading `./`.
///
/// `None` when the name has no non-empty first segment.
#[must_use]
pub fn root_of(name: &str) -> Option<&str> {
    let mut rest = name;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    let first = rest.split('/').next().unwrap_or_default();
    (!first.is_empty() && first != ".").then_some(first)
}

/// Collects the unique root items of an archive's entry names.
///
/// # Examples
///
/// ```
/// use unboxer_core::layout::analyze_roots;
///
/// let roots = analyze_roots(&["pkg/", "pkg/a.txt", "./README", "/"]);
/// assert_eq!(roots.into_iter().collect::<Vec<_>>(), ["README", "pkg"]);
/// ```
#[must_use]
pub fn analyze_roots<S: AsRef<str>>(names: &[S]) -> RootItemSet {
    names
        .iter()
        .filter_map(|name| root_of(name.as_ref()))
        .map(str::to_owned)
        .collect()
}
